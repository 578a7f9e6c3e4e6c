//! Demo 1: Read-only Trade API tour
//!
//! Showcases: signed requests, envelope unwrapping, error categories
//!
//! Calls every read-only operation in the catalog and prints the payloads.
//! Nothing is bought, sold or withdrawn.
//!
//! Run: MB_TAPI_ID=... MB_TAPI_SECRET=... cargo run --bin tapi_tour

use colored::*;
use mercado_tapi::{CoinPair, ErrorKind, MessageLevel, TapiClient, TapiResult};
use serde_json::Value;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=mercado_tapi=debug shows every signed request
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  MERCADO BITCOIN TRADE API TOUR".cyan().bold());
    println!("{}", "  Read-only operations, one signed request each".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = TapiClient::from_env()?;
    println!("{} Loaded credentials for {}", "✓".green(), client.tapi_id());
    println!();

    show("list_system_messages", client.list_system_messages(None).await);
    for level in [MessageLevel::Info, MessageLevel::Warning, MessageLevel::Error] {
        show(
            &format!("list_system_messages({})", level),
            client.list_system_messages(Some(level)).await,
        );
    }

    show("get_account_info", client.get_account_info().await);

    for pair in CoinPair::ALL {
        show(&format!("list_orders({})", pair), client.list_orders(pair).await);
        show(
            &format!("list_orderbook({})", pair),
            client.list_orderbook(pair, Some(false)).await,
        );
    }

    println!("{}", "═".repeat(60).cyan());
    println!("  Last nonce used: {}", client.last_nonce());
    println!("  {}", "Persist it and pass to ClientConfig::with_nonce_floor".dimmed());

    Ok(())
}

fn show(label: &str, result: TapiResult<Value>) {
    println!("{} {}", "▶".yellow(), label.white().bold());
    match result {
        Ok(payload) => match serde_json::to_string_pretty(&payload) {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => println!("  {} {}", "render failed:".red(), e),
        },
        Err(e) => {
            let category = match e.kind() {
                ErrorKind::Api => "API".red(),
                ErrorKind::Transport => "TRANSPORT".magenta(),
                ErrorKind::Protocol => "PROTOCOL".magenta(),
                ErrorKind::InvalidArgument => "ARGUMENT".yellow(),
                ErrorKind::Configuration => "CONFIG".yellow(),
            };
            println!("  [{}] {}", category, e);
        }
    }
    println!();
}
