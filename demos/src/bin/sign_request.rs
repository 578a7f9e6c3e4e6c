//! Demo 2: Offline request signing
//!
//! Showcases: the exact string-to-sign and TAPI-MAC for a given body
//!
//! Useful when comparing against another client or the exchange's docs.
//! No request is sent.
//!
//! Run: cargo run --bin sign_request -- <secret> <form-body>
//! e.g. cargo run --bin sign_request -- mysecret 'tapi_method=list_orders&tapi_nonce=1&coin_pair=BRLBTC'

use colored::*;
use mercado_auth::{Credentials, RequestSigner};
use mercado_tapi::REQUEST_PATH;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let (Some(secret), Some(body)) = (args.next(), args.next()) else {
        eprintln!("usage: sign_request <secret> <form-body>");
        std::process::exit(2);
    };

    let credentials = Credentials::new("offline", secret)?;
    let nonce = extract_nonce(&body).unwrap_or_default();
    let signer = RequestSigner::new(&credentials, REQUEST_PATH, nonce);

    println!("{} {}", "string to sign:".white().bold(), signer.string_to_sign(&body));
    println!("{} {}", "TAPI-MAC:      ".white().bold(), signer.sign(&body).green());
    if nonce == 0 {
        println!("{}", "warning: body has no numeric tapi_nonce".yellow());
    }

    Ok(())
}

fn extract_nonce(body: &str) -> Option<u64> {
    body.split('&')
        .find_map(|pair| pair.strip_prefix("tapi_nonce="))
        .and_then(|n| n.parse().ok())
}
