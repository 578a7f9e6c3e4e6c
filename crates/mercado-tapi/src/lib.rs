//! Client for Mercado Bitcoin's private Trade API (TAPI v3)
//!
//! Every operation is one signed, form-encoded POST to `/tapi/v3/` whose
//! JSON response envelope is unwrapped into a `serde_json::Value`.
//!
//! # Features
//!
//! - **System**: TAPI system messages
//! - **Account**: Balances and limits
//! - **Trading**: List, get, place and cancel orders; private orderbook
//! - **Withdrawals**: Real withdrawals, Bitcoin and Litecoin transfers
//!
//! # Authentication
//!
//! Requests are signed with HMAC-SHA512 over `"/tapi/v3/?<body>"` and carry a
//! strictly increasing `tapi_nonce`. See the `mercado-auth` crate.
//!
//! # Example
//!
//! ```no_run
//! use mercado_tapi::{CoinPair, Decimal, TapiClient};
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TapiClient::from_env()?;
//!
//!     let order = client
//!         .place_buy_order(CoinPair::BrlBtc, Decimal::from_str("0.01")?, Decimal::from(150_000))
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&order)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Failures are never retried. [`TapiError::kind`] tells invalid arguments
//! (nothing was sent), transport failures, malformed responses and API
//! rejections apart.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod transport;

// Re-export main types
pub use client::{ClientConfig, TapiClient, DEFAULT_BASE_URL, REQUEST_PATH};
pub use error::{ErrorKind, TapiError, TapiResult};
pub use transport::{HttpTransport, SignedRequest, Transport, TransportResponse};

pub use mercado_auth::{Credentials, NonceGenerator};
pub use mercado_types::{
    parse_identifier, Coin, CoinPair, Decimal, Envelope, FormParams, InvalidArgument,
    MessageLevel, OrderSide, ParamValue,
};
