//! Authentication primitives for Mercado Bitcoin's Trade API (TAPI v3)
//!
//! Every private request carries:
//! - `TAPI-ID`: the public identifier of the API key
//! - `TAPI-MAC`: hex HMAC-SHA512 of `"<path>?<form body>"`, keyed by the secret
//! - a `tapi_nonce` body field that must strictly increase per key
//!
//! # Example
//!
//! ```
//! use mercado_auth::{Credentials, NonceGenerator, RequestSigner};
//!
//! let creds = Credentials::new("my-tapi-id", "my-tapi-secret").unwrap();
//! let nonces = NonceGenerator::new();
//!
//! let signer = RequestSigner::new(&creds, "/tapi/v3/", nonces.next().unwrap());
//! let mac = signer.sign("tapi_method=get_account_info&tapi_nonce=1");
//! assert_eq!(mac.len(), 128);
//! ```

mod credentials;
mod error;
mod nonce;

pub use credentials::{Credentials, RequestSigner};
pub use error::{AuthError, AuthResult};
pub use nonce::NonceGenerator;
