//! Authentication credentials for the Trade API
//!
//! Implements HMAC-SHA512 signing as required by every TAPI request.
//!
//! # Security
//!
//! The secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha512;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// Environment variable holding the TAPI identifier
pub const ENV_TAPI_ID: &str = "MB_TAPI_ID";
/// Environment variable holding the TAPI secret
pub const ENV_TAPI_SECRET: &str = "MB_TAPI_SECRET";

/// API credentials for authenticated requests
///
/// The secret is automatically zeroized when the Credentials are dropped,
/// preventing sensitive data from remaining in memory.
pub struct Credentials {
    /// TAPI identifier (sent as `TAPI-ID`)
    tapi_id: String,
    /// Shared secret (zeroized on drop)
    secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from a TAPI identifier and secret
    ///
    /// # Arguments
    /// * `tapi_id` - Your TAPI identifier
    /// * `secret` - Your TAPI secret, used as raw HMAC key bytes
    ///
    /// # Returns
    /// Error if either part is empty, or if the identifier cannot travel in an
    /// HTTP header.
    pub fn new(tapi_id: impl Into<String>, secret: impl AsRef<str>) -> AuthResult<Self> {
        let tapi_id = tapi_id.into();
        let secret = secret.as_ref();

        if tapi_id.is_empty() {
            return Err(AuthError::InvalidCredentials("TAPI id is empty".to_string()));
        }
        if !tapi_id.chars().all(|c| c.is_ascii_graphic()) {
            return Err(AuthError::InvalidCredentials(
                "TAPI id must be printable ASCII without spaces".to_string(),
            ));
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials("TAPI secret is empty".to_string()));
        }

        Ok(Self {
            tapi_id,
            secret: SecretBox::new(Box::new(secret.as_bytes().to_vec())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `MB_TAPI_ID` and `MB_TAPI_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let tapi_id = std::env::var(ENV_TAPI_ID)
            .map_err(|_| AuthError::EnvVarNotSet(ENV_TAPI_ID.to_string()))?;
        let secret = std::env::var(ENV_TAPI_SECRET)
            .map_err(|_| AuthError::EnvVarNotSet(ENV_TAPI_SECRET.to_string()))?;

        debug!("Loaded TAPI credentials from environment");
        Self::new(tapi_id, secret)
    }

    /// Get the TAPI identifier
    pub fn tapi_id(&self) -> &str {
        &self.tapi_id
    }

    /// Compute the request MAC
    ///
    /// `hex(HMAC-SHA512(secret, message))`, lowercase.
    pub fn sign(&self, message: &str) -> String {
        // expose_secret() provides controlled access to the key
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Check a MAC against this secret in constant time
    pub fn verify(&self, message: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let mut mac = HmacSha512::new_from_slice(self.secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(message.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            tapi_id: self.tapi_id.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "tapi_id",
                &format!("{}...", &self.tapi_id[..8.min(self.tapi_id.len())]),
            )
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Request signer for one outbound request
///
/// Binds credentials, request path and the nonce issued for this request.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    path: String,
    nonce: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(credentials: &'a Credentials, path: impl Into<String>, nonce: u64) -> Self {
        Self {
            credentials,
            path: path.into(),
            nonce,
        }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Get the TAPI identifier
    pub fn tapi_id(&self) -> &str {
        self.credentials.tapi_id()
    }

    /// The exact text that is MACed: `"<path>?<form body>"`
    pub fn string_to_sign(&self, post_data: &str) -> String {
        format!("{}?{}", self.path, post_data)
    }

    /// Sign the request with the given POST data
    pub fn sign(&self, post_data: &str) -> String {
        self.credentials.sign(&self.string_to_sign(post_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC_SECRET: &str = "1ebda7d457ece1330dff1c9e04cd62c4e02d1835968ff89d2fb2339f06f73028";

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("test_tapi_id", "super_secret_value").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super_secret_value"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("id", ""),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("id with space", "secret"),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_hmac_sha512_known_vector() {
        let creds = Credentials::new("id", "key").unwrap();
        assert_eq!(
            creds.sign("The quick brown fox jumps over the lazy dog"),
            "b42af09057bac1e2d41708e48a902e09b5ff7f12ab428a4fe86653c73dd248fb\
             82f948a549f7b791a5b41915ee4d1ec3935357e4e2317250d0372afa2ebeeb3a"
        );
    }

    #[test]
    fn test_request_signature_vector() {
        let creds = Credentials::new("tapi-id", DOC_SECRET).unwrap();
        let signer = RequestSigner::new(&creds, "/tapi/v3/", 1);

        let body = "tapi_method=list_orders&tapi_nonce=1&coin_pair=BRLBTC";
        assert_eq!(
            signer.string_to_sign(body),
            "/tapi/v3/?tapi_method=list_orders&tapi_nonce=1&coin_pair=BRLBTC"
        );
        assert_eq!(
            signer.sign(body),
            "f59ebcff16b112b868e44480ec2f965b6da18c8d7b6f215e9236297048e29061\
             2c9c22043c84733620b1f05c56dd0adee02fee55a95b58f0e38129190cb5ac5a"
        );
    }

    #[test]
    fn test_parameter_order_changes_signature() {
        let creds = Credentials::new("tapi-id", DOC_SECRET).unwrap();
        let signer = RequestSigner::new(&creds, "/tapi/v3/", 1);

        assert_eq!(
            signer.sign("coin_pair=BRLBTC&tapi_method=list_orders&tapi_nonce=1"),
            "3bf685d86d6f82f34507556b26afa3388fc471ee61110900d419f561b941d3ad\
             108d74b812a097716b569d939fd3d31d45760a2734f4a2b246054ab011429c0d"
        );
    }

    #[test]
    fn test_sign_then_verify() {
        let creds = Credentials::new("tapi-id", DOC_SECRET).unwrap();
        let message = "/tapi/v3/?tapi_method=get_account_info&tapi_nonce=42";
        let signature = creds.sign(message);

        assert!(creds.verify(message, &signature));
        assert!(!creds.verify("/tapi/v3/?tapi_method=get_account_info&tapi_nonce=43", &signature));
        assert!(!creds.verify(message, "not-hex"));
    }

    #[test]
    fn test_clone_keeps_secret() {
        let creds = Credentials::new("tapi-id", DOC_SECRET).unwrap();
        let cloned = creds.clone();
        assert_eq!(cloned.tapi_id(), "tapi-id");
        assert_eq!(creds.sign("x"), cloned.sign("x"));
    }
}
