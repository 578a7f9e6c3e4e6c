//! Error types for authentication operations

/// Errors that can occur while loading or validating credentials
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// Every nonce up to `u64::MAX` has been issued
    #[error("Nonce space exhausted: no value above u64::MAX")]
    NonceExhausted,
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("MB_TAPI_ID".to_string());
        assert!(err.to_string().contains("MB_TAPI_ID"));
    }
}
