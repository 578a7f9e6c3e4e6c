//! Error types for Trade API operations

use mercado_auth::AuthError;
use mercado_types::{EnvelopeError, InvalidArgument};

/// Errors that can occur during Trade API operations
///
/// Nothing is retried internally; every failure surfaces on the first attempt.
#[derive(Debug, thiserror::Error)]
pub enum TapiError {
    /// Caller passed a value outside its allowed domain (no request was sent)
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// HTTP request failed (DNS, TLS, connection refused or reset)
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Response was not a well-formed envelope
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// API returned an error
    #[error("API error {status_code}: {message}")]
    Api {
        /// `status_code` from the envelope
        status_code: i64,
        /// `error_message` from the envelope, verbatim
        message: String,
    },

    /// Invalid or unavailable credentials
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Client configuration carries no credentials
    #[error("Credentials are required to build a Trade API client")]
    AuthRequired,
}

/// Broad classification of a [`TapiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Transport,
    Protocol,
    Api,
    Configuration,
}

impl TapiError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Http(_) | Self::Timeout => ErrorKind::Transport,
            Self::Protocol(_) => ErrorKind::Protocol,
            Self::Api { .. } => ErrorKind::Api,
            Self::Auth(_) | Self::AuthRequired => ErrorKind::Configuration,
        }
    }

    /// Check if the request never reached, or never came back from, the server
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Server-supplied message for API errors
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TapiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }
}

impl From<EnvelopeError> for TapiError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Rejected {
                status_code,
                message,
            } => Self::Api {
                status_code,
                message,
            },
            EnvelopeError::MissingField(field) => {
                Self::Protocol(format!("missing `{}` in response", field))
            }
        }
    }
}

/// Result type for Trade API operations
pub type TapiResult<T> = Result<T, TapiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_rejection_becomes_api_error() {
        let err = TapiError::from(EnvelopeError::Rejected {
            status_code: 203,
            message: "Invalid nonce".to_string(),
        });
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.api_message(), Some("Invalid nonce"));
        assert_eq!(err.to_string(), "API error 203: Invalid nonce");
    }

    #[test]
    fn test_missing_field_becomes_protocol_error() {
        let err = TapiError::from(EnvelopeError::MissingField("response_data".to_string()));
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(err.to_string().contains("response_data"));
    }

    #[test]
    fn test_error_kinds() {
        assert!(TapiError::Timeout.is_transport());
        assert_eq!(
            TapiError::from(InvalidArgument::new("level", "bad")).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(TapiError::AuthRequired.kind(), ErrorKind::Configuration);
        assert_eq!(TapiError::Protocol("x".into()).api_message(), None);
    }
}
