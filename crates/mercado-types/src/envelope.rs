//! Uniform response envelope
//!
//! Every Trade API response has the same shape:
//!
//! ```json
//! {"status_code": 100, "response_data": {"orders": []}}
//! {"status_code": 203, "error_message": "Invalid nonce"}
//! ```
//!
//! `response_data` is passed through untouched; the only inspection done is
//! optional extraction of one top-level key.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// `status_code` reported on success
pub const SUCCESS_STATUS: i64 = 100;

/// Standard Trade API response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    /// 100 on success, an error code otherwise
    pub status_code: i64,
    /// Payload (present if successful)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_data: Option<Value>,
    /// Error detail (present if failed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Why an envelope did not yield a payload
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EnvelopeError {
    /// The server reported a failure
    #[error("status {status_code}: {message}")]
    Rejected { status_code: i64, message: String },

    /// A field the envelope contract requires is absent
    #[error("missing `{0}` in response")]
    MissingField(String),
}

impl Envelope {
    /// Parse a response body, keeping object key order
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.status_code == SUCCESS_STATUS
    }

    /// Unwrap the payload, optionally narrowed to one top-level key
    pub fn into_payload(self, sub_key: Option<&str>) -> Result<Value, EnvelopeError> {
        if !self.is_success() {
            let message = self
                .error_message
                .ok_or_else(|| EnvelopeError::MissingField("error_message".to_string()))?;
            return Err(EnvelopeError::Rejected {
                status_code: self.status_code,
                message,
            });
        }

        let data = self
            .response_data
            .ok_or_else(|| EnvelopeError::MissingField("response_data".to_string()))?;

        match sub_key {
            None => Ok(data),
            Some(key) => match data {
                Value::Object(mut map) => map
                    .remove(key)
                    .ok_or_else(|| EnvelopeError::MissingField(format!("response_data.{}", key))),
                _ => Err(EnvelopeError::MissingField(format!("response_data.{}", key))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_with_sub_key() {
        let body = r#"{"status_code":100,"response_data":{"orders":[{"order_id":1},{"order_id":2}]}}"#;
        let envelope = Envelope::from_json(body).unwrap();
        assert!(envelope.is_success());

        let orders = envelope.into_payload(Some("orders")).unwrap();
        assert_eq!(orders, serde_json::json!([{"order_id":1},{"order_id":2}]));
    }

    #[test]
    fn test_failure_carries_message() {
        let body = r#"{"status_code":200,"error_message":"Invalid nonce"}"#;
        let err = Envelope::from_json(body).unwrap().into_payload(None).unwrap_err();
        assert_eq!(
            err,
            EnvelopeError::Rejected {
                status_code: 200,
                message: "Invalid nonce".to_string()
            }
        );
    }

    #[test]
    fn test_failure_without_message() {
        let body = r#"{"status_code":500}"#;
        let err = Envelope::from_json(body).unwrap().into_payload(None).unwrap_err();
        assert_eq!(err, EnvelopeError::MissingField("error_message".to_string()));
    }

    #[test]
    fn test_missing_sub_key() {
        let body = r#"{"status_code":100,"response_data":{"order":{}}}"#;
        let err = Envelope::from_json(body)
            .unwrap()
            .into_payload(Some("orders"))
            .unwrap_err();
        assert_eq!(err, EnvelopeError::MissingField("response_data.orders".to_string()));
    }

    #[test]
    fn test_payload_preserves_key_order() {
        let body = r#"{"status_code":100,"response_data":{"zeta":1,"alpha":2,"mid":3}}"#;
        let data = Envelope::from_json(body).unwrap().into_payload(None).unwrap();
        assert_eq!(
            serde_json::to_string(&data).unwrap(),
            r#"{"zeta":1,"alpha":2,"mid":3}"#
        );
    }

    #[test]
    fn test_missing_status_is_parse_error() {
        assert!(Envelope::from_json(r#"{"response_data":{}}"#).is_err());
        assert!(Envelope::from_json("<html>502</html>").is_err());
    }
}
