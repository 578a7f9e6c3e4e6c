//! Argument validation errors

use thiserror::Error;

/// A caller-supplied argument is outside its allowed domain
///
/// Always detected before a request is signed or sent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid parameter `{parameter}`: {reason}")]
pub struct InvalidArgument {
    /// Name of the offending parameter
    pub parameter: String,
    /// Human-readable explanation
    pub reason: String,
}

impl InvalidArgument {
    pub fn new(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}
