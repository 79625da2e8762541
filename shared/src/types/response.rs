//! The uniform response envelope exchanged between services.
//!
//! Every account-service operation answers with the same tagged shape:
//! `{ success, data?, message?, code? }`. The gateway re-raises non-success
//! envelopes as HTTP errors carrying the same code and message.

use serde::{Deserialize, Serialize};

/// Uniform success/failure envelope for inter-service replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// Whether the operation succeeded
    pub success: bool,

    /// Payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Human-readable message (always present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// HTTP-like numeric code (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl<T> ServiceResponse<T> {
    /// Create a successful envelope carrying data
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            code: None,
        }
    }

    /// Create a successful envelope with a message and no data
    pub fn ok_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            code: None,
        }
    }

    /// Create a failure envelope with a code and message
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            code: Some(code),
        }
    }
}
