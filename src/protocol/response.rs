//! Response definitions
//!
//! Represents the single line a server sends back for a request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{classify_failure, Result, UNKNOWN_SERVER_ERROR};

/// A decoded response line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Whether the action succeeded. Missing means failure.
    #[serde(default)]
    pub success: bool,

    /// Error message, present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Result payload, present on success
    #[serde(default)]
    pub data: Option<Value>,
}

impl Response {
    /// Create a successful response carrying `data`
    pub fn ok(data: impl Into<Value>) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data.into()),
        }
    }

    /// Create a failed response with a message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            data: None,
        }
    }

    /// Convert into the payload on success or a typed failure otherwise.
    ///
    /// A success without `data` yields `Value::Null`.
    pub fn into_result(self) -> Result<Value> {
        if self.success {
            Ok(self.data.unwrap_or(Value::Null))
        } else {
            Err(classify_failure(
                self.error.unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string()),
            ))
        }
    }
}
