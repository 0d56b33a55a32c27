//! Error types for craftlink
//!
//! Every fallible operation returns [`CraftError`], so callers can match a
//! single failure category broadly or pick out one variant.

use thiserror::Error;

/// Result type alias using CraftError
pub type Result<T> = std::result::Result<T, CraftError>;

/// Message used when the server reports failure without an error string
pub const UNKNOWN_SERVER_ERROR: &str = "Unknown error";

/// Unified error type for craftlink operations
#[derive(Debug, Error)]
pub enum CraftError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Host unreachable, connection refused/reset, timeout, or the peer
    /// closed the stream before a full response line arrived.
    #[error("Connection error: {0}")]
    Connection(String),

    // -------------------------------------------------------------------------
    // Server-Reported Errors
    // -------------------------------------------------------------------------
    /// The server rejected the call because of the token.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Any other failure reported by the server.
    #[error("Command error: {0}")]
    Command(String),

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    /// The response line was not valid JSON, or the payload did not have the
    /// shape the operation expects.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Client-Side Validation
    // -------------------------------------------------------------------------
    #[error("Invalid block grid: {0}")]
    InvalidGrid(String),
}

impl CraftError {
    pub fn is_connection(&self) -> bool {
        matches!(self, CraftError::Connection(_))
    }

    pub fn is_authentication(&self) -> bool {
        matches!(self, CraftError::Authentication(_))
    }

    pub fn is_command(&self) -> bool {
        matches!(self, CraftError::Command(_))
    }

    /// The server's error text, verbatim, for server-reported failures
    pub fn server_message(&self) -> Option<&str> {
        match self {
            CraftError::Authentication(msg) | CraftError::Command(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Turn a server-reported error message into a typed failure.
///
/// The wire protocol carries no error code, so authentication failures are
/// recognised by the substring "token" (any case) in the message. This is the
/// only place that rule lives; an item id such as `trial_token` in an unrelated
/// error will also be classified as an authentication failure.
pub fn classify_failure(message: impl Into<String>) -> CraftError {
    let message = message.into();
    if message.to_lowercase().contains("token") {
        CraftError::Authentication(message)
    } else {
        CraftError::Command(message)
    }
}
