//! Error types for the Vibe server client.

use std::time::Duration;
use thiserror::Error;
use vibe_core::VibeError;

/// Errors that can occur when talking to a Vibe progress server.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),

    /// Request exceeded the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl ServerClientError {
    /// Classify a transport error from `reqwest`
    pub(crate) fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_connect() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<ServerClientError> for VibeError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::InvalidUrl(msg) => VibeError::invalid_input(msg),
            ServerClientError::Timeout(after) => VibeError::Timeout(after),
            other => VibeError::network(other.to_string()),
        }
    }
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;
