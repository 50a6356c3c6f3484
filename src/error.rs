//! Error types for the query API client.
//!
//! Every failure mode of a page fetch collapses into [`ApiError`]; the
//! controller shows [`ApiError::user_message`] in the error banner and leaves
//! retrying to the operator.

use thiserror::Error;

/// A page fetch failure.
///
/// Transport errors, non-2xx statuses, and undecodable bodies are all
/// treated uniformly as fetch failures: prior page state stays intact and no
/// automatic retry happens.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, TLS, timeout).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {status}")]
    Status { status: u16 },

    /// The response body was not the expected page shape.
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl ApiError {
    /// A message fit for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Request(_) => {
                "Unable to reach the item database. Check your connection and try again."
                    .to_string()
            }
            ApiError::Status { status } => match *status {
                500..=599 => {
                    "The item database is experiencing issues. Please try again later.".to_string()
                }
                _ => format!("Failed to load items (HTTP {}). Please try again.", status),
            },
            ApiError::Malformed(_) => {
                "Received an invalid response from the server. Please try again.".to_string()
            }
        }
    }
}
