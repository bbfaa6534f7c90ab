//! Error types for strata-fetch.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("max retries exceeded ({count} attempts): {reason}")]
    MaxRetriesExceeded { count: u32, reason: String },

    #[error("invalid JSON: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unexpected data format: expected array or object, got {found}")]
    UnexpectedShape { found: &'static str },
}

impl FetchError {
    /// Whether this failure came from the network layer rather than the body.
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            FetchError::Transport(_)
                | FetchError::HttpStatus { .. }
                | FetchError::MaxRetriesExceeded { .. }
        )
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self { FetchError::Decode(e) }
}

pub type Result<T> = std::result::Result<T, FetchError>;
