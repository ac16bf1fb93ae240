// File: crates/sparkline-feed/src/error.rs
// Summary: Feed error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },

    #[error("{0}")]
    Other(String),
}

impl FeedError {
    /// Whether a retry might succeed. Malformed bodies will not improve.
    pub fn is_transient(&self) -> bool {
        match self {
            #[cfg(feature = "http")]
            FeedError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            FeedError::ServerError { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            FeedError::Other(_) => true,
            _ => false,
        }
    }
}
