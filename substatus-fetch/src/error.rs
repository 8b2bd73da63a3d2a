//! Fetch error types.

use thiserror::Error;

/// Error type for HTTP operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed at the transport level.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint string could not be parsed as a URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Returns the message the adapters carry as a transport note.
    pub fn transport_message(&self) -> String {
        match self {
            Self::Http(e) => e.to_string(),
            Self::InvalidUrl(msg) => format!("invalid URL: {msg}"),
        }
    }
}
