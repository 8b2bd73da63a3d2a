//! Per-provider failure taxonomy.
//!
//! Adapter failures never escalate: each one is captured as data inside a
//! [`crate::ProviderStatus`] with the error flag set. The `Display` strings
//! here are the note strings callers see, so they are stable.

use thiserror::Error;

/// Reasons a single provider lookup can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderFailure {
    /// The secret was empty or absent before any call was attempted.
    #[error("missing token")]
    CredentialMissing,

    /// Network-level error reaching the endpoint (timeout, DNS, reset).
    #[error("network {0}")]
    Transport(String),

    /// The remote returned a non-success status code.
    #[error("HTTP {0}")]
    UnexpectedStatus(u16),

    /// The remote returned success but the body fails the minimal shape check.
    #[error("bad response")]
    MalformedResponse,

    /// The remote succeeded but neither confirms nor denies active status.
    #[error("status unknown")]
    AmbiguousState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_strings() {
        assert_eq!(ProviderFailure::CredentialMissing.to_string(), "missing token");
        assert_eq!(
            ProviderFailure::Transport("connection reset".to_string()).to_string(),
            "network connection reset"
        );
        assert_eq!(ProviderFailure::UnexpectedStatus(503).to_string(), "HTTP 503");
        assert_eq!(ProviderFailure::MalformedResponse.to_string(), "bad response");
        assert_eq!(ProviderFailure::AmbiguousState.to_string(), "status unknown");
    }
}
