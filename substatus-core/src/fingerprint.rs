//! Credential fingerprinting.
//!
//! The fingerprint is a deterministic memoization key over the enabled
//! provider set and its credentials. It carries the redacted secret for
//! legibility plus a SHA-256 digest so every secret byte influences the key,
//! without the raw secret ever appearing in it. This is a cache key, not a
//! cryptographic commitment.

use ring::digest::{SHA256, digest};

use crate::models::ProviderRequest;

/// Derives the cache key for one set of provider requests.
///
/// Identical inputs produce identical keys. Any change to a secret byte, an
/// auth scheme, an endpoint override, or the enabled set changes the key.
pub fn fingerprint(requests: &[ProviderRequest]) -> String {
    let enabled: Vec<&str> = requests.iter().map(|r| r.provider.cli_name()).collect();

    let mut parts = Vec::with_capacity(requests.len() + 1);
    parts.push(enabled.join(","));

    for request in requests {
        let cred = &request.credential;
        parts.push(format!(
            "{}:{}:{}:{}:{}",
            request.provider.cli_name(),
            cred.redacted(),
            secret_digest(&cred.secret),
            cred.auth_scheme.as_str(),
            cred.endpoint.as_deref().unwrap_or("")
        ));
    }

    parts.join("|")
}

/// Hex-encoded SHA-256 digest of the raw secret, truncated to 16 bytes.
fn secret_digest(secret: &str) -> String {
    let hash = digest(&SHA256, secret.as_bytes());
    hash.as_ref()
        .iter()
        .take(16)
        .map(|b| format!("{b:02x}"))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
