//! Provider and credential types.
//!
//! This module contains:
//! - [`ProviderKind`] - Enum of the supported debrid services
//! - [`AuthScheme`] - How the secret is sent to the endpoint
//! - [`Credential`] - One secret plus optional per-provider options
//! - [`ProviderRequest`] - One enabled provider with its credential

use serde::{Deserialize, Serialize};

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported debrid service kinds.
///
/// This is a closed set: adding a provider means adding a variant here,
/// an adapter module, and a registry row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Real-Debrid
    RealDebrid,
    /// AllDebrid
    AllDebrid,
    /// Premiumize
    Premiumize,
    /// TorBox
    TorBox,
    /// Debrid-Link
    DebridLink,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::RealDebrid => "Real-Debrid",
            Self::AllDebrid => "AllDebrid",
            Self::Premiumize => "Premiumize",
            Self::TorBox => "TorBox",
            Self::DebridLink => "Debrid-Link",
        }
    }

    /// Returns the CLI name for this provider (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::RealDebrid => "realdebrid",
            Self::AllDebrid => "alldebrid",
            Self::Premiumize => "premiumize",
            Self::TorBox => "torbox",
            Self::DebridLink => "debridlink",
        }
    }

    /// Returns all provider kinds in canonical order.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::RealDebrid,
            Self::AllDebrid,
            Self::Premiumize,
            Self::TorBox,
            Self::DebridLink,
        ]
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Auth Scheme
// ============================================================================

/// How the secret is presented to the account endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// `Authorization: Bearer <secret>` header.
    #[default]
    Bearer,
    /// Secret appended as a query parameter.
    Query,
}

impl AuthScheme {
    /// Returns the lowercase name used in cache keys and CLI flags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bearer => "bearer",
            Self::Query => "query",
        }
    }

    /// Parses a scheme name, case-insensitively. Unknown names fall back
    /// to `Bearer`, matching the lenient handling of the config surface.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("query") {
            Self::Query
        } else {
            Self::Bearer
        }
    }
}

// ============================================================================
// Credential
// ============================================================================

/// One provider secret plus optional per-provider auxiliary options.
///
/// Supplied per request and never persisted. The raw secret must not appear
/// in fingerprints or logs; use [`Credential::redacted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// The token or API key.
    #[serde(skip_serializing)]
    pub secret: String,
    /// How the secret is sent to the endpoint.
    #[serde(default)]
    pub auth_scheme: AuthScheme,
    /// Endpoint override, used verbatim when supplied.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Credential {
    /// Creates a credential with the default bearer scheme.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            auth_scheme: AuthScheme::Bearer,
            endpoint: None,
        }
    }

    /// Sets the auth scheme.
    pub fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Sets an endpoint override.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns true when the secret is empty or whitespace.
    pub fn is_missing(&self) -> bool {
        self.secret.trim().is_empty()
    }

    /// Returns the redacted form of the secret.
    pub fn redacted(&self) -> String {
        redact(&self.secret)
    }
}

/// Redacts a secret to its first and last four characters.
///
/// Empty input renders as `(none)` so a blank slot is still visible in
/// fingerprints and diagnostics.
pub fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return "(none)".to_string();
    }
    let chars: Vec<char> = secret.chars().collect();
    let head: String = chars.iter().take(4).collect();
    let tail: String = chars.iter().rev().take(4).rev().collect();
    format!("{head}\u{2026}{tail}")
}

// ============================================================================
// Provider Request
// ============================================================================

/// One enabled provider paired with the credential to use for it.
///
/// The order of requests given to the aggregator is the order statuses come
/// back in, independent of completion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// Which provider to query.
    pub provider: ProviderKind,
    /// The credential for that provider.
    pub credential: Credential,
}

impl ProviderRequest {
    /// Creates a new request.
    pub fn new(provider: ProviderKind, credential: Credential) -> Self {
        Self {
            provider,
            credential,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
