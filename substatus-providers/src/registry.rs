//! Provider registry.
//!
//! Static table of the known providers: default endpoint, default auth
//! scheme, and the query parameter the secret is sent as under the
//! query-parameter scheme.

use substatus_core::{AuthScheme, Credential, ProviderKind};

use crate::{alldebrid, debridlink, premiumize, realdebrid, torbox};

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Static configuration for one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderDescriptor {
    /// The provider this descriptor describes.
    pub kind: ProviderKind,
    /// Default account-info endpoint.
    pub endpoint: &'static str,
    /// Default auth scheme against the live service.
    pub auth_scheme: AuthScheme,
    /// Query parameter the secret is sent as under the query scheme.
    pub query_param: &'static str,
}

impl ProviderDescriptor {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        self.kind.display_name()
    }

    /// Builds a credential carrying this provider's default auth scheme.
    pub fn credential(&self, secret: impl Into<String>) -> Credential {
        Credential::new(secret).with_auth_scheme(self.auth_scheme)
    }
}

// ============================================================================
// Static Registry
// ============================================================================

/// All known providers, in canonical order.
static DESCRIPTORS: [ProviderDescriptor; 5] = [
    ProviderDescriptor {
        kind: ProviderKind::RealDebrid,
        endpoint: realdebrid::ENDPOINT,
        auth_scheme: AuthScheme::Bearer,
        query_param: realdebrid::QUERY_PARAM,
    },
    ProviderDescriptor {
        kind: ProviderKind::AllDebrid,
        endpoint: alldebrid::ENDPOINT,
        auth_scheme: AuthScheme::Bearer,
        query_param: alldebrid::QUERY_PARAM,
    },
    ProviderDescriptor {
        kind: ProviderKind::Premiumize,
        endpoint: premiumize::ENDPOINT,
        auth_scheme: AuthScheme::Query,
        query_param: premiumize::QUERY_PARAM,
    },
    ProviderDescriptor {
        kind: ProviderKind::TorBox,
        endpoint: torbox::ENDPOINT,
        auth_scheme: AuthScheme::Bearer,
        query_param: torbox::QUERY_PARAM,
    },
    ProviderDescriptor {
        kind: ProviderKind::DebridLink,
        endpoint: debridlink::ENDPOINT,
        auth_scheme: AuthScheme::Bearer,
        query_param: debridlink::QUERY_PARAM,
    },
];

/// Registry of all provider descriptors.
pub struct ProviderRegistry;

impl ProviderRegistry {
    /// Returns all provider descriptors.
    pub fn all() -> &'static [ProviderDescriptor] {
        &DESCRIPTORS
    }

    /// Gets a provider descriptor by kind.
    pub fn get(kind: ProviderKind) -> &'static ProviderDescriptor {
        // The table covers the closed enum, so lookup cannot miss.
        DESCRIPTORS
            .iter()
            .find(|d| d.kind == kind)
            .unwrap_or(&DESCRIPTORS[0])
    }

    /// Looks up a provider by CLI name.
    pub fn get_by_cli_name(name: &str) -> Option<&'static ProviderDescriptor> {
        DESCRIPTORS.iter().find(|d| d.kind.cli_name() == name)
    }

    /// Returns all provider kinds.
    pub fn kinds() -> Vec<ProviderKind> {
        DESCRIPTORS.iter().map(|d| d.kind).collect()
    }

    /// Returns the number of registered providers.
    pub fn count() -> usize {
        DESCRIPTORS.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
