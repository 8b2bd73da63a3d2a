//! Domain models for Substatus.

pub mod provider;
pub mod status;

pub use provider::{AuthScheme, Credential, ProviderKind, ProviderRequest};
pub use status::{AggregationResult, PremiumState, ProviderStatus, Severity};
