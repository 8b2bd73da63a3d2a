// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Substatus Core
//!
//! Core types and pure logic for the Substatus engine.
//!
//! This crate provides the foundational pieces used across all other
//! Substatus crates:
//!
//! - Domain models (providers, credentials, subscription status)
//! - The per-provider failure taxonomy
//! - Time-remaining calculation (epoch, duration, and date-string modes)
//! - Credential fingerprinting for cache keys
//! - Severity classification for presentation
//!
//! ## Key Types
//!
//! - [`ProviderKind`] - Enum of the supported debrid services
//! - [`Credential`] - One secret plus per-provider auth options
//! - [`ProviderStatus`] - Normalized subscription status record
//! - [`PremiumState`] - Tri-state active/inactive/unknown
//! - [`ProviderFailure`] - Failure taxonomy captured as data
//! - [`Severity`] - Expired/Critical/Warning/OK buckets
//! - [`AggregationResult`] - Merged output of one fan-out

pub mod error;
pub mod fingerprint;
pub mod models;
pub mod time;

// Re-export error types
pub use error::ProviderFailure;

// Re-export all model types
pub use models::{
    // Provider types
    AuthScheme,
    Credential,
    ProviderKind,
    ProviderRequest,
    // Status types
    AggregationResult,
    PremiumState,
    ProviderStatus,
    Severity,
};

// Re-export helpers
pub use fingerprint::fingerprint;
pub use models::provider::redact;
pub use time::TimeRemaining;
