// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Substatus Providers
//!
//! One adapter per debrid service, plus the aggregation engine.
//!
//! Each adapter turns a credential into a normalized
//! [`substatus_core::ProviderStatus`] and **never** raises: every failure
//! becomes a status record with the error flag set, so one broken provider
//! cannot disturb its siblings. The [`Aggregator`] fans out across the
//! enabled adapters concurrently, waits for all of them, and memoizes the
//! merged sequence in a TTL cache keyed by credential fingerprint.
//!
//! Adding a provider means adding a [`substatus_core::ProviderKind`]
//! variant, an adapter module, and a registry row.

pub mod adapter;
pub mod aggregate;
pub mod registry;

mod alldebrid;
mod debridlink;
mod premiumize;
mod realdebrid;
mod torbox;

pub use adapter::fetch_status;
pub use aggregate::Aggregator;
pub use registry::{ProviderDescriptor, ProviderRegistry};
