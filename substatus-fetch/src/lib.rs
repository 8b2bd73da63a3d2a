// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Substatus Fetch
//!
//! HTTP client layer for provider account lookups.
//!
//! This crate wraps `reqwest` with the two authorization styles the debrid
//! services use (bearer header and query parameter) plus request tracing.
//! Converting transport failures into the per-provider failure taxonomy is
//! the adapters' job; this layer only reports what happened on the wire.

pub mod client;
pub mod error;

pub use client::HttpClient;
pub use error::FetchError;
