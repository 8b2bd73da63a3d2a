// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Substatus Store
//!
//! TTL result cache for aggregated provider statuses.
//!
//! The cache is process-wide mutable state, constructed once and passed by
//! reference to the aggregator. Entries are keyed by credential fingerprint
//! and expire lazily: an entry past its TTL is treated as absent and evicted
//! on the next read of that key. Nothing survives a process restart.
//!
//! The clock is injectable so expiry is deterministic under test.

pub mod cache;
pub mod clock;

pub use cache::ResultCache;
pub use clock::{Clock, ManualClock, SystemClock};
