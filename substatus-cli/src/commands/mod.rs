//! Command implementations.

pub mod providers;
pub mod status;
