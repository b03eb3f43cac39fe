//! Request Deduplication Module
//!
//! `SingleFlight` makes sure that, within one process, a given key is loaded
//! by at most one task at a time. Everyone else asking for that key while the
//! load runs gets the same outcome, error included.
//!
//! Tracking state is held under a short mutex that is never kept across the
//! load itself, so unrelated keys load in parallel.

pub mod flight;

pub use flight::SingleFlight;
