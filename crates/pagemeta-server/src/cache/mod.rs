//! Cache module for the pagemeta server.
//!
//! This module provides the process-wide metadata cache: TTL-based
//! expiration checked on every read, a background sweep that reclaims
//! expired entries, pattern-based invalidation, and metrics.

pub mod clock;
mod invalidation;
pub mod metadata_cache;
pub mod sweeper;

// Re-exports
pub use clock::{Clock, ManualClock, SystemClock};
pub use metadata_cache::{CacheConfig, MetadataCache};
pub use sweeper::{SweepHandle, SweepScheduler};
