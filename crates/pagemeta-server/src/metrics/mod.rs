//! Metrics module for the pagemeta server.

pub mod batch;
pub mod cache;
pub mod http;
pub mod setup;

pub use cache::CacheMetrics;
pub use setup::init_metrics;
