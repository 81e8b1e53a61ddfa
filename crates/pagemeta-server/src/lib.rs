//! # pagemeta Server
//!
//! HTTP service that resolves batches of URLs to page metadata (title,
//! description and Open Graph tags).
//!
//! Each batch is checked against a process-wide TTL cache; misses are
//! fetched concurrently, one task per URL, and merged into a single
//! `{url: meta | null}` response. A failing URL yields `null` without
//! affecting the others. A background sweep reclaims expired entries.
//!
//! ## Modules
//!
//! - [`batch`]: fan-out/fan-in resolution of a batch
//! - [`cache`]: TTL cache, injectable clock, sweep scheduler
//! - [`settings`]: layered configuration
//! - [`server`]: axum router and server loop

pub mod batch;
pub mod cache;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;
pub mod settings;
pub mod state;

pub use batch::{BatchConfig, BatchError, BatchResolver, BatchResponse, FetchOutcome};
pub use cache::{CacheConfig, Clock, ManualClock, MetadataCache, SweepHandle, SystemClock};
pub use error::AppError;
pub use metrics::init_metrics;
pub use server::{create_router, create_router_with_state, run_server_with_state};
pub use settings::{Settings, SettingsError};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
