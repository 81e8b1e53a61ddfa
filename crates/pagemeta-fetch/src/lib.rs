//! # pagemeta Fetch
//!
//! Page sources for the pagemeta server.
//!
//! This crate provides the [`PageSource`] abstraction the batch resolver
//! fetches through, and an HTTP implementation built on `reqwest`.
//!
//! ## Features
//!
//! - Async trait-based source abstraction, easy to mock in tests
//! - Per-request timeout, redirect limit and user agent configuration
//! - Non-2xx responses are returned (and logged) rather than failed
//!
//! ## Example
//!
//! ```ignore
//! use pagemeta_fetch::{HttpPageSource, HttpSourceConfig, PageSource};
//!
//! let config = HttpSourceConfig::builder()
//!     .timeout(std::time::Duration::from_secs(10))
//!     .build()?;
//!
//! let source = HttpPageSource::new(config)?;
//! let document = source.fetch("https://example.com").await?;
//! ```

pub mod config;
pub mod error;
pub mod source;

// Re-exports
pub use config::{HttpSourceConfig, HttpSourceConfigBuilder};
pub use error::FetchError;
pub use source::{HttpPageSource, PageSource};

// Re-export pagemeta_core for consumers
pub use pagemeta_core;
