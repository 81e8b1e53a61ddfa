//! Batch resolution of URLs to page metadata.

pub mod outcome;
pub mod resolver;

pub use outcome::{BatchError, BatchResponse, FetchOutcome};
pub use resolver::{BatchConfig, BatchResolver};
