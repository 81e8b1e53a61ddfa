//! Application state.

use std::sync::Arc;

use pagemeta_fetch::PageSource;

use crate::batch::{BatchConfig, BatchResolver};
use crate::cache::MetadataCache;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Resolver de batches (incluye el cache compartido).
    resolver: BatchResolver,
    /// Limite de URLs por request.
    max_urls: Option<usize>,
}

impl AppState {
    /// Creates a new AppState around a resolver.
    pub fn new(resolver: BatchResolver) -> Self {
        Self {
            resolver,
            max_urls: None,
        }
    }

    /// Creates an AppState from a cache and a page source with default batch settings.
    pub fn from_source(cache: MetadataCache, source: Arc<dyn PageSource>) -> Self {
        Self::new(BatchResolver::with_config(cache, source, BatchConfig::default()))
    }

    /// Sets the maximum number of URLs accepted per request.
    pub fn with_max_urls(mut self, max_urls: Option<usize>) -> Self {
        self.max_urls = max_urls;
        self
    }

    /// Returns the batch resolver.
    pub fn resolver(&self) -> &BatchResolver {
        &self.resolver
    }

    /// Returns the shared metadata cache.
    pub fn cache(&self) -> &MetadataCache {
        self.resolver.cache()
    }

    /// Returns the per-request URL limit, if any.
    pub fn max_urls(&self) -> Option<usize> {
        self.max_urls
    }
}
