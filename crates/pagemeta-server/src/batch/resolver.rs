//! Cache-backed, concurrent batch resolution.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use pagemeta_core::extract;
use pagemeta_fetch::PageSource;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::batch::outcome::{BatchError, BatchResponse, FetchOutcome};
use crate::cache::MetadataCache;
use crate::metrics::batch::{record_batch, record_fetch, record_task_failure};

/// Configuracion del resolver.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Maximo de fetches en vuelo por batch. `None` despacha todo de una vez.
    pub max_concurrency: Option<NonZeroUsize>,
}

/// Resolves batches of URLs to page metadata.
///
/// Cache hits are answered directly. Every miss is fetched in its own tokio
/// task, extracted, written back to the cache and merged into the response
/// as it completes. One URL failing never fails the batch.
///
/// # Examples
///
/// ```ignore
/// let resolver = BatchResolver::new(cache, Arc::new(HttpPageSource::with_defaults()?));
/// let response = resolver
///     .resolve_batch(&["https://example.com".to_string()])
///     .await;
/// ```
#[derive(Clone)]
pub struct BatchResolver {
    cache: MetadataCache,
    source: Arc<dyn PageSource>,
    config: BatchConfig,
}

impl BatchResolver {
    /// Creates a resolver with unbounded fan-out.
    pub fn new(cache: MetadataCache, source: Arc<dyn PageSource>) -> Self {
        Self::with_config(cache, source, BatchConfig::default())
    }

    /// Creates a resolver with the given configuration.
    pub fn with_config(
        cache: MetadataCache,
        source: Arc<dyn PageSource>,
        config: BatchConfig,
    ) -> Self {
        Self {
            cache,
            source,
            config,
        }
    }

    /// Returns the shared cache.
    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Returns the configuration.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Resolves every URL in `urls`.
    ///
    /// The whole batch is checked against the cache before anything is
    /// dispatched, so two occurrences of an uncached URL are both fetched.
    /// Hits are merged first, then fetch outcomes in completion order.
    pub async fn resolve_batch(&self, urls: &[String]) -> BatchResponse {
        let start = Instant::now();
        let mut response = BatchResponse::for_urls(urls);

        let mut misses = Vec::new();
        let mut hits = 0usize;
        for url in urls {
            match self.cache.get(url) {
                Some(meta) => {
                    hits += 1;
                    debug!(url = %url, "Cache hit");
                    response.apply(FetchOutcome::Success {
                        url: url.clone(),
                        meta,
                    });
                },
                None => misses.push(url.clone()),
            }
        }

        debug!(
            urls = urls.len(),
            hits,
            misses = misses.len(),
            "Batch classified"
        );

        let limiter = self
            .config
            .max_concurrency
            .map(|max| Arc::new(Semaphore::new(max.get())));

        let mut tasks = JoinSet::new();
        let mut in_flight = HashMap::with_capacity(misses.len());

        for url in misses {
            let source = Arc::clone(&self.source);
            let cache = self.cache.clone();
            let limiter = limiter.clone();
            let span = info_span!("fetch", url = %url);
            let task_url = url.clone();

            let handle = tasks.spawn(
                async move {
                    // Semaphore nunca se cierra: acquire solo falla si se cerrara
                    let _permit = match limiter {
                        Some(limiter) => limiter.acquire_owned().await.ok(),
                        None => None,
                    };
                    resolve_one(source.as_ref(), &cache, task_url).await
                }
                .instrument(span),
            );
            in_flight.insert(handle.id(), url);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, outcome)) => {
                    in_flight.remove(&id);
                    response.apply(outcome);
                },
                Err(join_error) => {
                    let Some(url) = in_flight.remove(&join_error.id()) else {
                        continue;
                    };
                    error!(url = %url, error = %join_error, "Fetch task failed");
                    record_task_failure();
                    response.apply(FetchOutcome::Failure {
                        url,
                        error: BatchError::TaskFailed(join_error.to_string()),
                    });
                },
            }
        }

        record_batch(urls.len(), start.elapsed());
        info!(
            urls = response.len(),
            succeeded = response.success_count(),
            failed = response.failure_count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Batch resolved"
        );

        response
    }
}

/// Fetches, extracts and caches a single URL.
async fn resolve_one(source: &dyn PageSource, cache: &MetadataCache, url: String) -> FetchOutcome {
    let start = Instant::now();

    match source.fetch(&url).await {
        Ok(document) => {
            let meta = Arc::new(extract(&document));
            cache.set(url.clone(), Arc::clone(&meta));
            record_fetch("success", start.elapsed());
            if document.is_success() {
                info!(status = document.status(), "Metadata extracted");
            } else {
                info!(status = document.status(), "Metadata extracted from non-success response");
            }
            FetchOutcome::Success { url, meta }
        },
        Err(e) => {
            record_fetch("failure", start.elapsed());
            warn!(error = %e, kind = e.kind(), "Failed to fetch page");
            FetchOutcome::Failure {
                url,
                error: e.into(),
            }
        },
    }
}

impl std::fmt::Debug for BatchResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchResolver")
            .field("source", &self.source.name())
            .field("config", &self.config)
            .finish()
    }
}
