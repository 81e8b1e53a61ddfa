//! Per-URL outcomes and the merged batch response.

use std::sync::Arc;

use indexmap::IndexMap;
use pagemeta_core::PageMeta;
use pagemeta_fetch::FetchError;
use serde::Serialize;

/// Why a single URL of a batch could not be resolved.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BatchError {
    /// The page source failed to retrieve the URL.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The unit of work resolving the URL panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    TaskFailed(String),
}

impl BatchError {
    /// Short, stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Fetch(e) => e.kind(),
            Self::TaskFailed(_) => "task_failed",
        }
    }
}

/// Result of resolving one URL, produced once per URL occurrence.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// Metadata was found in the cache or freshly extracted.
    Success { url: String, meta: Arc<PageMeta> },
    /// The URL could not be resolved.
    Failure { url: String, error: BatchError },
}

impl FetchOutcome {
    /// Returns the URL this outcome belongs to.
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    /// Returns true for a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Mapping from URL to metadata, or `None` when the URL failed.
///
/// Serializes as `{"<url>": {...} | null}`. Keys keep the order of each URL's
/// first occurrence in the request. When a URL appears more than once, the
/// outcome applied last replaces earlier ones; with concurrent fetches that
/// order is not deterministic.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct BatchResponse {
    entries: IndexMap<String, Option<Arc<PageMeta>>>,
}

impl BatchResponse {
    /// Creates a response with one unresolved slot per distinct URL, in
    /// request order.
    pub(crate) fn for_urls(urls: &[String]) -> Self {
        let mut entries = IndexMap::with_capacity(urls.len());
        for url in urls {
            entries.entry(url.clone()).or_insert(None);
        }
        Self { entries }
    }

    /// Applies an outcome, replacing whatever the URL held before.
    pub(crate) fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Success { url, meta } => {
                self.entries.insert(url, Some(meta));
            },
            FetchOutcome::Failure { url, .. } => {
                self.entries.insert(url, None);
            },
        }
    }

    /// Returns the entry for `url`: `None` if the URL was not requested,
    /// `Some(None)` if it failed.
    pub fn get(&self, url: &str) -> Option<Option<&PageMeta>> {
        self.entries.get(url).map(|meta| meta.as_deref())
    }

    /// Returns true if the URL was requested and resolved successfully.
    pub fn is_success(&self, url: &str) -> bool {
        matches!(self.get(url), Some(Some(_)))
    }

    /// Number of distinct URLs in the response.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the response has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of URLs that resolved to metadata.
    pub fn success_count(&self) -> usize {
        self.entries.values().filter(|meta| meta.is_some()).count()
    }

    /// Number of URLs that failed.
    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Iterates over `(url, metadata)` pairs in response order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&PageMeta>)> {
        self.entries
            .iter()
            .map(|(url, meta)| (url.as_str(), meta.as_deref()))
    }
}
