//! Page source trait definition.

use async_trait::async_trait;
use pagemeta_core::RawDocument;

use crate::error::FetchError;

/// A source of raw page documents.
///
/// This trait abstracts over how a URL is retrieved so the batch resolver can
/// be exercised against in-memory sources in tests.
///
/// # Implementors
///
/// - `HttpPageSource` - Fetches pages over HTTP(S) with `reqwest`
///
/// # Example
///
/// ```ignore
/// use pagemeta_fetch::{PageSource, FetchError};
/// use pagemeta_core::RawDocument;
///
/// struct MySource;
///
/// #[async_trait]
/// impl PageSource for MySource {
///     async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
///         Ok(RawDocument::new(url, 200, "<title>hi</title>"))
///     }
///
///     fn name(&self) -> &str {
///         "my-source"
///     }
/// }
/// ```
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Retrieves the document at `url`.
    ///
    /// # Errors
    ///
    /// - `FetchError::InvalidUrl` if the URL cannot be requested at all
    /// - `FetchError::Request` if the connection fails
    /// - `FetchError::Timeout` if the source gives up waiting
    /// - `FetchError::Body` if the response body cannot be read
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError>;

    /// Returns the name of this source.
    ///
    /// This is used for logging and identification purposes.
    fn name(&self) -> &str;
}
