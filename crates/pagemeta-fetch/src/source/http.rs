//! HTTP page source implementation.

use async_trait::async_trait;
use pagemeta_core::RawDocument;
use reqwest::{Client, redirect::Policy};
use tracing::{debug, warn};
use url::Url;

use crate::config::HttpSourceConfig;
use crate::error::FetchError;
use crate::source::PageSource;

/// A page source that retrieves documents over HTTP(S).
///
/// Non-2xx responses are logged and returned as documents; only transport
/// failures are errors.
pub struct HttpPageSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpPageSource {
    /// Creates a new HTTP source.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::InvalidConfig` if the underlying client cannot be
    /// built.
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent())
            .redirect(Policy::limited(config.max_redirects()))
            .danger_accept_invalid_certs(config.accept_invalid_certs());

        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| FetchError::InvalidConfig(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Creates a source with default configuration.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(HttpSourceConfig::default())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    /// Checks that `url` is an absolute http or https URL.
    fn validate_url(url: &str) -> Result<Url, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::invalid_url(url, e.to_string()))?;

        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(FetchError::invalid_url(
                url,
                format!("unsupported scheme: {}", other),
            )),
        }
    }

    fn map_send_error(&self, url: &str, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
                seconds: self.config.timeout().map(|t| t.as_secs()).unwrap_or(0),
            }
        } else {
            FetchError::request(url, error.to_string())
        }
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, url: &str) -> Result<RawDocument, FetchError> {
        let target = Self::validate_url(url)?;

        debug!(url = %url, "Fetching page");

        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| self.map_send_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Non-success response status");
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_error(url, e)
            } else {
                FetchError::body(url, e.to_string())
            }
        })?;

        debug!(url = %url, status = status.as_u16(), bytes = body.len(), "Page fetched");

        Ok(RawDocument::new(url, status.as_u16(), body))
    }

    fn name(&self) -> &str {
        "http"
    }
}

impl std::fmt::Debug for HttpPageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageSource")
            .field("config", &self.config)
            .finish()
    }
}
