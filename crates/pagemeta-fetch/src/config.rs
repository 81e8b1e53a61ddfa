//! HTTP source configuration.

use std::time::Duration;

use crate::error::FetchError;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("pagemeta/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`HttpPageSource`](crate::HttpPageSource).
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Per-request timeout. `None` waits forever.
    timeout: Option<Duration>,

    /// User agent header value.
    user_agent: String,

    /// Maximum number of redirects to follow.
    max_redirects: usize,

    /// Whether to accept invalid TLS certificates (not recommended).
    accept_invalid_certs: bool,
}

fn default_timeout() -> Option<Duration> {
    Some(Duration::from_secs(30))
}

fn default_max_redirects() -> usize {
    10
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: default_max_redirects(),
            accept_invalid_certs: false,
        }
    }
}

impl HttpSourceConfig {
    /// Creates a new builder for HttpSourceConfig.
    pub fn builder() -> HttpSourceConfigBuilder {
        HttpSourceConfigBuilder::default()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns the user agent.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Returns the maximum number of redirects.
    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }

    /// Returns whether invalid certificates are accepted.
    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}

/// Builder for HttpSourceConfig.
#[derive(Debug, Default)]
pub struct HttpSourceConfigBuilder {
    timeout: Option<Option<Duration>>,
    user_agent: Option<String>,
    max_redirects: Option<usize>,
    accept_invalid_certs: bool,
}

impl HttpSourceConfigBuilder {
    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(Some(timeout));
        self
    }

    /// Disables the per-request timeout.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = Some(None);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Sets the maximum number of redirects to follow.
    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    /// Accepts invalid TLS certificates.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the user agent is blank or the timeout is zero.
    pub fn build(self) -> Result<HttpSourceConfig, FetchError> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        if user_agent.trim().is_empty() {
            return Err(FetchError::InvalidConfig(
                "user agent cannot be empty".to_string(),
            ));
        }

        let timeout = self.timeout.unwrap_or_else(default_timeout);
        if timeout.is_some_and(|t| t.is_zero()) {
            return Err(FetchError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(HttpSourceConfig {
            timeout,
            user_agent,
            max_redirects: self.max_redirects.unwrap_or_else(default_max_redirects),
            accept_invalid_certs: self.accept_invalid_certs,
        })
    }
}
