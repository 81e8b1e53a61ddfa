//! Server settings loaded from defaults, an optional file and the environment.

use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use pagemeta_fetch::{FetchError, HttpSourceConfig};
use serde::Deserialize;

use crate::batch::BatchConfig;
use crate::cache::CacheConfig;

/// Variable que apunta a un archivo de configuracion opcional.
pub const CONFIG_PATH_ENV: &str = "PAGEMETA_CONFIG";

/// Prefijo de las variables de entorno (`PAGEMETA_SERVER__PORT`, ...).
pub const ENV_PREFIX: &str = "PAGEMETA";

/// Errors raised while loading or validating settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A source could not be read or deserialized.
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but makes no sense.
    #[error("invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl SettingsError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub cache: CacheSettings,
    pub fetch: FetchSettings,
    pub batch: BatchSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub ttl_seconds: u64,
    pub sweep_interval_seconds: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        let defaults = CacheConfig::default();
        Self {
            ttl_seconds: defaults.ttl_seconds,
            sweep_interval_seconds: defaults.sweep_interval_seconds,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Timeout por fetch. `0` desactiva el timeout.
    pub timeout_seconds: u64,
    pub user_agent: String,
    pub max_redirects: usize,
    pub accept_invalid_certs: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: pagemeta_fetch::config::DEFAULT_USER_AGENT.to_string(),
            max_redirects: 10,
            accept_invalid_certs: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Fetches en vuelo por batch. Sin valor no hay limite.
    pub max_concurrency: Option<usize>,
    /// URLs aceptadas por request. Sin valor no hay limite.
    pub max_urls: Option<usize>,
}

impl Settings {
    /// Loads settings from the process environment.
    ///
    /// Sources, lowest priority first: built-in defaults, the file named by
    /// `PAGEMETA_CONFIG` (if set), then `PAGEMETA_*` variables.
    pub fn load() -> Result<Self, SettingsError> {
        let file = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::from_sources(file.as_deref(), environment())
    }

    /// Loads settings from an optional file and an environment source.
    pub fn from_sources(file: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let settings: Settings = builder.add_source(env).build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server.host.trim().is_empty() {
            return Err(SettingsError::invalid("server.host", "must not be empty"));
        }
        if self.cache.ttl_seconds == 0 {
            return Err(SettingsError::invalid("cache.ttl_seconds", "must be greater than 0"));
        }
        if self.cache.sweep_interval_seconds == 0 {
            return Err(SettingsError::invalid(
                "cache.sweep_interval_seconds",
                "must be greater than 0",
            ));
        }
        if self.batch.max_concurrency == Some(0) {
            return Err(SettingsError::invalid(
                "batch.max_concurrency",
                "must be greater than 0 when set",
            ));
        }
        if self.batch.max_urls == Some(0) {
            return Err(SettingsError::invalid("batch.max_urls", "must be greater than 0 when set"));
        }
        Ok(())
    }

    /// Address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, SettingsError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| SettingsError::invalid("server.host", e.to_string()))
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl_seconds: self.cache.ttl_seconds,
            sweep_interval_seconds: self.cache.sweep_interval_seconds,
        }
    }

    pub fn batch_config(&self) -> BatchConfig {
        BatchConfig {
            max_concurrency: self.batch.max_concurrency.and_then(NonZeroUsize::new),
        }
    }

    /// Builds the HTTP page source configuration.
    pub fn http_source_config(&self) -> Result<HttpSourceConfig, FetchError> {
        let builder = HttpSourceConfig::builder()
            .user_agent(&self.fetch.user_agent)
            .max_redirects(self.fetch.max_redirects)
            .accept_invalid_certs(self.fetch.accept_invalid_certs);

        let builder = match self.fetch.timeout_seconds {
            0 => builder.no_timeout(),
            secs => builder.timeout(Duration::from_secs(secs)),
        };

        builder.build()
    }

    /// Version string logged at startup.
    pub fn version() -> String {
        format!(
            "server {} / core {}",
            env!("CARGO_PKG_VERSION"),
            pagemeta_core::version()
        )
    }
}

/// Environment source for `PAGEMETA_SECTION__KEY` variables.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
