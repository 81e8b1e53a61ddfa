//! pagemeta server binary.

use std::sync::Arc;

use anyhow::Context;
use pagemeta_fetch::HttpPageSource;
use pagemeta_server::{
    AppState, BatchResolver, MetadataCache, Settings, init_metrics, run_server_with_state,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let addr = settings.socket_addr()?;

    tracing::info!("Starting pagemeta ({})", Settings::version());
    tracing::info!(
        ttl_seconds = settings.cache.ttl_seconds,
        sweep_interval_seconds = settings.cache.sweep_interval_seconds,
        "Cache configured"
    );
    tracing::info!(
        timeout_seconds = settings.fetch.timeout_seconds,
        max_concurrency = ?settings.batch.max_concurrency,
        max_urls = ?settings.batch.max_urls,
        "Fetching configured"
    );

    let prometheus = init_metrics().context("failed to install metrics recorder")?;

    let source = HttpPageSource::new(settings.http_source_config()?)
        .context("failed to build HTTP page source")?;

    let cache = MetadataCache::new(settings.cache_config());
    // El sweep vive mientras viva el handle
    let sweeper = cache.start_sweeper();

    let resolver = BatchResolver::with_config(cache, Arc::new(source), settings.batch_config());
    let state = AppState::new(resolver).with_max_urls(settings.batch.max_urls);

    run_server_with_state(addr, state, prometheus).await?;

    sweeper.stop();
    tracing::info!(sweeps = sweeper.sweeps(), "Server stopped");

    Ok(())
}
