use std::net::SocketAddr;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::handlers::{
    health::health_check,
    inspect::{inspect, preflight},
    invalidate::{cache_stats, invalidate_all, invalidate_entry, invalidate_pattern},
    metrics::metrics_handler,
};
use crate::middleware::{LoggingLayer, RequestIdLayer};
use crate::state::AppState;

/// CORS abierto: cualquier origen, header y metodo.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods(Any)
}

/// Routes served from the application state.
fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(inspect).options(preflight))
        .route("/health", get(health_check))
        // Cache administration routes
        .route("/cache", delete(invalidate_all))
        .route("/cache/entry", delete(invalidate_entry))
        .route("/cache/pattern", delete(invalidate_pattern))
        .route("/cache/stats", get(cache_stats))
        .with_state(state)
}

/// Creates a router with the given application state and metrics handle.
pub fn create_router_with_state(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Router for metrics endpoint (different state)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    Router::new()
        .merge(app_router(state))
        .merge(metrics_router)
        .layer(middleware::from_fn(
            crate::metrics::http::http_metrics_middleware,
        ))
        .layer(cors_layer())
        .layer(
            ServiceBuilder::new()
                .layer(RequestIdLayer)
                .layer(LoggingLayer),
        )
}

/// Creates a router without the `/metrics` endpoint.
///
/// Installing a Prometheus recorder is process-global, so tests use this one.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(app_router(state))
        .layer(cors_layer())
        .layer(
            ServiceBuilder::new()
                .layer(RequestIdLayer)
                .layer(LoggingLayer),
        )
}

/// Runs the server with the given state and metrics handle until a shutdown signal.
pub async fn run_server_with_state(
    addr: SocketAddr,
    state: AppState,
    prometheus_handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = create_router_with_state(state, prometheus_handle);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
