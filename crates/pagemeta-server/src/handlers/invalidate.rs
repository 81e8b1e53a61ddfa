//! Cache administration endpoint handlers.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;

/// Response para operaciones de invalidación.
#[derive(Debug, Serialize)]
pub struct InvalidateResponse {
    /// Número de entries invalidadas.
    pub invalidated: usize,
    /// Mensaje descriptivo.
    pub message: String,
}

/// Response de `GET /cache/stats`.
#[derive(Debug, Serialize)]
pub struct CacheStatsResponse {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

/// Query de `DELETE /cache/entry`.
#[derive(Debug, Deserialize)]
pub struct EntryQuery {
    pub url: Option<String>,
}

/// Query de `DELETE /cache/pattern`.
#[derive(Debug, Deserialize)]
pub struct PatternQuery {
    pub pattern: Option<String>,
}

fn required(value: Option<String>, name: &str) -> Result<String, AppError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::BadRequest(format!(
            "query parameter '{}' is required",
            name
        ))),
    }
}

/// DELETE /cache
/// Invalida toda la cache.
#[instrument(skip_all)]
pub async fn invalidate_all(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let count = state.cache().invalidate_all();

    tracing::info!(count = count, "All cache entries invalidated");

    Json(InvalidateResponse {
        invalidated: count,
        message: format!("Invalidated all {} cache entries", count),
    })
}

/// DELETE /cache/entry?url=...
/// Invalida la entry de una URL exacta.
#[instrument(skip_all)]
pub async fn invalidate_entry(
    State(state): State<AppState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<InvalidateResponse>, AppError> {
    let url = required(query.url, "url")?;
    let count = state.cache().invalidate_url(&url);

    Ok(Json(InvalidateResponse {
        invalidated: count,
        message: format!("Invalidated {} cache entries for '{}'", count, url),
    }))
}

/// DELETE /cache/pattern?pattern=...
/// Invalida las entries cuya URL coincide con un patrón glob.
#[instrument(skip_all)]
pub async fn invalidate_pattern(
    State(state): State<AppState>,
    Query(query): Query<PatternQuery>,
) -> Result<Json<InvalidateResponse>, AppError> {
    let pattern = required(query.pattern, "pattern")?;
    if let Err(e) = glob::Pattern::new(&pattern) {
        return Err(AppError::BadRequest(format!(
            "invalid pattern '{}': {}",
            pattern, e
        )));
    }

    let count = state.cache().invalidate_by_pattern(&pattern);

    Ok(Json(InvalidateResponse {
        invalidated: count,
        message: format!(
            "Invalidated {} cache entries matching '{}'",
            count, pattern
        ),
    }))
}

/// GET /cache/stats
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let cache = state.cache();
    let metrics = cache.metrics();

    Json(CacheStatsResponse {
        entries: cache.entry_count(),
        hits: metrics.hits(),
        misses: metrics.misses(),
        hit_rate: metrics.hit_rate(),
    })
}
