//! Batch inspection endpoint handlers.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::Deserialize;
use tracing::instrument;

use crate::batch::BatchResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Request body de `POST /`.
#[derive(Debug, Deserialize)]
pub struct InspectRequest {
    /// URLs a inspeccionar, en orden.
    pub urls: Option<Vec<String>>,
}

impl InspectRequest {
    /// Decodes a request body as JSON, whatever its declared content type.
    pub fn from_body(body: &[u8]) -> Result<Self, String> {
        serde_json::from_slice(body).map_err(|e| format!("invalid request body: {}", e))
    }

    /// Validates the request and returns the URLs to resolve.
    pub fn validate(self, max_urls: Option<usize>) -> Result<Vec<String>, String> {
        let urls = match self.urls {
            Some(urls) if !urls.is_empty() => urls,
            _ => return Err("at least one urls should be specified".to_string()),
        };

        if let Some(max) = max_urls
            && urls.len() > max
        {
            return Err(format!(
                "too many urls: {} given, at most {} allowed",
                urls.len(),
                max
            ));
        }

        Ok(urls)
    }
}

/// POST /
/// Resuelve la metadata de cada URL del body.
/// El body se decodifica como JSON sin mirar el `Content-Type`.
#[instrument(skip_all)]
pub async fn inspect(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<BatchResponse>, AppError> {
    let urls = InspectRequest::from_body(&body)
        .map_err(AppError::BadRequest)?
        .validate(state.max_urls())
        .map_err(AppError::BadRequest)?;

    tracing::info!(urls = urls.len(), "Inspecting batch");

    let response = state.resolver().resolve_batch(&urls).await;
    Ok(Json(response))
}

/// OPTIONS /
/// Preflight sin headers CORS; los preflight reales los contesta el CorsLayer.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
