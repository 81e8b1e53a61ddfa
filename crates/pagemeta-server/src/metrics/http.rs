//! HTTP metrics middleware.

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics::{counter, gauge, histogram};
use std::time::Instant;

/// Middleware que registra metricas HTTP para cada request.
pub async fn http_metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    // Sin ruta matcheada se agrupa todo bajo "unmatched" para acotar la cardinalidad
    let path = matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    gauge!("pagemeta_http_requests_in_flight").increment(1.0);
    let response = next.run(request).await;
    gauge!("pagemeta_http_requests_in_flight").decrement(1.0);

    let status = response.status();

    counter!(
        "pagemeta_http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status.as_u16().to_string(),
        "class" => status_class(status.as_u16())
    )
    .increment(1);

    histogram!(
        "pagemeta_http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// Agrupa un status code en su clase (`2xx`, `4xx`, ...).
fn status_class(status: u16) -> &'static str {
    match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

/// Registra las metricas HTTP
pub fn register_http_metrics() {
    metrics::describe_counter!(
        "pagemeta_http_requests_total",
        "Total number of HTTP requests"
    );
    metrics::describe_histogram!(
        "pagemeta_http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    metrics::describe_gauge!(
        "pagemeta_http_requests_in_flight",
        "Number of HTTP requests currently being served"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(200), "2xx");
        assert_eq!(status_class(204), "2xx");
        assert_eq!(status_class(400), "4xx");
        assert_eq!(status_class(503), "5xx");
    }
}
