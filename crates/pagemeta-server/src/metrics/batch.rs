//! Batch and fetch metrics recording.

use metrics::{counter, histogram};
use std::time::Duration;

/// Registra las metricas de resolucion de batches.
pub fn register_batch_metrics() {
    metrics::describe_counter!(
        "pagemeta_fetch_total",
        "Total number of page fetches by result"
    );
    metrics::describe_histogram!(
        "pagemeta_fetch_duration_seconds",
        "Time spent fetching and extracting a single page"
    );
    metrics::describe_histogram!(
        "pagemeta_batch_urls",
        "Number of URLs per resolved batch"
    );
    metrics::describe_histogram!(
        "pagemeta_batch_duration_seconds",
        "Time spent resolving a whole batch"
    );
}

/// Registra el resultado de un fetch individual
pub fn record_fetch(result: &'static str, duration: Duration) {
    counter!("pagemeta_fetch_total", "result" => result).increment(1);
    histogram!("pagemeta_fetch_duration_seconds", "result" => result)
        .record(duration.as_secs_f64());
}

/// Registra una tarea de fetch que no llego a producir resultado.
/// Solo cuenta: no hay una duracion de fetch que medir.
pub fn record_task_failure() {
    counter!("pagemeta_fetch_total", "result" => "failure").increment(1);
}

/// Registra un batch resuelto
pub fn record_batch(urls: usize, duration: Duration) {
    histogram!("pagemeta_batch_urls").record(urls as f64);
    histogram!("pagemeta_batch_duration_seconds").record(duration.as_secs_f64());
}
