//! Prometheus metrics for invoice-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_histogram_vec, Counter, CounterVec,
    HistogramVec, TextEncoder,
};

/// Database query duration histogram.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "invoice_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .expect("Failed to register db_query_duration")
});

/// Saved invoice counter by status.
pub static INVOICES_SAVED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "invoice_saves_total",
        "Total number of persisted invoice saves by status",
        &["status"] // draft, sent, paid, overdue
    )
    .expect("Failed to register invoice_saves_total")
});

/// Drafts rejected by validation before any persistence attempt.
pub static VALIDATION_REJECTED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "invoice_validation_rejected_total",
        "Total number of drafts rejected by validation"
    )
    .expect("Failed to register validation_rejected_total")
});

/// Export counter by entity and format.
pub static EXPORTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "invoice_exports_total",
        "Total number of list exports by entity and format",
        &["entity", "format"]
    )
    .expect("Failed to register exports_total")
});

/// Error counter for alerting.
pub static ERRORS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "invoice_errors_total",
        "Total number of errors by type",
        &["error_type"]
    )
    .expect("Failed to register errors_total")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&INVOICES_SAVED_TOTAL);
    Lazy::force(&VALIDATION_REJECTED_TOTAL);
    Lazy::force(&EXPORTS_TOTAL);
    Lazy::force(&ERRORS_TOTAL);
}

/// Get metrics in Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    encoder
        .encode_to_string(&metric_families)
        .unwrap_or_default()
}
