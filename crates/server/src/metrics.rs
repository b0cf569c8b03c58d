//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the watermark server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Ticket store contents and worker pool occupancy (collected dynamically)
//!
//! Core counters (tickets issued, commits, worker failures) are registered
//! here as well so `/metrics` exposes everything from one registry.

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, IntGaugeVec, Opts,
    Registry, TextEncoder,
};

use crate::state::AppState;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "watermark_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("watermark_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "watermark_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Store Metrics (collected dynamically)
// =============================================================================

/// Documents in the store by state.
pub static DOCUMENTS_BY_STATE: Lazy<IntGaugeVec> = Lazy::new(|| {
    IntGaugeVec::new(
        Opts::new("watermark_documents", "Current document count by state"),
        &["state"], // "pending", "watermarked"
    )
    .unwrap()
});

// =============================================================================
// Pool Metrics (collected dynamically)
// =============================================================================

/// Jobs currently running on a worker.
pub static POOL_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("watermark_pool_active", "Number of running watermark jobs").unwrap()
});

/// Jobs admitted but waiting for a worker.
pub static POOL_QUEUED: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new("watermark_pool_queued", "Number of queued watermark jobs").unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Store
    registry
        .register(Box::new(DOCUMENTS_BY_STATE.clone()))
        .unwrap();

    // Pool
    registry.register(Box::new(POOL_ACTIVE.clone())).unwrap();
    registry.register(Box::new(POOL_QUEUED.clone())).unwrap();

    // Core metrics (tickets, workers, commits)
    for metric in watermark_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the gauges reflect the store and pool right now.
pub fn collect_dynamic_metrics(state: &AppState) {
    let status = state.service().status();

    POOL_ACTIVE.set(status.pool.active_jobs as i64);
    POOL_QUEUED.set(status.pool.queued_jobs as i64);

    DOCUMENTS_BY_STATE
        .with_label_values(&["pending"])
        .set(status.store.pending as i64);
    DOCUMENTS_BY_STATE
        .with_label_values(&["watermarked"])
        .set(status.store.watermarked as i64);
}

/// Map a request path to a metric label.
///
/// Only known routes get their own label; anything else is folded into
/// `other` so arbitrary URLs cannot grow the label set.
pub fn normalize_path(path: &str) -> &'static str {
    match path {
        "/api/v1/health" => "/api/v1/health",
        "/api/v1/config" => "/api/v1/config",
        "/api/v1/watermark/create" => "/api/v1/watermark/create",
        "/api/v1/watermark/get" => "/api/v1/watermark/get",
        "/api/v1/watermark/status" => "/api/v1/watermark/status",
        "/metrics" => "/metrics",
        _ => "other",
    }
}
