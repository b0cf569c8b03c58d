//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Ticket issuance and rejected submissions
//! - Watermark workers (commits, failures, duration)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Submission Metrics
// =============================================================================

/// Tickets issued total.
pub static TICKETS_ISSUED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("watermark_tickets_issued_total", "Total tickets issued").unwrap()
});

/// Submissions refused because the worker pool was full.
pub static SUBMISSIONS_REJECTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "watermark_submissions_rejected_total",
        "Total submissions rejected by backpressure",
    )
    .unwrap()
});

// =============================================================================
// Worker Metrics
// =============================================================================

/// Watermarks committed into the store.
pub static WATERMARKS_COMMITTED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "watermark_commits_total",
        "Total watermarked documents committed",
    )
    .unwrap()
});

/// Commits refused by the store, by reason.
pub static COMMITS_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "watermark_commits_rejected_total",
            "Total commits rejected by the ticket store",
        ),
        &["reason"], // "unknown_ticket", "already_watermarked", "not_watermarked"
    )
    .unwrap()
});

/// Worker jobs that failed, by kind.
pub static WORKER_FAILURES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("watermark_worker_failures_total", "Total failed watermark jobs"),
        &["kind"], // "watermarker_error", "panic", "commit_rejected", "closed"
    )
    .unwrap()
});

/// Time from a worker picking up a job to the commit.
pub static WATERMARK_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "watermark_job_duration_seconds",
            "Duration of watermark jobs",
        )
        .buckets(vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["result"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(TICKETS_ISSUED.clone()),
        Box::new(SUBMISSIONS_REJECTED.clone()),
        Box::new(WATERMARKS_COMMITTED.clone()),
        Box::new(COMMITS_REJECTED.clone()),
        Box::new(WORKER_FAILURES.clone()),
        Box::new(WATERMARK_DURATION.clone()),
    ]
}
