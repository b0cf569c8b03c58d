//! Types for the processor module.

use serde::{Deserialize, Serialize};

/// Status of the worker pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStatus {
    /// Maximum concurrent jobs.
    pub max_concurrent: usize,
    /// Jobs allowed to wait for a worker.
    pub queue_capacity: usize,
    /// Number of running jobs.
    pub active_jobs: usize,
    /// Number of jobs waiting for a worker.
    pub queued_jobs: usize,
    /// Jobs committed successfully since startup.
    pub total_processed: u64,
    /// Jobs that failed since startup.
    pub total_failed: u64,
}
