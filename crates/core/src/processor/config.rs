//! Configuration for the watermark worker pool.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What `submit` does when every worker and queue slot is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackpressurePolicy {
    /// Wait until a slot frees up.
    #[default]
    Block,
    /// Fail immediately without issuing a ticket.
    Reject,
}

/// Configuration for the worker pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Maximum watermark jobs running at the same time.
    #[serde(default = "default_max_workers")]
    pub max_concurrent_workers: usize,

    /// Jobs allowed to wait for a worker on top of the running ones.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Behavior when the pool is full.
    #[serde(default)]
    pub backpressure: BackpressurePolicy,

    /// Lower bound of the simulated processing delay in milliseconds.
    #[serde(default)]
    pub min_delay_ms: u64,

    /// Upper bound of the simulated processing delay in milliseconds.
    #[serde(default)]
    pub max_delay_ms: u64,
}

fn default_max_workers() -> usize {
    5
}

fn default_queue_capacity() -> usize {
    10_000
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_concurrent_workers: default_max_workers(),
            queue_capacity: default_queue_capacity(),
            backpressure: BackpressurePolicy::default(),
            min_delay_ms: 0,
            max_delay_ms: 0,
        }
    }
}

impl ProcessorConfig {
    /// Sets the maximum number of concurrently running jobs.
    pub fn with_max_workers(mut self, max: usize) -> Self {
        self.max_concurrent_workers = max;
        self
    }

    /// Sets how many jobs may wait for a worker.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_backpressure(mut self, policy: BackpressurePolicy) -> Self {
        self.backpressure = policy;
        self
    }

    /// Sets the simulated delay range.
    pub fn with_delay(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay_ms = min.as_millis() as u64;
        self.max_delay_ms = max.as_millis() as u64;
        self
    }

    /// Total jobs the pool accepts at once (running + waiting).
    pub fn admission_capacity(&self) -> usize {
        self.max_concurrent_workers.saturating_add(self.queue_capacity)
    }
}
