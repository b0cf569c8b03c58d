//! Bounded pool of watermark workers.

use futures::FutureExt;
use rand::Rng;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};
use tracing::{error, info};

use crate::document::Document;
use crate::metrics;
use crate::ticket::{CommitError, Ticket, TicketStore};

use super::config::{BackpressurePolicy, ProcessorConfig};
use super::traits::{WatermarkError, Watermarker};
use super::types::PoolStatus;

/// Error type for pool admission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PoolError {
    /// Every worker and queue slot is taken and the policy is to reject.
    #[error("Worker pool is full ({capacity} jobs in flight)")]
    Overloaded { capacity: usize },

    /// The pool no longer accepts work.
    #[error("Worker pool is closed")]
    Closed,
}

/// Why a dispatched job did not produce a committed watermark.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error(transparent)]
    Watermark(#[from] WatermarkError),

    #[error("Watermarker panicked: {0}")]
    Panicked(String),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error("Worker pool is closed")]
    Closed,
}

impl JobError {
    /// Label used for the failure metric.
    pub fn kind(&self) -> &'static str {
        match self {
            JobError::Watermark(_) => "watermarker_error",
            JobError::Panicked(_) => "panic",
            JobError::Commit(_) => "commit_rejected",
            JobError::Closed => "closed",
        }
    }
}

/// A reserved slot in the pool. Held by the job until it finishes.
#[derive(Debug)]
pub struct Admission {
    _permit: OwnedSemaphorePermit,
}

/// Tracks statistics for the pool.
#[derive(Default)]
struct PoolStats {
    active: AtomicU64,
    queued: AtomicU64,
    total_processed: AtomicU64,
    total_failed: AtomicU64,
}

impl PoolStats {
    fn to_status(&self, config: &ProcessorConfig) -> PoolStatus {
        PoolStatus {
            max_concurrent: config.max_concurrent_workers,
            queue_capacity: config.queue_capacity,
            active_jobs: self.active.load(Ordering::Relaxed) as usize,
            queued_jobs: self.queued.load(Ordering::Relaxed) as usize,
            total_processed: self.total_processed.load(Ordering::Relaxed),
            total_failed: self.total_failed.load(Ordering::Relaxed),
        }
    }
}

/// Runs watermark jobs in the background.
///
/// Two semaphores bound resource usage: `admission` caps jobs in flight
/// (running + waiting), `workers` caps jobs running at once.
pub struct WorkerPool {
    config: ProcessorConfig,
    store: Arc<dyn TicketStore>,
    watermarker: Arc<dyn Watermarker>,
    admission: Arc<Semaphore>,
    workers: Arc<Semaphore>,
    stats: Arc<PoolStats>,
}

impl WorkerPool {
    /// Creates a new pool committing into `store`.
    pub fn new(
        config: ProcessorConfig,
        store: Arc<dyn TicketStore>,
        watermarker: Arc<dyn Watermarker>,
    ) -> Self {
        let admission = Arc::new(Semaphore::new(config.admission_capacity()));
        let workers = Arc::new(Semaphore::new(config.max_concurrent_workers));

        Self {
            config,
            store,
            watermarker,
            admission,
            workers,
            stats: Arc::new(PoolStats::default()),
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    pub fn watermarker_name(&self) -> &str {
        self.watermarker.name()
    }

    pub fn status(&self) -> PoolStatus {
        self.stats.to_status(&self.config)
    }

    /// Reserves a slot according to the configured backpressure policy.
    pub async fn admit(&self) -> Result<Admission, PoolError> {
        let permit = match self.config.backpressure {
            BackpressurePolicy::Block => Arc::clone(&self.admission)
                .acquire_owned()
                .await
                .map_err(|_| PoolError::Closed)?,
            BackpressurePolicy::Reject => match Arc::clone(&self.admission).try_acquire_owned() {
                Ok(permit) => permit,
                Err(TryAcquireError::NoPermits) => {
                    return Err(PoolError::Overloaded {
                        capacity: self.config.admission_capacity(),
                    })
                }
                Err(TryAcquireError::Closed) => return Err(PoolError::Closed),
            },
        };
        Ok(Admission { _permit: permit })
    }

    /// Starts watermarking `document` in the background.
    ///
    /// Returns immediately; the outcome is only logged and counted.
    pub fn dispatch(&self, admission: Admission, ticket: Ticket, document: Document) {
        let store = Arc::clone(&self.store);
        let watermarker = Arc::clone(&self.watermarker);
        let workers = Arc::clone(&self.workers);
        let stats = Arc::clone(&self.stats);
        let delay = pick_delay(&self.config);

        stats.queued.fetch_add(1, Ordering::Relaxed);

        tokio::spawn(async move {
            let _admission = admission;

            let result = match workers.acquire_owned().await {
                Ok(_permit) => {
                    stats.queued.fetch_sub(1, Ordering::Relaxed);
                    stats.active.fetch_add(1, Ordering::Relaxed);

                    let start = Instant::now();
                    let outcome =
                        run_job(ticket, document, store.as_ref(), watermarker.as_ref(), delay).await;
                    stats.active.fetch_sub(1, Ordering::Relaxed);
                    outcome.map(|()| start.elapsed())
                }
                Err(_) => {
                    stats.queued.fetch_sub(1, Ordering::Relaxed);
                    Err(JobError::Closed)
                }
            };

            match result {
                Ok(elapsed) => {
                    stats.total_processed.fetch_add(1, Ordering::Relaxed);
                    metrics::WATERMARKS_COMMITTED.inc();
                    metrics::WATERMARK_DURATION
                        .with_label_values(&["success"])
                        .observe(elapsed.as_secs_f64());
                    info!("Took {:?} to watermark ticket {}", elapsed, ticket);
                }
                Err(e) => {
                    stats.total_failed.fetch_add(1, Ordering::Relaxed);
                    metrics::WORKER_FAILURES.with_label_values(&[e.kind()]).inc();
                    if let JobError::Commit(ref commit) = e {
                        metrics::COMMITS_REJECTED
                            .with_label_values(&[commit.reason()])
                            .inc();
                    }
                    error!("An error occurred while watermarking ticket {}: {}", ticket, e);
                }
            }
        });
    }

    /// Waits until every admitted job has finished.
    pub async fn drain(&self) -> Result<(), PoolError> {
        let permits = u32::try_from(self.config.admission_capacity()).unwrap_or(u32::MAX);
        let _all = self
            .admission
            .acquire_many(permits)
            .await
            .map_err(|_| PoolError::Closed)?;
        Ok(())
    }
}

/// Watermarks one document and commits the result.
async fn run_job(
    ticket: Ticket,
    document: Document,
    store: &dyn TicketStore,
    watermarker: &dyn Watermarker,
    delay: Duration,
) -> Result<(), JobError> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let watermark = AssertUnwindSafe(watermarker.watermark(&document))
        .catch_unwind()
        .await
        .map_err(|panic| JobError::Panicked(panic_message(panic.as_ref())))??;

    store.replace_if_valid(ticket, document.with_watermark(watermark))?;
    Ok(())
}

fn pick_delay(config: &ProcessorConfig) -> Duration {
    if config.max_delay_ms <= config.min_delay_ms {
        return Duration::from_millis(config.min_delay_ms);
    }
    let millis = rand::thread_rng().gen_range(config.min_delay_ms..=config.max_delay_ms);
    Duration::from_millis(millis)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
