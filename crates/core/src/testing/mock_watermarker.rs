//! Mock watermarker for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::document::{Document, Watermark};
use crate::processor::{WatermarkError, Watermarker};

/// A recorded watermark call for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedWatermark {
    /// The document that was watermarked.
    pub document: Document,
    /// Whether the call succeeded.
    pub success: bool,
}

/// Mock implementation of the Watermarker trait.
///
/// Provides controllable behavior for testing:
/// - Record every document it is asked to watermark
/// - Simulate slow work
/// - Fail or panic on the next call
/// - Report the highest number of calls seen running at once
///
/// # Example
///
/// ```rust,ignore
/// use watermark_core::testing::MockWatermarker;
///
/// let watermarker = MockWatermarker::new();
/// watermarker.set_duration(Duration::from_millis(20)).await;
///
/// // Hand it to a WorkerPool / WatermarkService...
///
/// assert_eq!(watermarker.call_count().await, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockWatermarker {
    /// Recorded calls.
    calls: Arc<RwLock<Vec<RecordedWatermark>>>,
    /// If set, the next call will fail with this error.
    next_error: Arc<RwLock<Option<WatermarkError>>>,
    /// If set, the next call will panic.
    panic_next: Arc<RwLock<bool>>,
    /// Simulated duration in milliseconds.
    duration_ms: Arc<RwLock<u64>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockWatermarker {
    /// Create a new mock watermarker with no delay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls.
    pub async fn recorded_calls(&self) -> Vec<RecordedWatermark> {
        self.calls.read().await.clone()
    }

    /// Get the number of calls performed.
    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }

    /// Configure the next call to fail with the given error.
    pub async fn set_next_error(&self, error: WatermarkError) {
        *self.next_error.write().await = Some(error);
    }

    /// Configure the next call to panic.
    pub async fn set_panic_next(&self, panic: bool) {
        *self.panic_next.write().await = panic;
    }

    /// Set the simulated duration of each call.
    pub async fn set_duration(&self, duration: Duration) {
        *self.duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Highest number of calls observed running at the same time.
    pub fn max_observed_concurrency(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, document: &Document, success: bool) {
        self.calls.write().await.push(RecordedWatermark {
            document: document.clone(),
            success,
        });
    }
}

#[async_trait]
impl Watermarker for MockWatermarker {
    fn name(&self) -> &str {
        "mock"
    }

    async fn watermark(&self, document: &Document) -> Result<Watermark, WatermarkError> {
        let should_panic = std::mem::take(&mut *self.panic_next.write().await);
        if should_panic {
            self.record(document, false).await;
            panic!("mock watermarker panic");
        }

        if let Some(err) = self.next_error.write().await.take() {
            self.record(document, false).await;
            return Err(err);
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let duration_ms = *self.duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.record(document, true).await;
        Ok(Watermark::create_for(document))
    }
}
