//! Submission service: the entry point collaborators call into.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::document::{Document, Watermark};
use crate::metrics;
use crate::processor::{ContentWatermarker, PoolError, PoolStatus, ProcessorConfig, Watermarker, WorkerPool};
use crate::ticket::{InMemoryTicketStore, StoreStats, Ticket, TicketStore};

/// Error type for submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The worker pool is full and configured to reject.
    #[error("Service overloaded: {0} watermark jobs already in flight")]
    Overloaded(usize),

    /// The service no longer accepts submissions.
    #[error("Service is shutting down")]
    ShuttingDown,
}

impl From<PoolError> for ServiceError {
    fn from(err: PoolError) -> Self {
        match err {
            PoolError::Overloaded { capacity } => ServiceError::Overloaded(capacity),
            PoolError::Closed => ServiceError::ShuttingDown,
        }
    }
}

/// Combined store and pool snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub watermarker: String,
    pub store: StoreStats,
    pub pool: PoolStatus,
}

/// Issues tickets for documents and watermarks them in the background.
///
/// Holds no state of its own besides the store and the worker pool.
pub struct WatermarkService {
    store: Arc<dyn TicketStore>,
    pool: WorkerPool,
}

impl WatermarkService {
    /// Creates a service over an existing store.
    pub fn new(
        store: Arc<dyn TicketStore>,
        watermarker: Arc<dyn Watermarker>,
        config: ProcessorConfig,
    ) -> Self {
        let pool = WorkerPool::new(config, Arc::clone(&store), watermarker);
        Self { store, pool }
    }

    /// Creates a service with an in-memory store and the content watermarker.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn TicketStore> = Arc::new(InMemoryTicketStore::new(config.store.clone()));
        Self::new(store, Arc::new(ContentWatermarker), config.processor.clone())
    }

    /// Issues a ticket for `document` and starts watermarking it.
    ///
    /// Returns as soon as the job is dispatched. With the `block` policy this
    /// waits for a free pool slot first; with `reject` a full pool fails
    /// before any ticket is issued.
    pub async fn submit(&self, document: Document) -> Result<Ticket, ServiceError> {
        let admission = match self.pool.admit().await {
            Ok(admission) => admission,
            Err(e) => {
                if matches!(e, PoolError::Overloaded { .. }) {
                    metrics::SUBMISSIONS_REJECTED.inc();
                }
                warn!("Refusing document {}: {}", document, e);
                return Err(e.into());
            }
        };

        let ticket = self.store.create_ticket_for(document.clone());
        metrics::TICKETS_ISSUED.inc();
        self.pool.dispatch(admission, ticket, document);
        Ok(ticket)
    }

    /// The watermark for `ticket`, or `None` when the ticket is unknown or
    /// still being processed. The two cases are deliberately not told apart.
    pub fn watermark_for(&self, ticket: Ticket) -> Option<Watermark> {
        let watermark = self.store.watermark_for(ticket);
        if watermark.is_none() {
            debug!("No watermark available for ticket {}", ticket);
        }
        watermark
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            watermarker: self.pool.watermarker_name().to_string(),
            store: self.store.stats(),
            pool: self.pool.status(),
        }
    }

    /// Waits until every dispatched job has finished.
    pub async fn drain(&self) -> Result<(), ServiceError> {
        self.pool.drain().await.map_err(ServiceError::from)
    }

    pub fn store(&self) -> &Arc<dyn TicketStore> {
        &self.store
    }
}
