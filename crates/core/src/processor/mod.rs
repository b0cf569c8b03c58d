//! Background watermarking.
//!
//! `WorkerPool` runs one job per submitted document. Each job waits for a
//! worker slot, optionally sleeps a simulated delay, asks the configured
//! `Watermarker` for the watermark and commits the watermarked document back
//! into the ticket store. Failures are logged and counted, never retried.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use watermark_core::processor::{ContentWatermarker, ProcessorConfig, WorkerPool};
//! use watermark_core::ticket::{InMemoryTicketStore, TicketStore};
//!
//! let store: Arc<dyn TicketStore> = Arc::new(InMemoryTicketStore::default());
//! let pool = WorkerPool::new(ProcessorConfig::default(), Arc::clone(&store), Arc::new(ContentWatermarker));
//!
//! let admission = pool.admit().await?;
//! let ticket = store.create_ticket_for(document.clone());
//! pool.dispatch(admission, ticket, document);
//! ```

mod config;
mod pool;
mod traits;
mod types;

pub use config::{BackpressurePolicy, ProcessorConfig};
pub use pool::{Admission, JobError, PoolError, WorkerPool};
pub use traits::{ContentWatermarker, WatermarkError, Watermarker};
pub use types::PoolStatus;
