pub mod config;
pub mod document;
pub mod metrics;
pub mod processor;
pub mod service;
pub mod testing;
pub mod ticket;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ServerConfig,
};
pub use document::{Author, Content, Document, DocumentKind, Topic, Watermark};
pub use processor::{
    BackpressurePolicy, ContentWatermarker, PoolStatus, ProcessorConfig, WatermarkError,
    Watermarker, WorkerPool,
};
pub use service::{ServiceError, ServiceStatus, WatermarkService};
pub use ticket::{
    CommitError, InMemoryTicketStore, ReplacePolicy, StoreConfig, StoreStats, Ticket,
    TicketStore,
};
