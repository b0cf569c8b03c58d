use std::sync::Arc;
use watermark_core::{Config, WatermarkService};

/// Shared application state
pub struct AppState {
    config: Config,
    service: Arc<WatermarkService>,
}

impl AppState {
    pub fn new(config: Config, service: Arc<WatermarkService>) -> Self {
        Self { config, service }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &WatermarkService {
        self.service.as_ref()
    }
}
