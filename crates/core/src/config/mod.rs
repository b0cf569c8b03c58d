//! Service configuration: `[server]`, `[processor]` and `[store]` sections,
//! loaded from TOML with `WATERMARK_` environment overrides.

mod loader;
mod types;
mod validate;

pub use loader::{load_config, load_config_from_str};
pub use types::{Config, ServerConfig};
pub use validate::validate_config;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The file or an override could not be parsed into a `Config`.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}
