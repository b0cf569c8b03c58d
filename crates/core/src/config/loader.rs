use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "WATERMARK_";

/// Separates section from key in environment overrides.
const ENV_SEPARATOR: &str = "__";

/// Load configuration from file with environment variable overrides.
///
/// `WATERMARK_PROCESSOR__MAX_CONCURRENT_WORKERS=8` overrides
/// `processor.max_concurrent_workers`. Keys that match no field are ignored.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }

    sources(path)
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn sources(path: &Path) -> Figment {
    Figment::new()
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR))
}

/// Load configuration from TOML string, without environment overrides.
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}
