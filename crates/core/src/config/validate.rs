use tokio::sync::Semaphore;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - At least one worker
/// - Delay range is ordered
/// - Pool capacity fits a semaphore
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Processor validation
    let processor = &config.processor;
    if processor.max_concurrent_workers == 0 {
        return Err(ConfigError::ValidationError(
            "processor.max_concurrent_workers must be at least 1".to_string(),
        ));
    }

    if processor.min_delay_ms > processor.max_delay_ms {
        return Err(ConfigError::ValidationError(format!(
            "processor.min_delay_ms ({}) exceeds processor.max_delay_ms ({})",
            processor.min_delay_ms, processor.max_delay_ms
        )));
    }

    let capacity = processor.admission_capacity();
    if capacity > Semaphore::MAX_PERMITS || capacity > u32::MAX as usize {
        return Err(ConfigError::ValidationError(format!(
            "processor.max_concurrent_workers + processor.queue_capacity is too large ({})",
            capacity
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::processor::ProcessorConfig;
    use std::net::IpAddr;
    use std::time::Duration;

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let config = Config {
            server: ServerConfig {
                host: "0.0.0.0".parse::<IpAddr>().unwrap(),
                port: 0,
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_zero_workers_fails() {
        let config = Config {
            processor: ProcessorConfig::default().with_max_workers(0),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_inverted_delay_fails() {
        let config = Config {
            processor: ProcessorConfig::default()
                .with_delay(Duration::from_secs(10), Duration::from_secs(1)),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_huge_queue_fails() {
        let config = Config {
            processor: ProcessorConfig::default().with_queue_capacity(usize::MAX),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
