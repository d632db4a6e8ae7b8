use crate::config::types::{Config, CrawlConfig, ReportConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)?;
    validate_report_config(&config.report)?;
    Ok(())
}

/// Validates walk and probe settings
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "timeout-ms must be >= 100ms, got {}ms",
            config.timeout_ms
        )));
    }

    if config.connect_timeout_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-ms must be >= 100ms, got {}ms",
            config.connect_timeout_ms
        )));
    }

    if config.connect_timeout_ms > config.timeout_ms {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-ms ({}ms) cannot exceed timeout-ms ({}ms)",
            config.connect_timeout_ms, config.timeout_ms
        )));
    }

    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    Ok(())
}

/// Validates report stream settings
fn validate_report_config(config: &ReportConfig) -> Result<(), ConfigError> {
    if config.success_path.is_empty() {
        return Err(ConfigError::Validation(
            "success-path cannot be empty".to_string(),
        ));
    }

    if config.failure_path.is_empty() {
        return Err(ConfigError::Validation(
            "failure-path cannot be empty".to_string(),
        ));
    }

    if config.success_path == config.failure_path {
        return Err(ConfigError::Validation(format!(
            "success-path and failure-path must name different files, both are '{}'",
            config.success_path
        )));
    }

    Ok(())
}
