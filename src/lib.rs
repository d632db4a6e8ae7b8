//! Refwalk: an internal link auditor
//!
//! This crate implements a site walker that discovers every same-host page
//! reachable from a seed address by following anchor hyperlinks, then probes
//! each discovered address over HTTP and sorts it into a reachable or broken
//! report stream.

pub mod config;
pub mod crawler;
pub mod probe;
pub mod report;
pub mod url;

use thiserror::Error;

/// Main error type for refwalk operations
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid seed address '{seed}': {reason}")]
    InvalidSeed { seed: String, reason: String },

    #[error("Seed address has no host component: {0}")]
    MissingHost(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Report error: {0}")]
    Report(#[from] report::ReportError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for refwalk operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_audit, CrawlEngine, VisitedRegistry};
pub use probe::ProbeStatus;
pub use report::{AuditEntry, AuditReport};
pub use crate::url::KeyPolicy;
