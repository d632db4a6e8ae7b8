//! Configuration module for refwalk
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use refwalk::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("refwalk.toml")).unwrap();
//! println!("Fetch timeout: {}ms", config.crawl.timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, ReportConfig};

// Re-export parser and validation functions
pub use parser::load_config;
pub use validation::validate;
