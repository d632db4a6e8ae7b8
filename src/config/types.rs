use serde::Deserialize;

/// Main configuration structure for refwalk
///
/// Every field has a default, so a missing config file or an empty one
/// yields a fully usable configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawl: CrawlConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

/// Walk and probe behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Whole-request timeout for every fetch and probe (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Connection establishment timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms", default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Number of probe requests allowed in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Treat addresses differing only in their query string as distinct pages
    #[serde(rename = "distinct-queries", default)]
    pub distinct_queries: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            concurrency: default_concurrency(),
            distinct_queries: false,
        }
    }
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_concurrency() -> usize {
    8
}

/// Report stream configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// File receiving one line per reachable address
    #[serde(rename = "success-path", default = "default_success_path")]
    pub success_path: String,

    /// File receiving one line per broken address
    #[serde(rename = "failure-path", default = "default_failure_path")]
    pub failure_path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            success_path: default_success_path(),
            failure_path: default_failure_path(),
        }
    }
}

fn default_success_path() -> String {
    "valid-links.txt".to_string()
}

fn default_failure_path() -> String {
    "broken-links.txt".to_string()
}
