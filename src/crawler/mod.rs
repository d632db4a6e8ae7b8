//! Crawler module for page discovery and audit orchestration
//!
//! This module contains the walk phase of an audit, including:
//! - HTTP fetching with failure isolation
//! - Hyperlink extraction from fetched documents
//! - The visited registry guarding against revisits
//! - The traversal engine tying them together

mod engine;
mod fetcher;
mod parser;
mod registry;

pub use engine::CrawlEngine;
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use parser::extract_hrefs;
pub use registry::{VisitedRegistry, VisitState};

pub(crate) use fetcher::describe_request_error;

use reqwest::Client;
use url::Url;

use crate::config::Config;
use crate::probe::probe_all;
use crate::report::{AuditEntry, AuditReport};
use crate::url::{requalify, KeyPolicy};
use crate::Result;

/// Runs a complete audit of the site behind `seed`.
///
/// This is the main entry point. It will:
/// 1. Walk the site, admitting every same-host page into the registry
/// 2. Re-qualify each admitted key against the seed
/// 3. Probe every address through a bounded pool
/// 4. Assemble the ordered report
///
/// The returned entries are in ascending key order, so two runs against an
/// unchanged site produce identical reports.
///
/// # Arguments
///
/// * `client` - The HTTP client built for this run
/// * `seed` - The absolute address the audit starts from
/// * `config` - The audit configuration
///
/// # Example
///
/// ```no_run
/// use refwalk::config::Config;
/// use refwalk::crawler::{build_http_client, run_audit};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = Config::default();
/// let client = build_http_client(&config.crawl)?;
/// let seed = Url::parse("http://example.com/")?;
/// let report = run_audit(&client, &seed, &config).await?;
/// println!("{} pages audited", report.entries.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_audit(client: &Client, seed: &Url, config: &Config) -> Result<AuditReport> {
    let policy = KeyPolicy::from_distinct_queries(config.crawl.distinct_queries);
    let engine = CrawlEngine::new(client.clone(), seed.clone(), policy)?;
    let registry = engine.walk().await;

    let keys = registry.page_keys();
    let mut addresses = Vec::with_capacity(keys.len());
    for key in &keys {
        addresses.push(requalify(seed, key)?);
    }

    tracing::info!("Probing {} discovered addresses", addresses.len());
    let statuses = probe_all(client, &addresses, config.crawl.concurrency).await;

    let entries = keys
        .into_iter()
        .zip(addresses)
        .zip(statuses)
        .map(|((page_key, address), status)| AuditEntry {
            page_key,
            address,
            status,
        })
        .collect();

    Ok(AuditReport::new(entries))
}
