//! HTTP client construction and page retrieval
//!
//! One client serves both phases of an audit: document fetches during the
//! walk and the accessibility probes afterwards. It is built once per run
//! and passed down explicitly.

use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

use crate::config::CrawlConfig;

/// Outcome of retrieving one page during the walk
#[derive(Debug)]
pub enum FetchOutcome {
    /// A response arrived and its body was read; any status qualifies
    Document { status_code: u16, body: String },
    /// The request produced no readable response
    Failed { error: String },
}

/// Builds the HTTP client shared by the walk and probe phases
///
/// # Arguments
///
/// * `config` - Timeout settings for the client
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use refwalk::config::CrawlConfig;
/// use refwalk::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlConfig) -> Result<Client, reqwest::Error> {
    let user_agent = concat!("refwalk/", env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_millis(config.timeout_ms))
        .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retrieves one document during the walk.
///
/// Whatever response arrives is read, regardless of status; error pages
/// carry markup too and their links are still discovered. Only a request
/// that never yields a readable response collapses to `Failed`.
pub async fn fetch_page(client: &Client, address: &Url) -> FetchOutcome {
    let response = match client.get(address.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            return FetchOutcome::Failed {
                error: describe_request_error(&e),
            }
        }
    };

    let status_code = response.status().as_u16();

    match response.text().await {
        Ok(body) => FetchOutcome::Document { status_code, body },
        Err(e) => FetchOutcome::Failed {
            error: format!("body read failed: {}", e),
        },
    }
}

/// Folds reqwest's error surface into a short description
pub(crate) fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else if error.is_redirect() {
        "redirect limit exceeded".to_string()
    } else {
        error.to_string()
    }
}
