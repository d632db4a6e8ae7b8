//! Accessibility probing of discovered addresses
//!
//! Once the walk has finished, every registry member is probed with a plain
//! GET and classified by its numeric status code. Probes run through a
//! bounded pool; a dead address becomes an unreachable verdict, never an
//! error that could halt the audit.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use url::Url;

use crate::crawler::describe_request_error;

/// Verdict of one accessibility probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The server answered with this status code
    Http(u16),
    /// No response arrived; carries a short description of the failure
    Unreachable(String),
}

impl ProbeStatus {
    /// Success means a status code in the inclusive range [200, 299]
    pub fn is_success(&self) -> bool {
        match self {
            ProbeStatus::Http(code) => (200..=299).contains(code),
            ProbeStatus::Unreachable(_) => false,
        }
    }
}

impl std::fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeStatus::Http(code) => write!(f, "{}", code),
            ProbeStatus::Unreachable(_) => write!(f, "unreachable"),
        }
    }
}

/// Issues a single GET against a fully qualified address.
///
/// Redirects are followed per the client's policy; the final status code is
/// reported as-is. Transport failures become [`ProbeStatus::Unreachable`]
/// rather than errors.
pub async fn probe_address(client: &Client, address: &Url) -> ProbeStatus {
    match client.get(address.clone()).send().await {
        Ok(response) => ProbeStatus::Http(response.status().as_u16()),
        Err(e) => {
            let reason = describe_request_error(&e);
            tracing::debug!("Probe of {} got no response: {}", address, reason);
            ProbeStatus::Unreachable(reason)
        }
    }
}

/// Probes every address with at most `concurrency` requests in flight.
///
/// Verdicts come back in the same order as `addresses`, whatever order the
/// responses arrived in. A concurrency of zero is treated as one.
pub async fn probe_all(
    client: &Client,
    addresses: &[Url],
    concurrency: usize,
) -> Vec<ProbeStatus> {
    // buffered(0) would never complete
    let width = concurrency.max(1);

    let probes = addresses
        .iter()
        .map(|address| probe_address(client, address));

    stream::iter(probes).buffered(width).collect().await
}
