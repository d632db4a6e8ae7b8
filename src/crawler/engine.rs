//! Traversal engine for same-host page discovery
//!
//! The engine drives fetching and hyperlink resolution against a single
//! [`VisitedRegistry`], whose admission check is the only thing standing
//! between a cyclic site and an endless walk. Traversal runs over an
//! explicit work queue rather than recursion, so deep sites cannot exhaust
//! the stack.

use std::collections::VecDeque;

use reqwest::Client;
use url::Url;

use crate::crawler::fetcher::{fetch_page, FetchOutcome};
use crate::crawler::parser::extract_hrefs;
use crate::crawler::registry::VisitedRegistry;
use crate::url::{resolve_candidates, KeyPolicy};
use crate::Result;

/// Walks a site from its seed address, recording every same-host page
pub struct CrawlEngine {
    client: Client,
    seed: Url,
    registry: VisitedRegistry,
    queue: VecDeque<(String, Url)>,
}

impl CrawlEngine {
    /// Creates an engine scoped to the seed's host
    ///
    /// # Arguments
    ///
    /// * `client` - The HTTP client to fetch pages with
    /// * `seed` - The address the walk starts from; its host defines the scope
    /// * `policy` - How much of an address counts towards page identity
    pub fn new(client: Client, seed: Url, policy: KeyPolicy) -> Result<Self> {
        let registry = VisitedRegistry::new(&seed, policy)?;

        Ok(Self {
            client,
            seed,
            registry,
            queue: VecDeque::new(),
        })
    }

    /// Runs the traversal to completion and returns the finished registry.
    ///
    /// Every admitted page is fetched exactly once. A fetch that fails
    /// counts as zero discovered links; it never ends the walk. The
    /// returned registry is final and safe to enumerate for probing.
    pub async fn walk(mut self) -> VisitedRegistry {
        if let Some(key) = self.registry.try_admit(&self.seed) {
            self.queue.push_back((key, self.seed.clone()));
        }

        let mut pages_fetched = 0usize;

        while let Some((key, address)) = self.queue.pop_front() {
            tracing::debug!("Fetching {}", address);

            match fetch_page(&self.client, &address).await {
                FetchOutcome::Document { status_code, body } => {
                    tracing::debug!(
                        "{} answered {} ({} bytes)",
                        address,
                        status_code,
                        body.len()
                    );
                    for href in extract_hrefs(&body) {
                        self.offer(&address, &href);
                    }
                }
                FetchOutcome::Failed { error } => {
                    tracing::warn!("Fetch of {} failed: {}", address, error);
                }
            }

            self.registry.mark_fetched(&key);
            pages_fetched += 1;

            // Progress reporting every 10 pages
            if pages_fetched % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} pending",
                    pages_fetched,
                    self.queue.len()
                );
            }
        }

        tracing::info!(
            "Traversal complete: {} pages discovered on {}",
            self.registry.len(),
            self.registry.scope_host()
        );

        self.registry
    }

    /// Offers one raw href to the registry, queueing whatever gets admitted
    fn offer(&mut self, page: &Url, href: &str) {
        for candidate in resolve_candidates(page, href) {
            if let Some(key) = self.registry.try_admit(&candidate) {
                self.queue.push_back((key, candidate));
            }
        }
    }
}
