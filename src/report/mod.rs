//! Audit report assembly and persistence
//!
//! An audit ends in an ordered sequence of entries, one per discovered
//! page. This module holds that sequence and writes it out as two
//! append-only text streams, one for reachable addresses and one for
//! broken ones.

mod writer;

pub use writer::{format_stream, write_report};

use thiserror::Error;
use url::Url;

use crate::probe::ProbeStatus;

/// Errors that can occur while persisting a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Classification outcome for one discovered page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// Identity key the page was discovered under
    pub page_key: String,

    /// Fully qualified address that was probed
    pub address: Url,

    /// The probe's verdict
    pub status: ProbeStatus,
}

impl AuditEntry {
    /// True when the probe classified this address as reachable
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// The finished, ordered outcome of one audit run
#[derive(Debug, Clone)]
pub struct AuditReport {
    /// Entries in ascending key order
    pub entries: Vec<AuditEntry>,
}

impl AuditReport {
    /// Wraps a finished entry sequence, which callers supply already ordered
    pub fn new(entries: Vec<AuditEntry>) -> Self {
        Self { entries }
    }

    /// Entries classified as reachable
    pub fn successes(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(|entry| entry.is_success())
    }

    /// Entries classified as broken
    pub fn failures(&self) -> impl Iterator<Item = &AuditEntry> {
        self.entries.iter().filter(|entry| !entry.is_success())
    }

    /// Number of reachable addresses
    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    /// Number of broken addresses
    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}
