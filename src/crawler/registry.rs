//! Visited-page registry, the traversal's sole revisit guard

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use url::Url;

use crate::url::{page_key, scope_host, KeyPolicy};
use crate::{AuditError, Result};

/// Lifecycle of a page inside the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisitState {
    /// Admitted and waiting in the traversal queue
    Pending,
    /// Its fetch attempt has finished, successfully or not
    Fetched,
}

/// Deduplicating, host-scoped record of every page accepted into the walk.
///
/// Pages are keyed by their identity key and held in a `BTreeMap`, so
/// enumeration is always in ascending lexicographic key order no matter what
/// order the walk discovered them in. The registry only ever grows during a
/// walk; admission is the single gate that keeps traversal finite.
#[derive(Debug)]
pub struct VisitedRegistry {
    scope_host: String,
    policy: KeyPolicy,
    pages: BTreeMap<String, VisitState>,
}

impl VisitedRegistry {
    /// Creates an empty registry scoped to the seed's host
    pub fn new(seed: &Url, policy: KeyPolicy) -> Result<Self> {
        let host =
            scope_host(seed).ok_or_else(|| AuditError::MissingHost(seed.to_string()))?;

        Ok(Self {
            scope_host: host,
            policy,
            pages: BTreeMap::new(),
        })
    }

    /// Offers a candidate address for admission.
    ///
    /// Admission succeeds only when the candidate's host matches the scope
    /// host and its identity key has never been seen before. Returns the
    /// admitted key so the caller can queue the page; `None` means the
    /// candidate was out of scope or already known, and nothing changed.
    pub fn try_admit(&mut self, candidate: &Url) -> Option<String> {
        let host = scope_host(candidate)?;
        if host != self.scope_host {
            return None;
        }

        match self.pages.entry(page_key(candidate, self.policy)) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                let admitted = slot.key().clone();
                slot.insert(VisitState::Pending);
                Some(admitted)
            }
        }
    }

    /// Records that the page behind `key` has had its fetch attempt
    pub fn mark_fetched(&mut self, key: &str) {
        if let Some(state) = self.pages.get_mut(key) {
            *state = VisitState::Fetched;
        }
    }

    /// Current state of a key, if it was ever admitted
    pub fn state_of(&self, key: &str) -> Option<VisitState> {
        self.pages.get(key).copied()
    }

    /// All admitted keys in ascending lexicographic order
    pub fn page_keys(&self) -> Vec<String> {
        self.pages.keys().cloned().collect()
    }

    /// The host every admitted page shares
    pub fn scope_host(&self) -> &str {
        &self.scope_host
    }

    /// Number of admitted pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when nothing has been admitted yet
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
