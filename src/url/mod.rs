//! URL handling module for refwalk
//!
//! This module turns raw `href` strings into absolute candidate addresses and
//! reduces addresses to the identity key and scope host used by the visited
//! registry.

mod resolve;
mod scope;

// Re-export main functions
pub use resolve::resolve_candidates;
pub use scope::{page_key, requalify, scope_host};

/// Controls how much of an address participates in its identity key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyPolicy {
    /// Identity is the path alone; `/page?a=1` and `/page?a=2` are one page
    #[default]
    PathOnly,
    /// Identity is the path plus its query string
    PathAndQuery,
}

impl KeyPolicy {
    /// Maps the `distinct-queries` switch onto a key policy
    pub fn from_distinct_queries(distinct: bool) -> Self {
        if distinct {
            Self::PathAndQuery
        } else {
            Self::PathOnly
        }
    }
}
