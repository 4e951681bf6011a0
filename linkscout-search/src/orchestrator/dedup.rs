//! Result deduplication by URL.
//!
//! The URL string is the identity of a result: two results are duplicates
//! exactly when their `url` fields are equal. The first occurrence wins and
//! relative order is preserved.

use std::collections::HashSet;

use crate::types::SearchResult;

/// Incremental first-seen filter over result URLs.
#[derive(Debug, Default)]
pub struct UrlDeduplicator {
    seen: HashSet<String>,
}

impl UrlDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `url`. Returns `true` if it had not been seen before.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_owned())
    }

    /// Number of distinct URLs seen so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Drop every result whose URL already appeared earlier in `results`.
pub fn deduplicate(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen = UrlDeduplicator::new();
    results
        .into_iter()
        .filter(|result| seen.insert(&result.url))
        .collect()
}
