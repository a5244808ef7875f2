//! Fuzzy search over store entries.
//!
//! Scores every entry path yielded by the traverser and keeps those strictly
//! above the threshold. Results are ranked by descending score; equal scores
//! are ordered by path so the output is stable for equal inputs.

use tracing::debug;

use crate::core::domain::{Entry, MatchResult};
use crate::core::matcher;
use crate::core::store::{StoreLocation, StoreTraverser};
use crate::error::Result;

/// Composes traversal and scoring.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    traverser: StoreTraverser,
}

impl SearchEngine {
    pub fn new(traverser: StoreTraverser) -> Self {
        Self { traverser }
    }

    pub fn traverser(&self) -> &StoreTraverser {
        &self.traverser
    }

    /// Search the store for entries matching `query`.
    ///
    /// # Arguments
    ///
    /// * `location` - Store to search
    /// * `query` - Text typed by the user
    /// * `threshold` - Entries must score strictly above this
    ///
    /// # Returns
    ///
    /// Matches ranked best first. Unreadable subtrees are skipped.
    ///
    /// # Errors
    ///
    /// Returns `Error::AccessDenied` if the store cannot be accessed.
    pub fn search(
        &self,
        location: &StoreLocation,
        query: &str,
        threshold: f64,
    ) -> Result<Vec<MatchResult>> {
        let scope = location.acquire()?;
        let results = rank(self.traverser.walk(scope), query, threshold);
        debug!(matches = results.len(), threshold, "search finished");
        Ok(results)
    }
}

/// Score and rank candidate entries.
pub fn rank(
    candidates: impl IntoIterator<Item = Entry>,
    query: &str,
    threshold: f64,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = candidates
        .into_iter()
        .filter_map(|entry| {
            let score = matcher::score(entry.path(), query);
            (score > threshold).then_some(MatchResult { entry, score })
        })
        .collect();

    results.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.entry.cmp(&b.entry))
    });
    results
}
