//! Session results
//!
//! Tracks the last five scores (most recent first) and the five best scores
//! (strictly descending). Results live in memory for the session only.

use serde::{Deserialize, Serialize};

/// Length of both result lists
pub const MAX_RESULTS: usize = 5;

/// Last and best results of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ResultsHistory {
    last: Vec<u64>,
    best: Vec<u64>,
}

impl ResultsHistory {
    /// Create empty history
    pub fn new() -> Self {
        Self {
            last: Vec::with_capacity(MAX_RESULTS),
            best: Vec::with_capacity(MAX_RESULTS),
        }
    }

    /// Most recent results first
    pub fn last(&self) -> &[u64] {
        &self.last
    }

    /// Best results, highest first
    pub fn best(&self) -> &[u64] {
        &self.best
    }

    /// Check if a score would enter the best results
    pub fn qualifies(&self, score: u64) -> bool {
        if self.best.contains(&score) {
            return false;
        }
        if self.best.len() < MAX_RESULTS {
            return true;
        }
        // Beats the lowest entry
        self.best.last().is_none_or(|&lowest| score > lowest)
    }

    /// Record a finished game
    ///
    /// Returns the rank reached in the best results (1-indexed), or None if
    /// the score didn't qualify.
    pub fn record(&mut self, score: u64) -> Option<usize> {
        self.last.insert(0, score);
        self.last.truncate(MAX_RESULTS);

        if !self.qualifies(score) {
            return None;
        }

        // Insertion point keeps the list sorted descending
        let pos = self
            .best
            .iter()
            .position(|&s| score > s)
            .unwrap_or(self.best.len());
        self.best.insert(pos, score);
        self.best.truncate(MAX_RESULTS);

        Some(pos + 1)
    }

    /// Top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.best.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }
}
