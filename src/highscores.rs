//! High score leaderboard system
//!
//! Process-lifetime only; tracks the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Rows climbed
    pub score: u32,
    /// World seed, so the run can be replayed
    pub seed: u64,
    /// Ticks the run lasted
    pub ticks: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u32) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().is_none_or(|e| score > e.score)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u32, seed: u64, ticks: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, seed, ticks };

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);
        log::info!("new high score {} (rank {})", score, rank);

        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Best score so far, 0 when empty
    pub fn top_score(&self) -> u32 {
        self.entries.first().map_or(0, |e| e.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_never_qualifies() {
        let scores = HighScores::new();
        assert!(!scores.qualifies(0));
        assert!(scores.qualifies(1));
    }

    #[test]
    fn test_ranks_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 1, 100), Some(1));
        assert_eq!(scores.add_score(9, 2, 100), Some(1));
        assert_eq!(scores.add_score(7, 3, 100), Some(2));
        assert_eq!(scores.add_score(5, 4, 100), Some(4));
        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![9, 7, 5, 5]);
        assert_eq!(scores.top_score(), 9);
    }

    #[test]
    fn test_table_is_capped() {
        let mut scores = HighScores::new();
        for s in 1..=MAX_HIGH_SCORES as u32 {
            scores.add_score(s, 0, 0);
        }
        assert!(!scores.qualifies(1));
        assert_eq!(scores.add_score(1, 0, 0), None);
        assert_eq!(scores.add_score(100, 0, 0), Some(1));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().unwrap().score, 2);
    }
}
