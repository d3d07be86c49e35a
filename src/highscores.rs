//! High score leaderboard system
//!
//! Persisted through the storage backend, tracks the top 10 scores.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::persistence::{self, PersistenceError};
use crate::platform::Storage;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Player's name as entered (trimmed)
    pub name: String,
    /// Bricks destroyed
    pub score: u32,
}

/// Rejected leaderboard insert
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("please enter a name")]
    EmptyName,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Storage key
    const STORAGE_KEY: &'static str = "brickout_highscores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score would survive the cut
    pub fn qualifies(&self, score: u32) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties with the lowest entry lose: the newcomer sorts after it
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if doesn't qualify)
    pub fn potential_rank(&self, score: u32) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert an entry, keep the list sorted and capped.
    ///
    /// Returns the rank achieved (1-indexed), or None if the entry fell off the
    /// bottom. Duplicate names and scores are allowed.
    pub fn add_score(&mut self, name: &str, score: u32) -> Result<Option<usize>, EntryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EntryError::EmptyName);
        }

        // Insertion point after every entry with an equal or higher score, the
        // same slot an append followed by a stable sort would produce
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        if pos >= MAX_HIGH_SCORES {
            return Ok(None);
        }

        self.entries.insert(
            pos,
            HighScoreEntry {
                name: name.to_string(),
                score,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Ok(Some(pos + 1))
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load high scores from storage
    pub fn load(storage: &dyn Storage) -> Self {
        let mut scores: Self = persistence::load_or_default(storage, Self::STORAGE_KEY);
        // Stored data may be unsorted or oversized
        scores.entries.sort_by(|a, b| b.score.cmp(&a.score));
        scores.entries.truncate(MAX_HIGH_SCORES);
        scores
    }

    /// Save high scores to storage
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), PersistenceError> {
        persistence::save(storage, Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;

    fn full_board() -> HighScores {
        let mut scores = HighScores::new();
        for i in 0..MAX_HIGH_SCORES as u32 {
            scores.add_score(&format!("P{i}"), 20 + i).unwrap();
        }
        scores
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        scores.add_score("a", 5).unwrap();
        scores.add_score("b", 9).unwrap();
        scores.add_score("c", 7).unwrap();
        let order: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(order, vec![9, 7, 5]);
        assert_eq!(scores.top_score(), Some(9));
    }

    #[test]
    fn test_low_score_falls_off_full_board() {
        let mut scores = full_board();
        let before = scores.clone();
        assert!(!scores.qualifies(12));
        assert_eq!(scores.add_score("Ada", 12), Ok(None));
        assert_eq!(scores, before);
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_high_score_pushes_out_lowest() {
        let mut scores = full_board();
        assert_eq!(scores.potential_rank(25), Some(6));
        assert_eq!(scores.add_score("Ada", 25), Ok(Some(6)));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.score), Some(21));
        assert_eq!(scores.entries[5].name, "Ada");
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut scores = full_board();
        let before = scores.clone();
        assert_eq!(scores.add_score("", 99), Err(EntryError::EmptyName));
        assert_eq!(scores.add_score("   \t", 99), Err(EntryError::EmptyName));
        assert_eq!(scores, before);
    }

    #[test]
    fn test_name_trimmed_and_ties_keep_order() {
        let mut scores = HighScores::new();
        scores.add_score("first", 10).unwrap();
        assert_eq!(scores.add_score("  second ", 10), Ok(Some(2)));
        assert_eq!(scores.entries[0].name, "first");
        assert_eq!(scores.entries[1].name, "second");
    }

    #[test]
    fn test_duplicates_allowed() {
        let mut scores = HighScores::new();
        scores.add_score("Ada", 3).unwrap();
        scores.add_score("Ada", 3).unwrap();
        assert_eq!(scores.entries.len(), 2);
    }

    #[test]
    fn test_empty_board_qualifies_anything() {
        let scores = HighScores::new();
        assert!(scores.is_empty());
        assert!(scores.qualifies(0));
        assert_eq!(scores.potential_rank(0), Some(1));
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let scores = full_board();
        scores.save(&mut storage).unwrap();
        assert_eq!(HighScores::load(&storage), scores);
    }

    #[test]
    fn test_load_normalizes_order() {
        let mut storage = MemoryStorage::new();
        let unsorted = HighScores {
            entries: vec![
                HighScoreEntry {
                    name: "low".to_string(),
                    score: 1,
                },
                HighScoreEntry {
                    name: "high".to_string(),
                    score: 50,
                },
            ],
        };
        unsorted.save(&mut storage).unwrap();
        let loaded = HighScores::load(&storage);
        assert_eq!(loaded.entries[0].name, "high");
    }
}
