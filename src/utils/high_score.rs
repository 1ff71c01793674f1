//! The persisted best score.

use super::persistence::KeyValueStore;
use crate::core::constants::HIGH_SCORE_KEY;
use std::io;

/// Best-score record on top of a key-value store.
#[derive(Debug)]
pub struct HighScores<S> {
    store: S,
}

impl<S: KeyValueStore> HighScores<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored best score, or 0 if nothing usable is stored.
    pub fn get_high_score(&self) -> i64 {
        match self.store.get(HIGH_SCORE_KEY) {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                log::warn!("unreadable high score {:?}, treating as 0", raw);
                0
            }),
            None => 0,
        }
    }

    /// Store `score` if it beats the current best. Returns true on a new record.
    pub fn set_high_score(&mut self, score: i64) -> io::Result<bool> {
        if score > self.get_high_score() {
            self.store.set(HIGH_SCORE_KEY, &score.to_string())?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
