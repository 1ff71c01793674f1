//! Utility modules: build info, logging, persistence, high score.

pub mod build_info;
pub mod high_score;
pub mod logging;
pub mod persistence;

pub use high_score::HighScores;
pub use persistence::{JsonFileStore, KeyValueStore, MemoryStore};
