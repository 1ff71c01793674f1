//! End-of-session evaluation and high score bookkeeping.

use crate::core::constants::{EVAL_MASTER_SCORE, EVAL_SKILLED_SCORE};
use crate::utils::high_score::HighScores;
use crate::utils::persistence::KeyValueStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Beginner,
    Skilled,
    Master,
}

/// The mole's expression on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoleMood {
    /// The moles won. Big grin.
    Smug,
    /// Wide eyes, round mouth.
    Surprised,
    /// Crossed eyes and sweat: the player won.
    Defeated,
}

impl Evaluation {
    pub fn from_score(score: i64) -> Self {
        if score < EVAL_SKILLED_SCORE {
            Self::Beginner
        } else if score < EVAL_MASTER_SCORE {
            Self::Skilled
        } else {
            Self::Master
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Beginner => "Try harder!",
            Self::Skilled => "Pretty handy!",
            Self::Master => "Mole Master!",
        }
    }

    pub fn mood(&self) -> MoleMood {
        match self {
            Self::Beginner => MoleMood::Smug,
            Self::Skilled => MoleMood::Surprised,
            Self::Master => MoleMood::Defeated,
        }
    }
}

/// Everything the result screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResult {
    pub final_score: i64,
    pub high_score: i64,
    pub new_record: bool,
    pub evaluation: Evaluation,
}

impl SessionResult {
    /// Evaluate a finished session and update the stored best score.
    ///
    /// A failed write is logged; the outcome is still reported as if it had
    /// been saved.
    pub fn record<S: KeyValueStore>(final_score: i64, scores: &mut HighScores<S>) -> Self {
        let previous = scores.get_high_score();
        let new_record = match scores.set_high_score(final_score) {
            Ok(new_record) => new_record,
            Err(e) => {
                log::warn!("could not save high score {}: {}", final_score, e);
                final_score > previous
            }
        };
        if new_record {
            log::info!("new high score {} (was {})", final_score, previous);
        }

        Self {
            final_score,
            high_score: previous.max(final_score),
            new_record,
            evaluation: Evaluation::from_score(final_score),
        }
    }
}
