//! Presentation port: everything the session wants shown or heard.
//!
//! The session never draws or plays audio itself. It reports what happened
//! through a [`PresentationPort`]; the terminal front end turns events into
//! sounds and effects, tests simply collect them.

use super::types::{ClockUrgency, Target, TargetKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A target started rising out of a hole.
    TargetAppeared { hole: usize, kind: TargetKind },
    MoleHit { hole: usize, points: i64, combo: u32 },
    BombHit {
        hole: usize,
        points: i64,
        time_penalty: u32,
    },
    /// Full-screen flash after a bomb hit.
    ScreenFlash,
    /// Combo reached a multiple of the combo step.
    ComboCelebration { combo: u32 },
    /// The combo banner should disappear.
    ComboHidden,
    /// A target left the board. The target is handed over so its sprite
    /// parts can play the sink animation and be dropped together.
    TargetRemoved { target: Target, was_hit: bool },
    ClockTicked {
        remaining: u32,
        urgency: ClockUrgency,
    },
    /// Time ran out. Results follow after a short delay.
    TimeUp { final_score: i64 },
    /// The post-session delay elapsed; show results.
    Finished { final_score: i64 },
}

pub trait PresentationPort {
    fn present(&mut self, event: SessionEvent);
}

/// Headless port that records events in order.
impl PresentationPort for Vec<SessionEvent> {
    fn present(&mut self, event: SessionEvent) {
        self.push(event);
    }
}
