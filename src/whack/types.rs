//! Mole Panic session data structures.
//!
//! A 30-second reaction game on a 3x3 board of holes. Moles pop up and
//! must be hit for points; bombs pop up too and cost points and time if hit.

use crate::core::constants::*;
use crate::core::timers::{TimerId, TimerQueue};
use rand::Rng;

/// Difficulty tiers, selected from the session clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    /// Select the tier for the given remaining time out of `total` seconds.
    ///
    /// The last seconds are always the rush tier, even if the elapsed-time
    /// rule would also match.
    pub fn for_remaining(remaining_secs: u32, total_secs: u32) -> Self {
        let elapsed = total_secs.saturating_sub(remaining_secs);
        if remaining_secs <= RUSH_REMAINING_SECS {
            Self::Hard
        } else if elapsed >= MEDIUM_ELAPSED_SECS {
            Self::Medium
        } else {
            Self::Easy
        }
    }

    /// Delay between spawn attempts.
    pub fn spawn_interval_ms(&self) -> u64 {
        match self {
            Self::Easy => EASY_SPAWN_INTERVAL_MS,
            Self::Medium => MEDIUM_SPAWN_INTERVAL_MS,
            Self::Hard => HARD_SPAWN_INTERVAL_MS,
        }
    }

    /// Maximum number of targets on the board at once.
    pub fn max_active(&self) -> usize {
        match self {
            Self::Easy => EASY_MAX_ACTIVE,
            Self::Medium => MEDIUM_MAX_ACTIVE,
            Self::Hard => HARD_MAX_ACTIVE,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Warm-up",
            Self::Medium => "Busy",
            Self::Hard => "Rush!",
        }
    }
}

/// How urgent the countdown looks. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockUrgency {
    Calm,
    Warning,
    Critical,
}

impl ClockUrgency {
    pub fn for_remaining(remaining_secs: u32) -> Self {
        if remaining_secs <= CLOCK_CRITICAL_SECS {
            Self::Critical
        } else if remaining_secs <= CLOCK_WARNING_SECS {
            Self::Warning
        } else {
            Self::Calm
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Mole,
    Bomb,
}

impl TargetKind {
    /// Weighted coin flip: mostly moles, sometimes bombs.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        if rng.gen::<f64>() < MOLE_SPAWN_RATE {
            Self::Mole
        } else {
            Self::Bomb
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u64);

/// How a sprite part is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartLook {
    Ear,
    Eye,
    /// Knocked-out "x" eye after a hit.
    EyeCrossed,
    Cheek,
    Nose,
    Smile,
    Frown,
    Paw,
    Fuse,
    Spark,
}

/// One auxiliary sprite part, positioned relative to the target's body.
///
/// `dx` is columns from the body's centre column, `dy` rows from the body's
/// top row (negative = above the body).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Part {
    pub dx: i16,
    pub dy: i16,
    pub look: PartLook,
}

impl Part {
    const fn new(dx: i16, dy: i16, look: PartLook) -> Self {
        Self { dx, dy, look }
    }
}

/// Auxiliary visual parts owned by a target and dropped with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetParts {
    Mole {
        ears: [Part; 2],
        eyes: [Part; 2],
        cheeks: [Part; 2],
        nose: Part,
        mouth: Part,
        paws: [Part; 2],
    },
    Bomb {
        fuse: Part,
        spark: Part,
    },
}

impl TargetParts {
    pub fn for_kind(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Mole => Self::Mole {
                ears: [
                    Part::new(-3, -1, PartLook::Ear),
                    Part::new(3, -1, PartLook::Ear),
                ],
                eyes: [
                    Part::new(-2, 0, PartLook::Eye),
                    Part::new(2, 0, PartLook::Eye),
                ],
                cheeks: [
                    Part::new(-3, 1, PartLook::Cheek),
                    Part::new(3, 1, PartLook::Cheek),
                ],
                nose: Part::new(0, 1, PartLook::Nose),
                mouth: Part::new(0, 2, PartLook::Smile),
                paws: [
                    Part::new(-2, 3, PartLook::Paw),
                    Part::new(2, 3, PartLook::Paw),
                ],
            },
            TargetKind::Bomb => Self::Bomb {
                fuse: Part::new(1, -1, PartLook::Fuse),
                spark: Part::new(2, -2, PartLook::Spark),
            },
        }
    }

    /// Swap a mole's face to crossed eyes and a frown. Bombs are unchanged.
    pub fn knock_out(&mut self) {
        if let Self::Mole { eyes, mouth, .. } = self {
            for eye in eyes.iter_mut() {
                eye.look = PartLook::EyeCrossed;
            }
            mouth.look = PartLook::Frown;
        }
    }

    /// All parts, back to front.
    pub fn parts(&self) -> Vec<Part> {
        match self {
            Self::Mole {
                ears,
                eyes,
                cheeks,
                nose,
                mouth,
                paws,
            } => {
                let mut all = Vec::with_capacity(10);
                all.extend_from_slice(ears);
                all.extend_from_slice(eyes);
                all.extend_from_slice(cheeks);
                all.push(*nose);
                all.push(*mouth);
                all.extend_from_slice(paws);
                all
            }
            Self::Bomb { fuse, spark } => vec![*fuse, *spark],
        }
    }
}

/// A spawned mole or bomb sitting in a hole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub id: TargetId,
    pub hole: usize,
    pub kind: TargetKind,
    /// Pending auto-expire timer; cleared once the target is resolved.
    pub expire_timer: Option<TimerId>,
    /// True until the target is hit or expires. Flips exactly once.
    pub active: bool,
    /// Session clock time the target appeared (drives the rise animation).
    pub spawned_at_ms: u64,
    pub parts: TargetParts,
}

/// One of the nine holes on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hole {
    pub target: Option<TargetId>,
}

impl Hole {
    pub fn is_occupied(&self) -> bool {
        self.target.is_some()
    }
}

/// Row and column of a hole index (row-major from the top-left).
pub fn hole_position(hole: usize) -> (usize, usize) {
    (hole / GRID_COLS, hole % GRID_COLS)
}

/// Timer payloads multiplexed on the session's timer queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTimer {
    ClockTick,
    SpawnTick,
    Expire(TargetId),
    HideCombo,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Playing,
    /// Time is up; waiting out the short delay before results.
    Ending,
    Finished,
    /// Player walked away; no result is recorded.
    Abandoned,
}

/// Main session state.
#[derive(Debug, Clone)]
pub struct WhackSession {
    pub score: i64,
    pub time_remaining: u32,
    pub duration: u32,
    pub combo: u32,
    /// Combo value currently celebrated on screen, if any.
    pub combo_banner: Option<u32>,
    pub targets: Vec<Target>,
    pub holes: [Hole; HOLE_COUNT],
    pub phase: SessionPhase,
    pub forfeit_pending: bool,

    pub timers: TimerQueue<SessionTimer>,
    pub(crate) clock_timer: Option<TimerId>,
    pub(crate) spawn_timer: Option<TimerId>,
    pub(crate) combo_hide_timer: Option<TimerId>,
    next_target_id: u64,
}

impl Default for WhackSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WhackSession {
    /// Create a session and start its clock and spawn timers.
    pub fn new() -> Self {
        Self::with_duration(GAME_DURATION_SECS)
    }

    pub fn with_duration(duration: u32) -> Self {
        let mut timers = TimerQueue::new();
        let clock_timer = timers.every(CLOCK_TICK_MS, SessionTimer::ClockTick);
        let first_tier = DifficultyTier::for_remaining(duration, duration);
        let spawn_timer = timers.after(first_tier.spawn_interval_ms(), SessionTimer::SpawnTick);

        Self {
            score: 0,
            time_remaining: duration,
            duration,
            combo: 0,
            combo_banner: None,
            targets: Vec::new(),
            holes: [Hole::default(); HOLE_COUNT],
            phase: SessionPhase::Playing,
            forfeit_pending: false,

            timers,
            clock_timer: Some(clock_timer),
            spawn_timer: Some(spawn_timer),
            combo_hide_timer: None,
            next_target_id: 0,
        }
    }

    /// Session clock in milliseconds since the session began.
    pub fn now_ms(&self) -> u64 {
        self.timers.now()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.duration.saturating_sub(self.time_remaining)
    }

    pub fn current_tier(&self) -> DifficultyTier {
        DifficultyTier::for_remaining(self.time_remaining, self.duration)
    }

    pub fn urgency(&self) -> ClockUrgency {
        ClockUrgency::for_remaining(self.time_remaining)
    }

    pub fn is_playing(&self) -> bool {
        self.phase == SessionPhase::Playing
    }

    pub fn active_count(&self) -> usize {
        self.targets.iter().filter(|t| t.active).count()
    }

    /// Indices of holes with nothing in them.
    pub fn free_holes(&self) -> Vec<usize> {
        self.holes
            .iter()
            .enumerate()
            .filter(|(_, h)| !h.is_occupied())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    /// The target currently sitting in a hole, if any.
    pub fn target_in_hole(&self, hole: usize) -> Option<&Target> {
        let id = self.holes.get(hole)?.target?;
        self.target(id)
    }

    pub(crate) fn next_id(&mut self) -> TargetId {
        let id = TargetId(self.next_target_id);
        self.next_target_id += 1;
        id
    }
}
