//! Mole Panic session logic: spawn scheduling, hit resolution, expiry,
//! session clock.

use super::port::{PresentationPort, SessionEvent};
use super::types::*;
use crate::core::constants::*;
use rand::seq::SliceRandom;
use rand::Rng;

/// UI-agnostic input actions for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhackInput {
    /// Strike a hole (keypad key or mouse click).
    Hit(usize),
    Forfeit, // Esc
    Other,   // Any other key (cancels forfeit_pending)
}

/// Process player input.
pub fn process_input<P: PresentationPort>(
    session: &mut WhackSession,
    input: WhackInput,
    port: &mut P,
) {
    if !session.is_playing() {
        return;
    }

    match input {
        WhackInput::Hit(hole) => {
            if session.forfeit_pending {
                session.forfeit_pending = false; // Cancel forfeit
            } else {
                hit_hole(session, hole, port);
            }
        }
        WhackInput::Forfeit => {
            if session.forfeit_pending {
                abandon_session(session);
            } else {
                session.forfeit_pending = true;
            }
        }
        WhackInput::Other => {
            session.forfeit_pending = false;
        }
    }
}

/// Advance the session clock by `dt_ms`, firing every timer that comes due
/// in deadline order. Returns true if any timer fired.
///
/// The clock is frozen while a forfeit confirmation is pending.
pub fn advance<R: Rng, P: PresentationPort>(
    session: &mut WhackSession,
    dt_ms: u64,
    rng: &mut R,
    port: &mut P,
) -> bool {
    if matches!(
        session.phase,
        SessionPhase::Finished | SessionPhase::Abandoned
    ) || session.forfeit_pending
    {
        return false;
    }

    let until = session.timers.now() + dt_ms;
    let mut fired = false;
    while let Some((_, timer)) = session.timers.pop_due(until) {
        fired = true;
        match timer {
            SessionTimer::ClockTick => clock_tick(session, port),
            SessionTimer::SpawnTick => spawn_tick(session, rng, port),
            SessionTimer::Expire(id) => {
                expire_target(session, id, port);
            }
            SessionTimer::HideCombo => {
                session.combo_hide_timer = None;
                hide_combo_banner(session, port);
            }
            SessionTimer::Finish => {
                session.phase = SessionPhase::Finished;
                port.present(SessionEvent::Finished {
                    final_score: session.score,
                });
            }
        }
    }
    session.timers.settle(until);
    fired
}

/// One-second countdown tick.
fn clock_tick<P: PresentationPort>(session: &mut WhackSession, port: &mut P) {
    if !session.is_playing() {
        return;
    }

    session.time_remaining = session.time_remaining.saturating_sub(1);
    port.present(SessionEvent::ClockTicked {
        remaining: session.time_remaining,
        urgency: session.urgency(),
    });

    if session.time_remaining == 0 {
        end_session(session, port);
    }
}

/// Spawn tick: try to add a target, then schedule the next tick at the
/// (possibly changed) tier interval.
fn spawn_tick<R: Rng, P: PresentationPort>(
    session: &mut WhackSession,
    rng: &mut R,
    port: &mut P,
) {
    session.spawn_timer = None;
    if !session.is_playing() {
        return;
    }

    let tier = session.current_tier();
    try_spawn(session, tier.max_active(), rng, port);

    let interval = session.current_tier().spawn_interval_ms();
    session.spawn_timer = Some(session.timers.after(interval, SessionTimer::SpawnTick));
}

/// Spawn a random target in a random free hole, unless `max_active` targets
/// are already up or the board is full.
pub fn try_spawn<R: Rng, P: PresentationPort>(
    session: &mut WhackSession,
    max_active: usize,
    rng: &mut R,
    port: &mut P,
) -> Option<TargetId> {
    if session.active_count() >= max_active {
        return None;
    }

    let free = session.free_holes();
    let hole = *free.choose(rng)?;
    let kind = TargetKind::roll(rng);
    spawn_target(session, hole, kind, port)
}

/// Put a target of `kind` into `hole` and start its expiry timer.
/// Returns `None` if the hole doesn't exist or is occupied.
pub fn spawn_target<P: PresentationPort>(
    session: &mut WhackSession,
    hole: usize,
    kind: TargetKind,
    port: &mut P,
) -> Option<TargetId> {
    if session.holes.get(hole)?.is_occupied() {
        return None;
    }

    let id = session.next_id();
    let expire_timer = session
        .timers
        .after(MOLE_SHOW_TIME_MS, SessionTimer::Expire(id));

    session.holes[hole].target = Some(id);
    session.targets.push(Target {
        id,
        hole,
        kind,
        expire_timer: Some(expire_timer),
        active: true,
        spawned_at_ms: session.now_ms(),
        parts: TargetParts::for_kind(kind),
    });

    port.present(SessionEvent::TargetAppeared { hole, kind });
    Some(id)
}

/// Strike whatever is in `hole`. Returns true if a target was hit.
pub fn hit_hole<P: PresentationPort>(
    session: &mut WhackSession,
    hole: usize,
    port: &mut P,
) -> bool {
    match session.holes.get(hole).and_then(|h| h.target) {
        Some(id) => hit_target(session, id, port),
        None => false,
    }
}

/// Resolve a hit on an active target. Hits on resolved targets are ignored.
pub fn hit_target<P: PresentationPort>(
    session: &mut WhackSession,
    id: TargetId,
    port: &mut P,
) -> bool {
    if !session.is_playing() {
        return false;
    }
    let Some(mut target) = take_active(session, id) else {
        return false;
    };

    match target.kind {
        TargetKind::Mole => {
            session.score += MOLE_SCORE;
            session.combo += 1;
            port.present(SessionEvent::MoleHit {
                hole: target.hole,
                points: MOLE_SCORE,
                combo: session.combo,
            });

            if session.combo % COMBO_STEP == 0 {
                show_combo_banner(session, port);
            }
            target.parts.knock_out();
        }
        TargetKind::Bomb => {
            session.score += BOMB_PENALTY_SCORE;
            session.time_remaining = session.time_remaining.saturating_sub(BOMB_PENALTY_SECS);
            session.combo = 0;
            port.present(SessionEvent::ScreenFlash);
            port.present(SessionEvent::BombHit {
                hole: target.hole,
                points: BOMB_PENALTY_SCORE,
                time_penalty: BOMB_PENALTY_SECS,
            });
        }
    }

    let bomb = target.kind == TargetKind::Bomb;
    port.present(SessionEvent::TargetRemoved {
        target,
        was_hit: true,
    });

    // A bomb can eat the last seconds; don't wait for the next clock tick.
    if bomb && session.time_remaining == 0 {
        end_session(session, port);
    }
    true
}

/// Resolve an un-hit target (its show time ran out, or the session ended).
///
/// A missed mole breaks the combo; a dodged bomb costs nothing.
pub fn expire_target<P: PresentationPort>(
    session: &mut WhackSession,
    id: TargetId,
    port: &mut P,
) -> bool {
    let Some(target) = take_active(session, id) else {
        return false;
    };

    if target.kind == TargetKind::Mole {
        session.combo = 0;
        hide_combo_banner(session, port);
    }

    port.present(SessionEvent::TargetRemoved {
        target,
        was_hit: false,
    });
    true
}

/// Deactivate a target, cancel its expiry, free its hole and move it out of
/// the active set.
fn take_active(session: &mut WhackSession, id: TargetId) -> Option<Target> {
    let index = session
        .targets
        .iter()
        .position(|t| t.id == id && t.active)?;
    let mut target = session.targets.remove(index);

    target.active = false;
    if let Some(timer) = target.expire_timer.take() {
        session.timers.cancel(timer);
    }
    if let Some(hole) = session.holes.get_mut(target.hole) {
        hole.target = None;
    }
    Some(target)
}

fn show_combo_banner<P: PresentationPort>(session: &mut WhackSession, port: &mut P) {
    if let Some(timer) = session.combo_hide_timer.take() {
        session.timers.cancel(timer);
    }
    session.combo_banner = Some(session.combo);
    session.combo_hide_timer = Some(
        session
            .timers
            .after(COMBO_DISPLAY_MS, SessionTimer::HideCombo),
    );
    port.present(SessionEvent::ComboCelebration {
        combo: session.combo,
    });
}

fn hide_combo_banner<P: PresentationPort>(session: &mut WhackSession, port: &mut P) {
    if let Some(timer) = session.combo_hide_timer.take() {
        session.timers.cancel(timer);
    }
    if session.combo_banner.take().is_some() {
        port.present(SessionEvent::ComboHidden);
    }
}

/// Time is up: stop all scheduling, clear the board, and arm the short
/// delay before results.
fn end_session<P: PresentationPort>(session: &mut WhackSession, port: &mut P) {
    if !session.is_playing() {
        return;
    }
    session.phase = SessionPhase::Ending;
    session.forfeit_pending = false;

    session.timers.cancel_all();
    session.clock_timer = None;
    session.spawn_timer = None;
    session.combo_hide_timer = None;

    let remaining: Vec<TargetId> = session.targets.iter().map(|t| t.id).collect();
    for id in remaining {
        expire_target(session, id, port);
    }
    hide_combo_banner(session, port);

    log::info!("session over, final score {}", session.score);
    port.present(SessionEvent::TimeUp {
        final_score: session.score,
    });
    session.timers.after(RESULT_DELAY_MS, SessionTimer::Finish);
}

/// Walk away from a session. Nothing is recorded.
fn abandon_session(session: &mut WhackSession) {
    session.timers.cancel_all();
    session.clock_timer = None;
    session.spawn_timer = None;
    session.combo_hide_timer = None;
    session.targets.clear();
    for hole in session.holes.iter_mut() {
        hole.target = None;
    }
    session.forfeit_pending = false;
    session.phase = SessionPhase::Abandoned;
    log::info!("session abandoned at score {}", session.score);
}
