//! Integration test: a Mole Panic session driven through the public API
//!
//! Plays whole sessions on the virtual clock with a seeded RNG and checks
//! the scoring, combo, bomb and end-of-session rules end to end.

use mole_panic::core::constants::*;
use mole_panic::whack::{
    advance, hit_hole, process_input, spawn_target, DifficultyTier, SessionEvent, SessionPhase,
    TargetKind, WhackInput, WhackSession,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Advance in frame-sized steps, hitting every mole that is up.
fn play_hitting_moles(session: &mut WhackSession, rng: &mut ChaCha8Rng) -> Vec<SessionEvent> {
    let mut events = Vec::new();
    for _ in 0..10_000 {
        if session.phase == SessionPhase::Finished {
            break;
        }
        advance(session, FRAME_INTERVAL_MS, rng, &mut events);

        let tier = session.current_tier();
        assert!(
            session.active_count() <= tier.max_active(),
            "{} targets up in {:?}",
            session.active_count(),
            tier
        );

        let moles: Vec<usize> = session
            .targets
            .iter()
            .filter(|t| t.active && t.kind == TargetKind::Mole)
            .map(|t| t.hole)
            .collect();
        for hole in moles {
            process_input(session, WhackInput::Hit(hole), &mut events);
        }
    }
    events
}

// ── Full session ─────────────────────────────────────────────────────

#[test]
fn test_full_session_hitting_only_moles() {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut session = WhackSession::new();
    let events = play_hitting_moles(&mut session, &mut rng);

    assert_eq!(session.phase, SessionPhase::Finished);
    assert_eq!(session.time_remaining, 0);
    assert!(session.score > 0);
    assert_eq!(session.score % MOLE_SCORE, 0);
    assert!(session.targets.is_empty());

    let hits = events
        .iter()
        .filter(|e| matches!(e, SessionEvent::MoleHit { .. }))
        .count() as i64;
    assert_eq!(session.score, hits * MOLE_SCORE);

    // Time up exactly once, then finished exactly once, in that order
    let time_up = events
        .iter()
        .position(|e| matches!(e, SessionEvent::TimeUp { .. }))
        .unwrap();
    let finished = events
        .iter()
        .position(|e| matches!(e, SessionEvent::Finished { .. }))
        .unwrap();
    assert!(time_up < finished);
    assert_eq!(finished, events.len() - 1);
}

#[test]
fn test_session_finishes_one_second_after_time_up() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut session = WhackSession::new();
    let mut events = Vec::new();

    advance(&mut session, 30_000, &mut rng, &mut events);
    assert_eq!(session.phase, SessionPhase::Ending);
    assert!(session.targets.is_empty());

    advance(&mut session, 999, &mut rng, &mut events);
    assert_eq!(session.phase, SessionPhase::Ending);

    advance(&mut session, 1, &mut rng, &mut events);
    assert_eq!(session.phase, SessionPhase::Finished);
    assert_eq!(
        events.last(),
        Some(&SessionEvent::Finished { final_score: 0 })
    );
}

#[test]
fn test_no_spawns_after_time_up() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut session = WhackSession::new();
    let mut events = Vec::new();
    advance(&mut session, 30_000, &mut rng, &mut events);

    let mut after = Vec::new();
    advance(&mut session, 1_000, &mut rng, &mut after);
    assert!(!after
        .iter()
        .any(|e| matches!(e, SessionEvent::TargetAppeared { .. })));
}

// ── Difficulty ───────────────────────────────────────────────────────

#[test]
fn test_tiers_follow_the_clock() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let mut session = WhackSession::new();
    let mut events = Vec::new();

    assert_eq!(session.current_tier(), DifficultyTier::Easy);
    advance(&mut session, 15_000, &mut rng, &mut events);
    assert_eq!(session.time_remaining, 15);
    assert_eq!(session.current_tier(), DifficultyTier::Medium);
    advance(&mut session, 10_000, &mut rng, &mut events);
    assert_eq!(session.time_remaining, 5);
    assert_eq!(session.current_tier(), DifficultyTier::Hard);
}

// ── Bombs ────────────────────────────────────────────────────────────

#[test]
fn test_bomb_in_last_seconds_ends_session() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut session = WhackSession::new();
    let mut events = Vec::new();
    session.time_remaining = 2;

    spawn_target(&mut session, 0, TargetKind::Bomb, &mut events);
    assert!(hit_hole(&mut session, 0, &mut events));

    assert_eq!(session.time_remaining, 0);
    assert_eq!(session.score, BOMB_PENALTY_SCORE);
    assert_eq!(session.phase, SessionPhase::Ending);
    assert!(events
        .iter()
        .any(|e| *e == SessionEvent::TimeUp { final_score: -200 }));

    advance(&mut session, RESULT_DELAY_MS, &mut rng, &mut events);
    assert_eq!(session.phase, SessionPhase::Finished);
}

#[test]
fn test_bomb_breaks_combo_and_costs_time() {
    let mut session = WhackSession::new();
    let mut events = Vec::new();

    spawn_target(&mut session, 1, TargetKind::Mole, &mut events);
    spawn_target(&mut session, 2, TargetKind::Mole, &mut events);
    spawn_target(&mut session, 3, TargetKind::Bomb, &mut events);
    hit_hole(&mut session, 1, &mut events);
    hit_hole(&mut session, 2, &mut events);
    assert_eq!(session.combo, 2);

    hit_hole(&mut session, 3, &mut events);
    assert_eq!(session.combo, 0);
    assert_eq!(session.score, 2 * MOLE_SCORE + BOMB_PENALTY_SCORE);
    assert_eq!(session.time_remaining, GAME_DURATION_SECS - BOMB_PENALTY_SECS);
}

// ── Combos ───────────────────────────────────────────────────────────

#[test]
fn test_combo_celebrated_every_five_hits() {
    let mut session = WhackSession::new();
    let mut events = Vec::new();

    for _ in 0..10 {
        spawn_target(&mut session, 4, TargetKind::Mole, &mut events);
        hit_hole(&mut session, 4, &mut events);
    }

    let celebrations: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::ComboCelebration { combo } => Some(*combo),
            _ => None,
        })
        .collect();
    assert_eq!(celebrations, vec![5, 10]);
    assert_eq!(session.combo_banner, Some(10));
    assert_eq!(session.score, 10 * MOLE_SCORE);
}

#[test]
fn test_missed_mole_resets_combo() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut session = WhackSession::new();
    let mut events = Vec::new();

    for _ in 0..5 {
        spawn_target(&mut session, 4, TargetKind::Mole, &mut events);
        hit_hole(&mut session, 4, &mut events);
    }
    assert_eq!(session.combo_banner, Some(5));

    spawn_target(&mut session, 0, TargetKind::Mole, &mut events);
    advance(&mut session, MOLE_SHOW_TIME_MS, &mut rng, &mut events);

    assert_eq!(session.combo, 0);
    assert_eq!(session.combo_banner, None);
    assert!(events.contains(&SessionEvent::ComboHidden));
}

// ── Forfeit ──────────────────────────────────────────────────────────

#[test]
fn test_forfeit_freezes_clock_until_resolved() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut session = WhackSession::new();
    let mut events = Vec::new();

    process_input(&mut session, WhackInput::Forfeit, &mut events);
    advance(&mut session, 5_000, &mut rng, &mut events);
    assert_eq!(session.time_remaining, GAME_DURATION_SECS);

    process_input(&mut session, WhackInput::Other, &mut events);
    advance(&mut session, 5_000, &mut rng, &mut events);
    assert_eq!(session.time_remaining, GAME_DURATION_SECS - 5);

    process_input(&mut session, WhackInput::Forfeit, &mut events);
    process_input(&mut session, WhackInput::Forfeit, &mut events);
    assert_eq!(session.phase, SessionPhase::Abandoned);
    assert!(!advance(&mut session, 5_000, &mut rng, &mut events));
}
