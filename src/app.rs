//! Application state and the terminal run loop.
//!
//! `App` owns the current screen, the running session, the presentation
//! effects and the high score record. Input and frame ticks come in; the
//! screen transition table decides where they lead.

use crate::audio::{SoundCue, SoundManager};
use crate::core::button::{Button, ButtonAction};
use crate::core::constants::FRAME_INTERVAL_MS;
use crate::core::screens::{transition, Screen, ScreenEvent, Transition};
use crate::input::{map_key, map_mouse, KeyAction, PointerEvent, PointerKind};
use crate::ui::board::hole_at;
use crate::ui::effects::{EffectLayer, EffectType};
use crate::ui::game_common::contains;
use crate::ui::{self, HitMap};
use crate::utils::high_score::HighScores;
use crate::utils::persistence::{JsonFileStore, KeyValueStore};
use crate::whack::{
    advance, process_input, PresentationPort, SessionEvent, SessionPhase, SessionResult,
    WhackInput, WhackSession,
};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Routes session events to sounds and board effects.
struct Presenter<'a> {
    sounds: &'a mut SoundManager,
    effects: &'a mut EffectLayer,
}

impl PresentationPort for Presenter<'_> {
    fn present(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::TargetAppeared { .. } => self.sounds.play(SoundCue::Appear),
            SessionEvent::MoleHit { hole, points, .. } => {
                self.sounds.play(SoundCue::HitMole);
                self.effects.push(EffectType::ScorePopup { hole, points });
                self.effects.push(EffectType::StarBurst { hole });
            }
            SessionEvent::BombHit { hole, points, .. } => {
                self.sounds.play(SoundCue::HitBomb);
                self.effects.push(EffectType::ScorePopup { hole, points });
            }
            SessionEvent::ScreenFlash => self.effects.push(EffectType::ScreenFlash),
            SessionEvent::ComboCelebration { combo } => {
                log::debug!("combo {}", combo);
                self.effects.push(EffectType::ComboPulse);
            }
            SessionEvent::TargetRemoved { target, was_hit } => {
                self.effects.push(EffectType::Sinking { target, was_hit });
            }
            SessionEvent::TimeUp { .. } => self.sounds.play(SoundCue::TimeUp),
            SessionEvent::ComboHidden
            | SessionEvent::ClockTicked { .. }
            | SessionEvent::Finished { .. } => {}
        }
    }
}

pub struct App<S> {
    pub screen: Screen,
    pub start_button: Button,
    pub retry_button: Button,
    pub session: WhackSession,
    pub result: Option<SessionResult>,
    /// Best score as last read from the store.
    pub best: i64,
    pub scores: HighScores<S>,
    pub sounds: SoundManager,
    /// Time spent on the current screen (drives idle animations).
    pub screen_clock_ms: u64,
    pub(crate) effects: EffectLayer,
    pub(crate) hit_map: HitMap,
    rng: StdRng,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(scores: HighScores<S>, sounds: SoundManager, rng: StdRng) -> Self {
        let best = scores.get_high_score();
        Self {
            screen: Screen::Start,
            start_button: Button::new(),
            retry_button: Button::new(),
            session: WhackSession::new(),
            result: None,
            best,
            scores,
            sounds,
            screen_clock_ms: 0,
            effects: EffectLayer::new(),
            hit_map: HitMap::default(),
            rng,
        }
    }

    /// Handle a keyboard action. Returns false when the app should exit.
    pub fn handle_key(&mut self, action: KeyAction) -> bool {
        match self.screen {
            Screen::Start | Screen::Results => match action {
                KeyAction::Activate => {
                    self.sounds.play(SoundCue::Click);
                    self.apply(self.button_event())
                }
                KeyAction::Quit => self.apply(ScreenEvent::Quit),
                _ => true,
            },
            Screen::Playing => {
                let input = match action {
                    KeyAction::Hole(hole) => WhackInput::Hit(hole),
                    KeyAction::Back => WhackInput::Forfeit,
                    _ => WhackInput::Other,
                };
                self.session_input(input)
            }
        }
    }

    /// Handle a mouse event. Returns false when the app should exit.
    pub fn handle_pointer(&mut self, pointer: PointerEvent) -> bool {
        if self.screen == Screen::Playing {
            if pointer.kind != PointerKind::Down {
                return true;
            }
            let hole = self
                .hit_map
                .board
                .and_then(|board| hole_at(board, pointer.column, pointer.row));
            return match hole {
                Some(hole) => self.session_input(WhackInput::Hit(hole)),
                None => true,
            };
        }

        let inside = self
            .hit_map
            .button
            .map_or(false, |area| contains(area, pointer.column, pointer.row));
        let button = if self.screen == Screen::Start {
            &mut self.start_button
        } else {
            &mut self.retry_button
        };

        let action = match pointer.kind {
            PointerKind::Moved => {
                button.pointer_moved(inside);
                ButtonAction::None
            }
            PointerKind::Down => button.pointer_down(inside),
            PointerKind::Up => button.pointer_up(inside),
        };

        match action {
            ButtonAction::Pressed => {
                self.sounds.play(SoundCue::Click);
                true
            }
            ButtonAction::Activated => self.apply(self.button_event()),
            ButtonAction::None => true,
        }
    }

    /// Advance animations and, while playing, the session clock.
    pub fn tick(&mut self, dt_ms: u64) {
        self.screen_clock_ms += dt_ms;
        self.effects.update(dt_ms as f64);

        if self.screen != Screen::Playing {
            return;
        }

        let mut port = Presenter {
            sounds: &mut self.sounds,
            effects: &mut self.effects,
        };
        advance(&mut self.session, dt_ms, &mut self.rng, &mut port);

        if self.session.phase == SessionPhase::Finished {
            let result = SessionResult::record(self.session.score, &mut self.scores);
            self.best = result.high_score;
            self.result = Some(result);
            self.apply(ScreenEvent::SessionFinished);
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.hit_map = ui::draw(frame, self);
    }

    fn session_input(&mut self, input: WhackInput) -> bool {
        let mut port = Presenter {
            sounds: &mut self.sounds,
            effects: &mut self.effects,
        };
        process_input(&mut self.session, input, &mut port);

        if self.session.phase == SessionPhase::Abandoned {
            return self.apply(ScreenEvent::SessionAbandoned);
        }
        true
    }

    /// The event the current screen's button stands for.
    fn button_event(&self) -> ScreenEvent {
        match self.screen {
            Screen::Results => ScreenEvent::RetryPressed,
            _ => ScreenEvent::StartPressed,
        }
    }

    /// Apply a screen event. Returns false on exit.
    fn apply(&mut self, event: ScreenEvent) -> bool {
        match transition(self.screen, event) {
            Transition::Stay => true,
            Transition::Goto(next) => {
                log::info!("{:?} -> {:?} ({:?})", self.screen, next, event);
                self.enter(next);
                true
            }
            Transition::Exit => false,
        }
    }

    fn enter(&mut self, screen: Screen) {
        self.screen = screen;
        self.screen_clock_ms = 0;
        self.hit_map = HitMap::default();

        match screen {
            Screen::Start => {
                self.best = self.scores.get_high_score();
                self.start_button = Button::new();
                self.effects.clear();
            }
            Screen::Playing => {
                self.session = WhackSession::new();
                self.effects.clear();
                self.result = None;
                log::info!("session started");
            }
            Screen::Results => {
                self.retry_button = Button::new();
            }
        }
    }
}

/// Set up the terminal, run the game until the player quits, and restore
/// the terminal even if the loop fails.
pub fn run(muted: bool) -> io::Result<()> {
    let store = JsonFileStore::open_default()?;
    log::info!("high score store at {}", store.path().display());
    let mut app = App::new(
        HighScores::new(store),
        SoundManager::new(muted),
        StdRng::from_entropy(),
    );

    enter_terminal(&mut io::stdout())?;
    let mut terminal = match Terminal::new(CrosstermBackend::new(io::stdout())) {
        Ok(terminal) => terminal,
        Err(e) => {
            if let Err(restore) = leave_terminal(&mut io::stdout()) {
                log::warn!("terminal restore failed: {}", restore);
            }
            return Err(e);
        }
    };

    let result = run_loop(&mut terminal, &mut app);

    let restored = leave_terminal(terminal.backend_mut()).and_then(|()| terminal.show_cursor());
    result.and(restored)
}

/// Raw mode, alternate screen and mouse capture. If any step fails the
/// earlier ones are undone before the error is returned.
fn enter_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    enable_raw_mode()?;
    if let Err(e) = execute!(out, EnterAlternateScreen, EnableMouseCapture) {
        if let Err(restore) = leave_terminal(out) {
            log::warn!("terminal restore failed: {}", restore);
        }
        return Err(e);
    }
    Ok(())
}

/// Undo [`enter_terminal`]. Every step is attempted; the first error wins.
fn leave_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(out, LeaveAlternateScreen, DisableMouseCapture);
    raw.and(screen)
}

fn run_loop<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| app.draw(frame))?;

        let timeout = frame_interval.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            // Drain everything that queued up during the frame
            loop {
                let running = match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        app.handle_key(map_key(key, app.screen))
                    }
                    Event::Mouse(mouse) => map_mouse(mouse).map_or(true, |p| app.handle_pointer(p)),
                    _ => true,
                };
                if !running {
                    log::info!("quit");
                    return Ok(());
                }
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        let elapsed_ms = last_tick.elapsed().as_millis() as u64;
        if elapsed_ms >= FRAME_INTERVAL_MS {
            last_tick += Duration::from_millis(elapsed_ms);
            app.tick(elapsed_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::persistence::MemoryStore;
    use ratatui::layout::Rect;

    fn app() -> App<MemoryStore> {
        App::new(
            HighScores::new(MemoryStore::default()),
            SoundManager::silent(),
            StdRng::seed_from_u64(9),
        )
    }

    #[test]
    fn test_presenter_maps_events_to_effects() {
        let mut sounds = SoundManager::silent();
        let mut effects = EffectLayer::new();
        let mut port = Presenter {
            sounds: &mut sounds,
            effects: &mut effects,
        };
        port.present(SessionEvent::MoleHit {
            hole: 2,
            points: 100,
            combo: 1,
        });
        port.present(SessionEvent::ScreenFlash);
        port.present(SessionEvent::ClockTicked {
            remaining: 3,
            urgency: crate::whack::ClockUrgency::Critical,
        });

        // Popup and stars for the hit, then the flash
        assert_eq!(effects.len(), 3);
        assert!(effects.flash_active());
    }

    #[test]
    fn test_start_button_click_starts_session() {
        let mut app = app();
        app.hit_map.button = Some(Rect::new(10, 10, 20, 5));

        let at = |kind| PointerEvent {
            kind,
            column: 15,
            row: 12,
        };
        assert!(app.handle_pointer(at(PointerKind::Moved)));
        assert!(app.handle_pointer(at(PointerKind::Down)));
        assert_eq!(app.screen, Screen::Start);
        assert!(app.handle_pointer(at(PointerKind::Up)));
        assert_eq!(app.screen, Screen::Playing);
    }

    #[test]
    fn test_release_outside_button_does_nothing() {
        let mut app = app();
        app.hit_map.button = Some(Rect::new(10, 10, 20, 5));
        app.handle_pointer(PointerEvent {
            kind: PointerKind::Down,
            column: 15,
            row: 12,
        });
        app.handle_pointer(PointerEvent {
            kind: PointerKind::Up,
            column: 0,
            row: 0,
        });
        assert_eq!(app.screen, Screen::Start);
    }

    #[test]
    fn test_click_on_hole_hits_target() {
        let mut app = app();
        app.handle_key(KeyAction::Activate);
        let board = Rect::new(0, 0, 39, 24);
        app.hit_map.board = Some(board);

        let mut events = Vec::new();
        crate::whack::spawn_target(
            &mut app.session,
            4,
            crate::whack::TargetKind::Mole,
            &mut events,
        );
        app.handle_pointer(PointerEvent {
            kind: PointerKind::Down,
            column: 19,
            row: 12,
        });
        assert_eq!(app.session.score, 100);
        assert!(!app.effects.is_empty());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn test_failed_terminal_setup_leaves_raw_mode_off() {
        assert!(enter_terminal(&mut BrokenPipe).is_err());
        assert!(!crossterm::terminal::is_raw_mode_enabled().unwrap_or(false));
    }

    #[test]
    fn test_quit_from_start() {
        let mut app = app();
        assert!(!app.handle_key(KeyAction::Quit));
    }
}
