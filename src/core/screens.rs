//! Screen flow: Start → Playing → Results → Start.

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Results,
}

/// Things that move the app between screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Start button activated on the title screen.
    StartPressed,
    /// The session clock ran out and the post-session delay elapsed.
    SessionFinished,
    /// The player abandoned a session (double Esc).
    SessionAbandoned,
    /// Retry button activated on the result screen.
    RetryPressed,
    Quit,
}

/// What the app should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Stay,
    Goto(Screen),
    Exit,
}

/// Pure transition table. Events that don't apply to the current screen
/// leave it unchanged.
pub fn transition(screen: Screen, event: ScreenEvent) -> Transition {
    match (screen, event) {
        (Screen::Start, ScreenEvent::StartPressed) => Transition::Goto(Screen::Playing),
        (Screen::Start, ScreenEvent::Quit) => Transition::Exit,
        (Screen::Playing, ScreenEvent::SessionFinished) => Transition::Goto(Screen::Results),
        (Screen::Playing, ScreenEvent::SessionAbandoned) => Transition::Goto(Screen::Start),
        (Screen::Results, ScreenEvent::RetryPressed) => Transition::Goto(Screen::Start),
        (Screen::Results, ScreenEvent::Quit) => Transition::Exit,
        _ => Transition::Stay,
    }
}
