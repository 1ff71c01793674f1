//! Terminal input mapping.
//!
//! Turns crossterm key and mouse events into screen-level actions. Which
//! action a key means depends on the screen: `q` is a hole during play and
//! quits everywhere else.

use crate::core::screens::Screen;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Keyboard action for the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Strike a hole.
    Hole(usize),
    /// Enter/Space: press the focused button.
    Activate,
    /// Esc during play.
    Back,
    Quit,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Up,
    Moved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub column: u16,
    pub row: u16,
}

/// Hole for a key, in the keypad layout (7 8 9 / 4 5 6 / 1 2 3) or the
/// matching letter block (q w e / a s d / z x c).
pub fn hole_for_key(c: char) -> Option<usize> {
    let hole = match c.to_ascii_lowercase() {
        '7' | 'q' => 0,
        '8' | 'w' => 1,
        '9' | 'e' => 2,
        '4' | 'a' => 3,
        '5' | 's' => 4,
        '6' | 'd' => 5,
        '1' | 'z' => 6,
        '2' | 'x' => 7,
        '3' | 'c' => 8,
        _ => return None,
    };
    Some(hole)
}

pub fn map_key(key: KeyEvent, screen: Screen) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return match screen {
            Screen::Playing => KeyAction::Back,
            _ => KeyAction::Quit,
        };
    }

    match screen {
        Screen::Playing => match key.code {
            KeyCode::Char(c) => hole_for_key(c).map_or(KeyAction::Other, KeyAction::Hole),
            KeyCode::Esc => KeyAction::Back,
            _ => KeyAction::Other,
        },
        Screen::Start | Screen::Results => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Activate,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            _ => KeyAction::Other,
        },
    }
}

/// Left-button and movement events; everything else is ignored.
pub fn map_mouse(mouse: MouseEvent) -> Option<PointerEvent> {
    let kind = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
        MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
        MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => PointerKind::Moved,
        _ => return None,
    };
    Some(PointerEvent {
        kind,
        column: mouse.column,
        row: mouse.row,
    })
}
