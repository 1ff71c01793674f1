//! Press/release/hover state for the start and retry buttons.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Idle,
    Hover,
    Pressed,
}

/// What a pointer event did to the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    None,
    /// Pointer went down on the button (play the click cue).
    Pressed,
    /// Pointer released on the button after pressing it.
    Activated,
}

#[derive(Debug, Clone, Default)]
pub struct Button {
    pub state: ButtonState,
}

impl Button {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_moved(&mut self, inside: bool) {
        self.state = match (self.state, inside) {
            (ButtonState::Pressed, true) => ButtonState::Pressed,
            (_, true) => ButtonState::Hover,
            (_, false) => ButtonState::Idle,
        };
    }

    pub fn pointer_down(&mut self, inside: bool) -> ButtonAction {
        if inside {
            self.state = ButtonState::Pressed;
            ButtonAction::Pressed
        } else {
            ButtonAction::None
        }
    }

    pub fn pointer_up(&mut self, inside: bool) -> ButtonAction {
        let was_pressed = self.state == ButtonState::Pressed;
        self.state = if inside {
            ButtonState::Hover
        } else {
            ButtonState::Idle
        };
        if was_pressed && inside {
            ButtonAction::Activated
        } else {
            ButtonAction::None
        }
    }
}
