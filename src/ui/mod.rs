pub mod board;
pub mod effects;
pub mod game_common;
pub mod result_scene;
pub mod sprites;
pub mod start_scene;
pub mod whack_scene;

use crate::app::App;
use crate::core::screens::Screen;
use crate::utils::persistence::KeyValueStore;
use ratatui::{layout::Rect, Frame};

/// Where the last frame put the clickable parts of the screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitMap {
    pub board: Option<Rect>,
    pub button: Option<Rect>,
}

/// Draw the current screen and report its clickable areas.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>) -> HitMap {
    let area = frame.size();
    match app.screen {
        Screen::Start => HitMap {
            board: None,
            button: Some(start_scene::render_start(
                frame,
                area,
                app.best,
                &app.start_button,
                app.screen_clock_ms,
            )),
        },
        Screen::Playing => HitMap {
            board: Some(whack_scene::render_whack(
                frame,
                area,
                &app.session,
                &app.effects,
                app.best,
            )),
            button: None,
        },
        Screen::Results => match app.result.as_ref() {
            Some(result) => HitMap {
                board: None,
                button: Some(result_scene::render_result(
                    frame,
                    area,
                    result,
                    &app.retry_button,
                    app.screen_clock_ms,
                )),
            },
            None => HitMap::default(),
        },
    }
}
