//! Title screen: logo, best score, start button.

use crate::core::button::Button;
use crate::ui::effects::yoyo;
use crate::ui::game_common::{
    centered_rect, controls_line, percent_of, render_button, ACCENT, GOLD, GRASS, SKY,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
    Frame,
};

const TITLE_ART: [&str; 2] = [
    "█▀▄▀█ █▀█ █   █▀▀   █▀█ ▄▀█ █▄ █ █ █▀▀",
    "█ ▀ █ █▄█ █▄▄ ██▄   █▀▀ █▀█ █ ▀█ █ █▄▄",
];

/// One full up-and-down bob of the title.
const TITLE_BOB_MS: u64 = 1600;

pub const START_BUTTON_WIDTH: u16 = 20;
pub const START_BUTTON_HEIGHT: u16 = 5;

/// Sky above, grass below the 70% line.
pub fn render_backdrop(frame: &mut Frame, area: Rect) -> u16 {
    frame.render_widget(Clear, area);
    let horizon = area.y + percent_of(area.height, 70);
    frame.render_widget(
        Block::default().style(Style::default().bg(SKY)),
        Rect {
            height: horizon - area.y,
            ..area
        },
    );
    frame.render_widget(
        Block::default().style(Style::default().bg(GRASS)),
        Rect {
            y: horizon,
            height: area.y + area.height - horizon,
            ..area
        },
    );
    horizon
}

/// Render the title screen. Returns the start button's area.
pub fn render_start(
    frame: &mut Frame,
    area: Rect,
    high_score: i64,
    button: &Button,
    clock_ms: u64,
) -> Rect {
    let horizon = render_backdrop(frame, area);

    let bob = yoyo((clock_ms % TITLE_BOB_MS) as f64 / TITLE_BOB_MS as f64).round() as u16;
    let title_y = (area.y + area.height / 4).saturating_sub(1 + bob).max(area.y);

    let mut lines: Vec<Line> = TITLE_ART
        .iter()
        .map(|row| {
            Line::from(Span::styled(
                *row,
                Style::default()
                    .fg(ACCENT)
                    .bg(SKY)
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "~ Comical Bomb Edition ~",
        Style::default().fg(Color::White).bg(SKY),
    )));
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect {
            y: title_y,
            height: 4u16.min(area.y + area.height - title_y),
            ..area
        },
    );

    let score_y = area.y + area.height / 2;
    if score_y < area.y + area.height {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("High Score: {}", high_score),
                Style::default()
                    .fg(GOLD)
                    .bg(SKY)
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            Rect {
                y: score_y,
                height: 1,
                ..area
            },
        );
    }

    let button_centre_y = area.y + percent_of(area.height, 65);
    let button_area = centered_rect(
        START_BUTTON_WIDTH,
        START_BUTTON_HEIGHT,
        Rect {
            y: button_centre_y.saturating_sub(START_BUTTON_HEIGHT / 2).max(area.y),
            height: START_BUTTON_HEIGHT.min(area.height),
            ..area
        },
    );
    let button_area = render_button(frame, button_area, "START", button.state);

    let hint_y = area.y + area.height.saturating_sub(1);
    if hint_y > horizon {
        frame.render_widget(
            Paragraph::new(controls_line(&[
                ("[Enter]", "Start"),
                ("[Click]", "Start"),
                ("[q]", "Quit"),
            ]))
            .style(Style::default().bg(GRASS))
            .alignment(Alignment::Center),
            Rect {
                y: hint_y,
                height: 1,
                ..area
            },
        );
    }

    button_area
}
