//! Result screen: final score, record, evaluation and a mole that reacts.

use crate::core::button::Button;
use crate::ui::game_common::{
    centered_rect, controls_line, percent_of, render_button, GOLD, GRASS, SKY,
};
use crate::ui::sprites::{MOLE_BROWN, MOLE_TAN};
use crate::ui::start_scene::render_backdrop;
use crate::whack::{MoleMood, SessionResult};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// NEW RECORD! blinks on this half-period.
const RECORD_BLINK_MS: u64 = 500;

pub const RETRY_BUTTON_WIDTH: u16 = 20;
pub const RETRY_BUTTON_HEIGHT: u16 = 5;

/// Face rows for each mood: eyes, then mouth. Sweat drops frame the
/// defeated face.
fn face_rows(mood: MoleMood) -> (&'static str, &'static str, bool) {
    match mood {
        MoleMood::Smug => ("◕   ◕", "╰─╯", false),
        MoleMood::Surprised => ("◉   ◉", " O ", false),
        MoleMood::Defeated => ("×   ×", "╭─╮", true),
    }
}

/// Lines of the result mole for a mood.
pub fn mole_face(mood: MoleMood) -> Vec<Line<'static>> {
    let (eyes, mouth, sweat) = face_rows(mood);
    let fur = Style::default().fg(Color::Black).bg(MOLE_BROWN);
    let ear = Style::default().fg(MOLE_BROWN);
    let drop = Style::default().fg(Color::LightCyan);
    let side = if sweat { "💧" } else { "  " };

    vec![
        Line::from(vec![
            Span::styled("  ▄▄      ▄▄  ", ear),
        ]),
        Line::from(vec![
            Span::styled(side, drop),
            Span::styled("  ", fur),
            Span::styled(format!("  {}  ", eyes), fur.add_modifier(Modifier::BOLD)),
            Span::styled("  ", fur),
            Span::styled(side, drop),
        ]),
        Line::from(vec![
            Span::styled(" ░ ", Style::default().fg(Color::LightMagenta).bg(MOLE_BROWN)),
            Span::styled("   ▾   ", Style::default().fg(Color::Magenta).bg(MOLE_BROWN)),
            Span::styled(" ░ ", Style::default().fg(Color::LightMagenta).bg(MOLE_BROWN)),
        ]),
        Line::from(vec![Span::styled(
            format!("    {}     ", mouth),
            fur.add_modifier(Modifier::BOLD),
        )]),
        Line::from(vec![Span::styled(
            "  m       m  ",
            Style::default().fg(MOLE_TAN).bg(MOLE_BROWN),
        )]),
    ]
}

/// Whether the NEW RECORD! banner is visible at `clock_ms`.
pub fn record_visible(clock_ms: u64) -> bool {
    (clock_ms / RECORD_BLINK_MS) % 2 == 0
}

/// Render the result screen. Returns the retry button's area.
pub fn render_result(
    frame: &mut Frame,
    area: Rect,
    result: &SessionResult,
    button: &Button,
    clock_ms: u64,
) -> Rect {
    let horizon = render_backdrop(frame, area);
    let sky = |style: Style| style.bg(SKY);

    let record_line = if result.new_record && record_visible(clock_ms) {
        Line::from(Span::styled(
            "NEW RECORD!",
            sky(Style::default()
                .fg(GOLD)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)),
        ))
    } else {
        Line::from("")
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "GAME OVER",
            sky(Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("Score: {}", result.final_score),
            sky(Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)),
        )),
        record_line,
        Line::from(Span::styled(
            format!("High Score: {}", result.high_score),
            sky(Style::default().fg(GOLD)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            result.evaluation.message(),
            sky(Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)),
        )),
        Line::from(""),
    ];
    lines.extend(mole_face(result.evaluation.mood()));

    let text_top = area.y + area.height / 10;
    let text_height = (lines.len() as u16).min(area.y + area.height - text_top);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        Rect {
            y: text_top,
            height: text_height,
            ..area
        },
    );

    let button_y = (area.y + percent_of(area.height, 85))
        .saturating_sub(RETRY_BUTTON_HEIGHT / 2)
        .max(area.y);
    let button_area = centered_rect(
        RETRY_BUTTON_WIDTH,
        RETRY_BUTTON_HEIGHT,
        Rect {
            y: button_y,
            height: RETRY_BUTTON_HEIGHT.min(area.y + area.height - button_y),
            ..area
        },
    );
    let button_area = render_button(frame, button_area, "RETRY", button.state);

    let hint_y = area.y + area.height.saturating_sub(1);
    if hint_y > horizon && hint_y >= button_area.y + button_area.height {
        frame.render_widget(
            Paragraph::new(controls_line(&[("[Enter]", "Retry"), ("[q]", "Quit")]))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::whack::Evaluation;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_record_blinks() {
        assert!(record_visible(0));
        assert!(record_visible(499));
        assert!(!record_visible(500));
        assert!(record_visible(1000));
    }

    #[test]
    fn test_faces_differ_per_mood() {
        let smug = mole_face(MoleMood::Smug);
        let beaten = mole_face(MoleMood::Defeated);
        assert_eq!(smug.len(), beaten.len());
        assert_ne!(smug[1], beaten[1]);
        let text: String = beaten[1].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains('×'));
    }

    #[test]
    fn test_very_tall_terminal() {
        let result = SessionResult {
            final_score: 1600,
            high_score: 1600,
            new_record: true,
            evaluation: Evaluation::Master,
        };
        let mut terminal = Terminal::new(TestBackend::new(24, 1200)).unwrap();
        let mut button_area = Rect::default();
        terminal
            .draw(|frame| {
                button_area = render_result(frame, frame.size(), &result, &Button::new(), 0);
            })
            .unwrap();
        assert_eq!(button_area.y, 1020 - RETRY_BUTTON_HEIGHT / 2);
        assert_eq!(button_area.height, RETRY_BUTTON_HEIGHT);
    }
}
