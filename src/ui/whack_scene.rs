//! UI rendering for a running Mole Panic session.

use crate::ui::board::BoardWidget;
use crate::ui::effects::EffectLayer;
use crate::ui::game_common::{
    create_game_layout, render_forfeit_status_bar, render_info_panel_frame, render_status_bar,
    ACCENT, GOLD,
};
use crate::whack::{ClockUrgency, DifficultyTier, SessionPhase, WhackSession};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const ORANGE: Color = Color::Rgb(255, 165, 0);

/// Countdown colour for the remaining time.
pub fn clock_colour(urgency: ClockUrgency) -> Color {
    match urgency {
        ClockUrgency::Calm => Color::White,
        ClockUrgency::Warning => ORANGE,
        ClockUrgency::Critical => Color::Red,
    }
}

fn tier_colour(tier: DifficultyTier) -> Color {
    match tier {
        DifficultyTier::Easy => Color::Green,
        DifficultyTier::Medium => Color::Yellow,
        DifficultyTier::Hard => Color::Red,
    }
}

/// Render the session. Returns the board area used for pointer hit tests.
pub fn render_whack(
    frame: &mut Frame,
    area: Rect,
    session: &WhackSession,
    effects: &EffectLayer,
    high_score: i64,
) -> Rect {
    let layout = create_game_layout(frame, area, " Mole Panic ", ACCENT, 12, 22);

    // Top line of the content area is reserved for the combo banner
    let banner = Rect {
        height: layout.content.height.min(1),
        ..layout.content
    };
    let board_area = Rect {
        y: layout.content.y + banner.height,
        height: layout.content.height - banner.height,
        ..layout.content
    };

    frame.render_widget(BoardWidget::new(session, effects), board_area);
    render_combo_banner(frame, banner, session, effects);
    render_status_bar_content(frame, layout.status_bar, session);
    render_info_panel(frame, layout.info_panel, session, high_score);

    board_area
}

fn render_combo_banner(frame: &mut Frame, area: Rect, session: &WhackSession, effects: &EffectLayer) {
    let Some(combo) = session.combo_banner else {
        return;
    };
    // Wider, louder text at the peak of the pulse
    let text = if effects.combo_scale() > 1.15 {
        format!("★ ★  {} COMBO!  ★ ★", combo)
    } else {
        format!("★ {} COMBO! ★", combo)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        area,
    );
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, session: &WhackSession) {
    if render_forfeit_status_bar(frame, area, session.forfeit_pending) {
        return;
    }

    if session.phase == SessionPhase::Ending {
        render_status_bar(frame, area, "TIME UP!", Color::Red, &[]);
        return;
    }

    render_status_bar(
        frame,
        area,
        "Whack the moles! Leave the bombs!",
        Color::Yellow,
        &[
            ("[7-9/4-6/1-3]", "Hit"),
            ("[Click]", "Hit"),
            ("[Esc]", "Abandon"),
        ],
    );
}

fn render_info_panel(frame: &mut Frame, area: Rect, session: &WhackSession, high_score: i64) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let tier = session.current_tier();
    let label = Style::default().fg(Color::DarkGray);
    let lines = vec![
        Line::from(vec![
            Span::styled(" Time:  ", label),
            Span::styled(
                format!("{}s", session.time_remaining),
                Style::default()
                    .fg(clock_colour(session.urgency()))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                format!("{}", session.score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Combo: ", label),
            Span::styled(format!("{}", session.combo), Style::default().fg(GOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Pace:  ", label),
            Span::styled(tier.name(), Style::default().fg(tier_colour(tier))),
        ]),
        Line::from(vec![
            Span::styled(" Best:  ", label),
            Span::styled(format!("{}", high_score), Style::default().fg(GOLD)),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Mole   +100", Style::default().fg(Color::Green))),
        Line::from(Span::styled(" Bomb   -200 -3s", Style::default().fg(Color::Red))),
        Line::from(Span::styled(" 5 in a row: combo", label)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
