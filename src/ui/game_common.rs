//! Shared UI components for the three screens.

use crate::core::button::ButtonState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

/// Accent orange used for the title, buttons and borders.
pub const ACCENT: Color = Color::Rgb(255, 107, 53);
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const SKY: Color = Color::Rgb(135, 206, 235);
pub const GRASS: Color = Color::Rgb(34, 139, 34);

/// Layout areas returned by `create_game_layout`.
pub struct GameLayout {
    /// Main content area (board) - top left, inside outer border
    pub content: Rect,
    /// Status bar area (2 lines) - bottom left, inside outer border
    pub status_bar: Rect,
    /// Info panel area - right side, with its own border
    pub info_panel: Rect,
}

/// Create the in-game layout with outer border.
///
/// ```text
/// ┌─ Title ─────────────────────────┬─ Info ──────┐
/// │                                 │             │
/// │   [content area]                │  [info]     │
/// │                                 │             │
/// │ [status bar - 2 lines]          │             │
/// └─────────────────────────────────┴─────────────┘
/// ```
pub fn create_game_layout(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    border_color: Color,
    content_min_height: u16,
    info_panel_width: u16,
) -> GameLayout {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Horizontal split: content area (left) | info panel (right)
    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(info_panel_width)])
        .split(inner);

    // Left side: content (top) + status bar (bottom 2 lines)
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(content_min_height), Constraint::Length(2)])
        .split(h_chunks[0]);

    GameLayout {
        content: v_chunks[0],
        status_bar: v_chunks[1],
        info_panel: h_chunks[1],
    }
}

/// Render a status bar (2 lines: status message + controls).
///
/// `controls` is a slice of (key, action) pairs, e.g. `[("[Esc]", "Quit")]`.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    status_text: &str,
    status_color: Color,
    controls: &[(&str, &str)],
) {
    if area.height < 1 {
        return;
    }

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(status_color))
        .alignment(Alignment::Center);
    frame.render_widget(status, Rect { height: 1, ..area });

    if area.height >= 2 && !controls.is_empty() {
        let controls_line = Paragraph::new(controls_line(controls)).alignment(Alignment::Center);
        frame.render_widget(
            controls_line,
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Key hints as a single styled line.
pub fn controls_line(controls: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in controls.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(Color::White),
        ));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

/// Render an info panel frame with standard " Info " title and DarkGray border.
///
/// Returns the inner Rect for content rendering.
pub fn render_info_panel_frame(frame: &mut Frame, area: Rect) -> Rect {
    let block = Block::default()
        .title(" Info ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Abandon confirmation status text.
pub const FORFEIT_STATUS_TEXT: &str = "Abandon this round?";

/// Abandon confirmation status color.
pub const FORFEIT_STATUS_COLOR: Color = Color::Red;

/// Abandon confirmation controls.
pub const FORFEIT_CONTROLS: &[(&str, &str)] = &[("[Esc]", "Confirm"), ("[Any]", "Cancel")];

/// Render the abandon confirmation status bar.
///
/// Call this when `forfeit_pending` is true. Returns `true` if rendered.
pub fn render_forfeit_status_bar(frame: &mut Frame, area: Rect, forfeit_pending: bool) -> bool {
    if !forfeit_pending {
        return false;
    }
    render_status_bar(
        frame,
        area,
        FORFEIT_STATUS_TEXT,
        FORFEIT_STATUS_COLOR,
        FORFEIT_CONTROLS,
    );
    true
}

/// A `width` x `height` rect centred in `area`, clipped to it.
/// `percent` of `len`, computed wide so tall terminals can't overflow.
pub fn percent_of(len: u16, percent: u16) -> u16 {
    (u32::from(len) * u32::from(percent.min(100)) / 100) as u16
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Fill colour for a button in each state.
pub fn button_fill(state: ButtonState) -> Color {
    match state {
        ButtonState::Idle => ACCENT,
        ButtonState::Hover => Color::Rgb(255, 140, 85),
        ButtonState::Pressed => Color::Rgb(204, 85, 40),
    }
}

/// Render a push button. Returns the area it occupies, for pointer hit tests.
pub fn render_button(frame: &mut Frame, area: Rect, label: &str, state: ButtonState) -> Rect {
    let fill = button_fill(state);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::Black).bg(fill))
        .style(Style::default().bg(fill));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let text = Paragraph::new(Line::from(Span::styled(
        label.to_string(),
        Style::default()
            .fg(Color::White)
            .bg(fill)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    let label_row = Rect {
        y: inner.y + inner.height.saturating_sub(1) / 2,
        height: inner.height.min(1),
        ..inner
    };
    frame.render_widget(text, label_row);
    area
}

/// True if the terminal cell (`column`, `row`) lies inside `area`.
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x && column < area.x + area.width && row >= area.y && row < area.y + area.height
}
