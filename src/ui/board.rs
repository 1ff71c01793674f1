//! The 3x3 board of holes: geometry for pointer hit-testing and the widget
//! that draws targets, their animations and the board effects.

use crate::core::constants::{GRID_COLS, GRID_ROWS, HOLE_COUNT};
use crate::ui::effects::{rise_fraction, spark_lit, EffectLayer, EffectType};
use crate::ui::game_common::{contains, GOLD};
use crate::ui::sprites::{target_cells, HOLE_DARK, SPRITE_BOTTOM, SPRITE_HEIGHT};
use crate::whack::{hole_position, Target, WhackSession};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

pub const CELL_WIDTH: u16 = 13;
pub const CELL_HEIGHT: u16 = 8;

/// Key hint drawn at each hole, in hole order.
pub const HOLE_KEY_HINTS: [char; HOLE_COUNT] = ['7', '8', '9', '4', '5', '6', '1', '2', '3'];

/// Board area centred in `area`, shrunk to fit small terminals.
pub fn board_rect(area: Rect) -> Rect {
    let cell_w = CELL_WIDTH.min(area.width / GRID_COLS as u16);
    let cell_h = CELL_HEIGHT.min(area.height / GRID_ROWS as u16);
    let width = cell_w * GRID_COLS as u16;
    let height = cell_h * GRID_ROWS as u16;
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Screen rect of every hole cell, in hole order.
pub fn hole_rects(area: Rect) -> [Rect; HOLE_COUNT] {
    let board = board_rect(area);
    let cell_w = board.width / GRID_COLS as u16;
    let cell_h = board.height / GRID_ROWS as u16;
    let mut rects = [Rect::default(); HOLE_COUNT];
    for (hole, rect) in rects.iter_mut().enumerate() {
        let (row, col) = hole_position(hole);
        *rect = Rect::new(
            board.x + col as u16 * cell_w,
            board.y + row as u16 * cell_h,
            cell_w,
            cell_h,
        );
    }
    rects
}

/// The hole under a terminal cell, if any.
pub fn hole_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    hole_rects(area)
        .iter()
        .position(|rect| contains(*rect, column, row))
}

pub struct BoardWidget<'a> {
    pub session: &'a WhackSession,
    pub effects: &'a EffectLayer,
}

impl<'a> BoardWidget<'a> {
    pub fn new(session: &'a WhackSession, effects: &'a EffectLayer) -> Self {
        Self { session, effects }
    }
}

/// Set one cell if it lies inside `clip`.
fn put(buf: &mut Buffer, clip: Rect, x: i32, y: i32, symbol: char, style: Style) {
    if x < clip.x as i32 || y < clip.y as i32 {
        return;
    }
    let (x, y) = (x as u16, y as u16);
    if contains(clip, x, y) {
        buf.get_mut(x, y).set_char(symbol).set_style(style);
    }
}

fn put_str(buf: &mut Buffer, clip: Rect, x: i32, y: i32, text: &str, style: Style) {
    for (i, ch) in text.chars().enumerate() {
        put(buf, clip, x + i as i32, y, ch, style);
    }
}

/// Row of the hole rim inside a cell.
fn ground_row(cell: Rect) -> i32 {
    cell.y as i32 + cell.height as i32 - 1
}

fn centre_col(cell: Rect) -> i32 {
    cell.x as i32 + cell.width as i32 / 2
}

/// Draw a target sunk `sunk_rows` rows into its hole. Rows at or below the
/// rim are hidden.
fn draw_target(buf: &mut Buffer, cell: Rect, target: &Target, sunk_rows: i16, now_ms: u64) {
    let ground = ground_row(cell);
    // Sprite interior clip: everything above the rim
    let clip = Rect {
        height: cell.height.saturating_sub(1),
        ..cell
    };
    let base = ground - 1 - SPRITE_BOTTOM as i32 + sunk_rows as i32;
    for c in target_cells(target.kind, &target.parts, spark_lit(now_ms)) {
        put(
            buf,
            clip,
            centre_col(cell) + c.dx as i32,
            base + c.dy as i32,
            c.symbol,
            c.style,
        );
    }
}

fn draw_hole(buf: &mut Buffer, cell: Rect, hole: usize) {
    let ground = ground_row(cell);
    let half = (cell.width as i32 / 2 - 1).clamp(0, 4);
    let style = Style::default().fg(HOLE_DARK);
    for dx in -half..=half {
        put(buf, cell, centre_col(cell) + dx, ground, '▀', style);
    }
    put(
        buf,
        cell,
        cell.x as i32,
        ground,
        HOLE_KEY_HINTS[hole],
        Style::default().fg(Color::DarkGray),
    );
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cells = hole_rects(area);
        let board = board_rect(area);
        let now = self.session.now_ms();

        for (hole, cell) in cells.iter().enumerate() {
            draw_hole(buf, *cell, hole);
        }

        // Departing targets first so a new arrival in the same hole draws on top
        for effect in self.effects.iter() {
            if let EffectType::Sinking { target, .. } = &effect.effect_type {
                let sunk = (effect.progress() * SPRITE_HEIGHT as f64).round() as i16;
                draw_target(buf, cells[target.hole], target, sunk, now);
            }
        }

        for target in self.session.targets.iter().filter(|t| t.active) {
            let age = now.saturating_sub(target.spawned_at_ms);
            let sunk = ((1.0 - rise_fraction(age)) * SPRITE_HEIGHT as f64).round() as i16;
            draw_target(buf, cells[target.hole], target, sunk, now);
        }

        for effect in self.effects.iter() {
            let progress = effect.progress();
            match &effect.effect_type {
                EffectType::ScorePopup { hole, points } => {
                    // Fade out over the last fifth
                    if progress > 0.8 {
                        continue;
                    }
                    let cell = cells[*hole];
                    let text = if *points > 0 {
                        format!("+{}", points)
                    } else {
                        points.to_string()
                    };
                    let colour = if *points > 0 { Color::Green } else { Color::Red };
                    let rise = (progress * 3.0) as i32;
                    put_str(
                        buf,
                        board,
                        centre_col(cell) + 4 - text.len() as i32 / 2,
                        cell.y as i32 + 2 - rise,
                        &text,
                        Style::default().fg(colour).add_modifier(Modifier::BOLD),
                    );
                }
                EffectType::StarBurst { hole } => {
                    let cell = cells[*hole];
                    let radius = progress * 3.0;
                    for i in 0..3 {
                        let angle = ((i as f64) * 120.0 - 90.0).to_radians();
                        // Cells are about twice as tall as wide
                        let x = centre_col(cell) + (angle.cos() * radius * 2.0).round() as i32;
                        let y = cell.y as i32 + 1 + (angle.sin() * radius).round() as i32;
                        put(buf, board, x, y, '★', Style::default().fg(GOLD));
                    }
                }
                _ => {}
            }
        }

        if self.effects.flash_active() {
            for y in board.y..board.y + board.height {
                for x in board.x..board.x + board.width {
                    buf.get_mut(x, y).set_bg(Color::White);
                }
            }
        }
    }
}
