//! Terminal-cell art for moles and bombs.
//!
//! A sprite is a list of cells positioned relative to the target: `dx` from
//! the centre column, `dy` from the body's top row. The body is a block of
//! background colour; the target's parts are glyphs drawn on top of it.

use crate::whack::{PartLook, TargetKind, TargetParts};
use ratatui::style::{Color, Modifier, Style};

pub const MOLE_BROWN: Color = Color::Rgb(139, 69, 19);
pub const MOLE_TAN: Color = Color::Rgb(222, 184, 135);
pub const BOMB_BLACK: Color = Color::Rgb(30, 30, 30);
pub const HOLE_DARK: Color = Color::Rgb(60, 40, 20);

/// Highest row any sprite uses (the bomb spark).
pub const SPRITE_TOP: i16 = -2;
/// Lowest row any sprite uses (mole paws, bomb base).
pub const SPRITE_BOTTOM: i16 = 3;
pub const SPRITE_HEIGHT: i16 = SPRITE_BOTTOM - SPRITE_TOP + 1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteCell {
    pub dx: i16,
    pub dy: i16,
    pub symbol: char,
    pub style: Style,
}

/// Mole body rows as (dy, half width).
const MOLE_BODY: [(i16, i16); 4] = [(0, 2), (1, 3), (2, 3), (3, 3)];
const BOMB_BODY: [(i16, i16); 4] = [(0, 1), (1, 2), (2, 2), (3, 1)];

/// Glyph and colour for a part.
pub fn part_glyph(look: PartLook) -> (char, Color) {
    match look {
        PartLook::Ear => ('▄', MOLE_BROWN),
        PartLook::Eye => ('●', Color::Black),
        PartLook::EyeCrossed => ('×', Color::Black),
        PartLook::Cheek => ('░', Color::LightMagenta),
        PartLook::Nose => ('▾', Color::Magenta),
        PartLook::Smile => ('‿', Color::Black),
        PartLook::Frown => ('⁀', Color::Black),
        PartLook::Paw => ('m', MOLE_TAN),
        PartLook::Fuse => ('╱', Color::Rgb(160, 110, 60)),
        PartLook::Spark => ('✶', Color::Yellow),
    }
}

fn body_colour(kind: TargetKind) -> Color {
    match kind {
        TargetKind::Mole => MOLE_BROWN,
        TargetKind::Bomb => BOMB_BLACK,
    }
}

fn body_rows(kind: TargetKind) -> &'static [(i16, i16)] {
    match kind {
        TargetKind::Mole => &MOLE_BODY,
        TargetKind::Bomb => &BOMB_BODY,
    }
}

fn in_body(kind: TargetKind, dx: i16, dy: i16) -> bool {
    body_rows(kind)
        .iter()
        .any(|&(row, half)| row == dy && dx.abs() <= half)
}

/// Build the cells for a target. `spark_lit` hides the bomb spark on the
/// off beat of its blink.
pub fn target_cells(kind: TargetKind, parts: &TargetParts, spark_lit: bool) -> Vec<SpriteCell> {
    let body = body_colour(kind);
    let mut cells = Vec::new();

    for &(dy, half) in body_rows(kind) {
        for dx in -half..=half {
            cells.push(SpriteCell {
                dx,
                dy,
                symbol: ' ',
                style: Style::default().bg(body),
            });
        }
    }

    // Bomb shine
    if kind == TargetKind::Bomb {
        cells.push(SpriteCell {
            dx: -1,
            dy: 1,
            symbol: '▘',
            style: Style::default().fg(Color::Gray).bg(body),
        });
    }

    for part in parts.parts() {
        if part.look == PartLook::Spark && !spark_lit {
            continue;
        }
        let (symbol, fg) = part_glyph(part.look);
        let mut style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
        if in_body(kind, part.dx, part.dy) {
            style = style.bg(body);
        }
        cells.push(SpriteCell {
            dx: part.dx,
            dy: part.dy,
            symbol,
            style,
        });
    }

    cells
}
