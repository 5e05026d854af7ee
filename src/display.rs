/// Rendering layer. All terminal output lives here.
///
/// `TerminalSurface` implements the game's `Surface` over any writer.  World
/// coordinates map onto terminal cells of `CELL_WIDTH × CELL_HEIGHT` units;
/// anything that falls outside the grid is clipped.  No game logic here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use glam::Vec2;
use space_hunter::consts::{CELL_HEIGHT, CELL_WIDTH};
use space_hunter::entities::{Align, Label, Tint};
use space_hunter::sprites::Sprite;
use space_hunter::Surface;

// ── Colour palette ────────────────────────────────────────────────────────────

fn color_of(tint: Tint) -> Color {
    match tint {
        Tint::Black => Color::Black,
        Tint::White => Color::White,
        Tint::Red => Color::Red,
        Tint::Yellow => Color::Yellow,
        Tint::Green => Color::Green,
        Tint::Cyan => Color::Cyan,
        Tint::Magenta => Color::Magenta,
        Tint::Blue => Color::Blue,
    }
}

// ── World ↔ cell mapping ──────────────────────────────────────────────────────

/// Cell containing a world point (may be negative / off the grid).
pub fn world_to_cell(pos: Vec2) -> (i32, i32) {
    (
        (pos.x / CELL_WIDTH).floor() as i32,
        (pos.y / CELL_HEIGHT).floor() as i32,
    )
}

/// World point at the middle of a cell (used for mouse coordinates).
pub fn cell_to_world(col: u16, row: u16) -> Vec2 {
    Vec2::new(
        (col as f32 + 0.5) * CELL_WIDTH,
        (row as f32 + 0.5) * CELL_HEIGHT,
    )
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self { out, cols, rows }
    }

    fn on_grid(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < self.cols as i32 && row < self.rows as i32
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    fn fill(&mut self, tint: Tint) -> std::io::Result<()> {
        self.out.queue(style::SetBackgroundColor(color_of(tint)))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn blit(&mut self, sprite: &Sprite, center: Vec2) -> std::io::Result<()> {
        let (col0, row0) = world_to_cell(center - sprite.extents() / 2.0);
        self.out.queue(style::SetForegroundColor(color_of(sprite.tint())))?;

        for (dy, line) in sprite.art().iter().enumerate() {
            for (dx, ch) in line.chars().enumerate() {
                if ch == ' ' {
                    continue;
                }
                let (col, row) = (col0 + dx as i32, row0 + dy as i32);
                if !self.on_grid(col, row) {
                    continue;
                }
                self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                self.out.queue(Print(ch))?;
            }
        }
        Ok(())
    }

    fn text(&mut self, label: &Label) -> std::io::Result<()> {
        let width = label.text.chars().count() as i32;
        let (anchor, row) = world_to_cell(label.pos);
        let start = match label.align {
            Align::Left => anchor,
            Align::Right => anchor - width,
            Align::Center => anchor - width / 2,
        };
        if row < 0 || row >= self.rows as i32 {
            return Ok(());
        }

        // Clip on both sides
        let skip = (-start).max(0) as usize;
        let col = start.max(0);
        let room = (self.cols as i32 - col).max(0) as usize;
        let visible: String = label.text.chars().skip(skip).take(room).collect();
        if visible.is_empty() {
            return Ok(());
        }

        self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(color_of(label.tint)))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn present(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_cell_maps_back_to_same_cell() {
        let p = cell_to_world(12, 7);
        assert_eq!(world_to_cell(p), (12, 7));
    }

    #[test]
    fn negative_world_positions_are_off_grid() {
        assert_eq!(world_to_cell(Vec2::new(-1.0, -1.0)), (-1, -1));
    }

    #[test]
    fn right_aligned_label_ends_at_anchor() {
        let mut surface = TerminalSurface::new(Vec::new(), 80, 30);
        let label = Label {
            text: "Score: 7".to_string(),
            tint: Tint::Yellow,
            pos: Vec2::new(790.0, 10.0),
            align: Align::Right,
        };
        surface.text(&label).unwrap();
        let written = String::from_utf8_lossy(&surface.out).to_string();
        assert!(written.contains("Score: 7"));
        // column 79 - 8 = 71, row 0 (1-based in the escape sequence)
        assert!(written.contains("\x1b[1;72H"));
    }

    #[test]
    fn offscreen_sprite_writes_nothing() {
        let mut surface = TerminalSurface::new(Vec::new(), 80, 30);
        let sprite = Sprite::new(&["o"], Tint::Yellow);
        surface.blit(&sprite, Vec2::new(400.0, -100.0)).unwrap();
        let written = String::from_utf8_lossy(&surface.out).to_string();
        assert!(!written.contains('o'));
    }
}
