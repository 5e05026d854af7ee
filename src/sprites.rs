//! Built-in visuals
//!
//! Every visual is glyph art: one string per terminal row, spaces are
//! transparent. A sprite knows its world-space extents (cells × cell size)
//! and a per-cell mask used by the finer player↔enemy collision test.
//!
//! `Assets` is the fixed pool the simulation picks from. It is built once
//! at startup and only read afterwards.

use glam::Vec2;
use rand::Rng;

use crate::consts::{CELL_HEIGHT, CELL_WIDTH};
use crate::entities::{Rect, Tint};
use crate::vector::octant;

/// Solid / transparent cells of a sprite.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    cols: usize,
    rows: usize,
    cell: Vec2,
    bits: Vec<bool>,
}

impl Mask {
    pub fn from_art(art: &[&str], cell: Vec2) -> Self {
        let rows = art.len();
        let cols = art.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let mut bits = vec![false; cols * rows];
        for (row, line) in art.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                bits[row * cols + col] = ch != ' ';
            }
        }
        Self {
            cols,
            rows,
            cell,
            bits,
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn is_set(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows && self.bits[row * self.cols + col]
    }

    /// World boxes of every solid cell, with the mask's top-left at `origin`.
    pub fn solid_cells(&self, origin: Vec2) -> impl Iterator<Item = Rect> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).filter_map(move |col| {
                if !self.is_set(col, row) {
                    return None;
                }
                let min = origin + Vec2::new(col as f32, row as f32) * self.cell;
                Some(Rect::new(min, min + self.cell))
            })
        })
    }
}

#[derive(Clone, Debug)]
pub struct Sprite {
    art: &'static [&'static str],
    tint: Tint,
    extents: Vec2,
    mask: Mask,
}

impl Sprite {
    pub fn new(art: &'static [&'static str], tint: Tint) -> Self {
        let cell = Vec2::new(CELL_WIDTH, CELL_HEIGHT);
        let mask = Mask::from_art(art, cell);
        let extents = Vec2::new(mask.cols() as f32, mask.rows() as f32) * cell;
        Self {
            art,
            tint,
            extents,
            mask,
        }
    }

    pub fn art(&self) -> &[&'static str] {
        self.art
    }

    pub fn tint(&self) -> Tint {
        self.tint
    }

    pub fn extents(&self) -> Vec2 {
        self.extents
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }
}

/// Eight frames of one visual, indexed by `vector::octant`.
#[derive(Clone, Debug)]
pub struct Directional {
    frames: [Sprite; 8],
}

impl Directional {
    pub fn new(frames: [Sprite; 8]) -> Self {
        Self { frames }
    }

    /// A visual that looks the same in every direction.
    pub fn uniform(sprite: Sprite) -> Self {
        Self {
            frames: std::array::from_fn(|_| sprite.clone()),
        }
    }

    pub fn facing(&self, angle_deg: f32) -> &Sprite {
        &self.frames[octant(angle_deg)]
    }
}

// ── Art ───────────────────────────────────────────────────────────────────────
//
// Player frames: nose glyph on the facing side, two fins opposite it.
// Order follows `octant`: E, NE, N, NW, W, SW, S, SE.

const SHIP_E: &[&str] = &["\\  ", " #>", "/  "];
const SHIP_NE: &[&str] = &["  /", "=# ", " | "];
const SHIP_N: &[&str] = &[" ^ ", " # ", "/ \\"];
const SHIP_NW: &[&str] = &["\\  ", " #=", " | "];
const SHIP_W: &[&str] = &["  /", "<# ", "  \\"];
const SHIP_SW: &[&str] = &[" | ", " #=", "/  "];
const SHIP_S: &[&str] = &["\\ /", " # ", " v "];
const SHIP_SE: &[&str] = &[" | ", "=# ", "  \\"];

const ENEMY_SAUCER: &[&str] = &["(o)", "/ \\"];
const ENEMY_RAIDER: &[&str] = &["<=>", " V "];
const ENEMY_HUNTER: &[&str] = &["/-\\", "\\-/"];

const BEAM_H: &[&str] = &["-"];
const BEAM_V: &[&str] = &["|"];
const BEAM_RISING: &[&str] = &["/"];
const BEAM_FALLING: &[&str] = &["\\"];
const ORB: &[&str] = &["o"];
const SPARK: &[&str] = &["*"];

// ── Asset pool ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Assets {
    player: Directional,
    enemies: Vec<Sprite>,
    bullets: Vec<Directional>,
}

impl Assets {
    /// The pool shipped with the game.
    pub fn builtin() -> Self {
        let ship = |art: &'static [&'static str]| Sprite::new(art, Tint::Yellow);
        let player = Directional::new([
            ship(SHIP_E),
            ship(SHIP_NE),
            ship(SHIP_N),
            ship(SHIP_NW),
            ship(SHIP_W),
            ship(SHIP_SW),
            ship(SHIP_S),
            ship(SHIP_SE),
        ]);

        let enemies = vec![
            Sprite::new(ENEMY_SAUCER, Tint::Green),
            Sprite::new(ENEMY_RAIDER, Tint::Magenta),
            Sprite::new(ENEMY_HUNTER, Tint::Red),
        ];

        let beam = |art: &'static [&'static str]| Sprite::new(art, Tint::Cyan);
        let bullets = vec![
            Directional::new([
                beam(BEAM_H),
                beam(BEAM_RISING),
                beam(BEAM_V),
                beam(BEAM_FALLING),
                beam(BEAM_H),
                beam(BEAM_RISING),
                beam(BEAM_V),
                beam(BEAM_FALLING),
            ]),
            Directional::uniform(Sprite::new(ORB, Tint::Yellow)),
            Directional::uniform(Sprite::new(SPARK, Tint::Magenta)),
        ];

        Self::new(player, enemies, bullets)
    }

    /// Build a custom pool. Both variant lists must be non-empty.
    pub fn new(player: Directional, enemies: Vec<Sprite>, bullets: Vec<Directional>) -> Self {
        assert!(!enemies.is_empty(), "asset pool needs at least one enemy visual");
        assert!(!bullets.is_empty(), "asset pool needs at least one bullet visual");
        Self {
            player,
            enemies,
            bullets,
        }
    }

    pub fn player(&self, angle_deg: f32) -> &Sprite {
        self.player.facing(angle_deg)
    }

    /// Enemy visual; out-of-range variants wrap around the pool.
    pub fn enemy(&self, variant: usize) -> &Sprite {
        &self.enemies[variant % self.enemies.len()]
    }

    /// Bullet visual; out-of-range variants wrap around the pool.
    pub fn bullet(&self, variant: usize, angle_deg: f32) -> &Sprite {
        self.bullets[variant % self.bullets.len()].facing(angle_deg)
    }

    pub fn enemy_variants(&self) -> usize {
        self.enemies.len()
    }

    pub fn bullet_variants(&self) -> usize {
        self.bullets.len()
    }

    /// Uniformly random enemy variant.
    pub fn pick_enemy(&self, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..self.enemies.len())
    }

    /// Uniformly random bullet variant.
    pub fn pick_bullet(&self, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..self.bullets.len())
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::builtin()
    }
}
