/// All game entity types: pure data, no game rules.
///
/// Positions are world-space centers (`glam::Vec2`, y grows downward).
/// Bounds are derived from the center and the extents of the visual the
/// entity currently shows.

use glam::Vec2;

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center(center: Vec2, extents: Vec2) -> Self {
        let half = extents / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.min.x >= self.min.x
            && other.max.x <= self.max.x
            && other.min.y >= self.min.y
            && other.max.y <= self.max.y
    }
}

// ── Colours ───────────────────────────────────────────────────────────────────

/// Palette shared by sprites, labels and the background fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Black,
    White,
    Red,
    Yellow,
    Green,
    Cyan,
    Magenta,
    Blue,
}

// ── Player, enemies, bullets ──────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle in degrees, recomputed from the pointer every frame.
    pub angle: f32,
    /// Extents of the sprite frame matching `angle`.
    pub extents: Vec2,
}

impl Player {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.extents)
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub pos: Vec2,
    /// Index into the enemy sprite pool.
    pub variant: usize,
    pub extents: Vec2,
    pub alive: bool,
}

impl Enemy {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.extents)
    }
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub pos: Vec2,
    /// Unit direction, fixed at creation.
    pub dir: Vec2,
    pub speed: f32,
    /// Display angle, fixed at creation.
    pub angle: f32,
    /// Index into the bullet sprite pool.
    pub variant: usize,
    pub extents: Vec2,
    pub alive: bool,
}

impl Bullet {
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, self.extents)
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Directional keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Everything the simulation reads from the input collaborator in one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub keys: DirectionKeys,
    /// Pointer position in world units.
    pub pointer: Vec2,
    /// Left-click edges since the previous poll.
    pub fire: u32,
    pub quit: bool,
}

// ── HUD labels ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// `pos.x` is the left edge of the text.
    Left,
    /// `pos.x` is the right edge of the text.
    Right,
    /// `pos.x` is the horizontal center of the text.
    Center,
}

/// A line of text handed to the render collaborator.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub tint: Tint,
    /// Anchor point in world units; `y` is the top of the text.
    pub pos: Vec2,
    pub align: Align,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    /// Lives reached zero.
    Defeated,
    /// The input collaborator asked to quit.
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver(GameOverReason),
}

/// The entire simulation state, owned by the game loop.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub lives: u32,
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    /// Play area size; the area spans `[0, area.x] × [0, area.y]`.
    pub area: Vec2,
}

impl GameState {
    pub fn play_area(&self) -> Rect {
        Rect::new(Vec2::ZERO, self.area)
    }

    pub fn live_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }
}
