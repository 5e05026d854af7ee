//! Space Hunter - a top-down arcade shooter for the terminal
//!
//! Core modules:
//! - `vector`: angle / direction helpers shared by rotation and shooting
//! - `entities`: pure data for the player, enemies, bullets and game state
//! - `sprites`: the fixed pool of glyph-art visuals (extents + masks)
//! - `compute`: per-entity update rules and the per-frame `tick`
//! - `collision`: box and mask tests, scoring and lives resolution
//! - `game`: the frame loop / state machine and its collaborator traits
//! - `config`: tunables and their validation

pub mod collision;
pub mod compute;
pub mod config;
pub mod entities;
pub mod game;
pub mod sprites;
pub mod vector;

pub use config::{ConfigError, GameConfig};
pub use game::{Clock, Game, InputSource, Surface};

/// Game constants (values of the classic arcade build)
pub mod consts {
    /// Lives at the start of a run
    pub const STARTING_LIVES: u32 = 10;
    /// Player displacement per frame per held direction
    pub const PLAYER_STEP: f32 = 5.0;
    /// Bullet travel per frame
    pub const BULLET_SPEED: f32 = 10.0;
    /// Enemy homing step (per axis, Chebyshev-normalized)
    pub const ENEMY_STEP: f32 = 1.0;
    /// Enemies alive when the run starts
    pub const INITIAL_ENEMIES: usize = 1;
    /// Enemies spawned whenever the wave is cleared
    pub const WAVE_SIZE: usize = 5;
    /// Target frame rate
    pub const TARGET_FPS: u32 = 60;
    /// Hold after game over before teardown (ms)
    pub const GAME_OVER_PAUSE_MS: u64 = 2500;

    /// World units covered by one terminal cell
    pub const CELL_WIDTH: f32 = 10.0;
    pub const CELL_HEIGHT: f32 = 20.0;

    /// Reference play area (classic 800x600 window)
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// HUD layout
    pub const HUD_MARGIN: f32 = 10.0;
    pub const GAME_OVER_TITLE_Y: f32 = 150.0;
    pub const GAME_OVER_SCORE_Y: f32 = 250.0;
}
