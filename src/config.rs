//! Game tunables
//!
//! `GameConfig::default()` reproduces the classic 800x600 arcade build. The
//! binary overrides individual fields from the command line and sizes the
//! play area from the terminal.

use std::fmt;
use std::time::Duration;

use glam::Vec2;

use crate::consts::*;

/// Smallest play area that still fits the HUD and the game-over text.
pub const MIN_WIDTH: f32 = 400.0;
pub const MIN_HEIGHT: f32 = GAME_OVER_SCORE_Y + CELL_HEIGHT * 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub starting_lives: u32,
    pub player_step: f32,
    pub bullet_speed: f32,
    pub enemy_step: f32,
    pub initial_enemies: usize,
    pub wave_size: usize,
    pub fps: u32,
    pub game_over_pause: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            starting_lives: STARTING_LIVES,
            player_step: PLAYER_STEP,
            bullet_speed: BULLET_SPEED,
            enemy_step: ENEMY_STEP,
            initial_enemies: INITIAL_ENEMIES,
            wave_size: WAVE_SIZE,
            fps: TARGET_FPS,
            game_over_pause: Duration::from_millis(GAME_OVER_PAUSE_MS),
        }
    }
}

impl GameConfig {
    /// Play area sized to a terminal of `cols × rows` cells.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self {
            width: cols as f32 * CELL_WIDTH,
            height: rows as f32 * CELL_HEIGHT,
            ..Self::default()
        }
    }

    pub fn area(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::AreaTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::NoLives);
        }
        if self.wave_size == 0 {
            return Err(ConfigError::EmptyWave);
        }
        if self.fps == 0 {
            return Err(ConfigError::ZeroFps);
        }
        for (name, value) in [
            ("player_step", self.player_step),
            ("bullet_speed", self.bullet_speed),
            ("enemy_step", self.enemy_step),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::BadSpeed { name, value });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    AreaTooSmall { width: f32, height: f32 },
    NoLives,
    EmptyWave,
    ZeroFps,
    BadSpeed { name: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaTooSmall { width, height } => write!(
                f,
                "play area {width}x{height} is smaller than the minimum {MIN_WIDTH}x{MIN_HEIGHT}"
            ),
            Self::NoLives => write!(f, "starting lives must be at least 1"),
            Self::EmptyWave => write!(f, "wave size must be at least 1"),
            Self::ZeroFps => write!(f, "frame rate must be at least 1"),
            Self::BadSpeed { name, value } => {
                write!(f, "{name} must be a positive number, got {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
