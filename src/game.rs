//! Frame loop and game-over state machine
//!
//! `Game` owns the configuration, the asset pool, the simulation state and
//! the RNG. Everything outside the simulation is a collaborator:
//! - `InputSource` reports held keys, the pointer, clicks and quit requests
//! - `Surface` draws sprites and text
//! - `Clock` paces frames and performs the game-over hold

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use crate::compute::{init_state, tick, FrameOutcome};
use crate::config::GameConfig;
use crate::consts::{GAME_OVER_SCORE_Y, GAME_OVER_TITLE_Y, HUD_MARGIN};
use crate::entities::{Align, FrameInput, GameOverReason, GameState, GameStatus, Label, Tint};
use crate::sprites::{Assets, Sprite};

/// Background fill of every frame.
pub const BACKGROUND: Tint = Tint::Black;

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Input state for one frame. Called once per frame, before simulation.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<FrameInput>;
}

/// A drawing target. Positions are world units.
pub trait Surface {
    fn fill(&mut self, tint: Tint) -> io::Result<()>;
    /// Draw `sprite` with its center at `center`.
    fn blit(&mut self, sprite: &Sprite, center: Vec2) -> io::Result<()>;
    fn text(&mut self, label: &Label) -> io::Result<()>;
    /// Finish the frame.
    fn present(&mut self) -> io::Result<()>;
}

pub trait Clock {
    /// Mark the start of a frame.
    fn begin_frame(&mut self);
    /// Block until the frame's time slot is used up.
    fn end_frame(&mut self);
    /// Block for a fixed time (game-over hold).
    fn delay(&mut self, duration: Duration);
}

/// Wall-clock pacing with `thread::sleep`.
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    started: Instant,
}

impl FrameClock {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            started: Instant::now(),
        }
    }
}

impl Clock for FrameClock {
    fn begin_frame(&mut self) {
        self.started = Instant::now();
    }

    fn end_frame(&mut self) {
        let elapsed = self.started.elapsed();
        if elapsed < self.frame {
            thread::sleep(self.frame - elapsed);
        }
    }

    fn delay(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// "Lives" top-left in red, "Score" top-right in yellow.
pub fn hud_labels(state: &GameState) -> [Label; 2] {
    [
        Label {
            text: format!("Lives: {}", state.lives),
            tint: Tint::Red,
            pos: Vec2::new(HUD_MARGIN, HUD_MARGIN),
            align: Align::Left,
        },
        Label {
            text: format!("Score: {}", state.score),
            tint: Tint::Yellow,
            pos: Vec2::new(state.area.x - HUD_MARGIN, HUD_MARGIN),
            align: Align::Right,
        },
    ]
}

pub fn game_over_labels(state: &GameState) -> [Label; 2] {
    let cx = state.area.x / 2.0;
    [
        Label {
            text: "Game Over".to_string(),
            tint: Tint::Red,
            pos: Vec2::new(cx, GAME_OVER_TITLE_Y),
            align: Align::Center,
        },
        Label {
            text: format!("Your Final Score is: {}", state.score),
            tint: Tint::White,
            pos: Vec2::new(cx, GAME_OVER_SCORE_Y),
            align: Align::Center,
        },
    ]
}

// ── Game ──────────────────────────────────────────────────────────────────────

pub struct Game<R: Rng> {
    config: GameConfig,
    assets: Assets,
    state: GameState,
    rng: R,
}

impl<R: Rng> Game<R> {
    pub fn new(config: GameConfig, assets: Assets, mut rng: R) -> Self {
        let state = init_state(&config, &assets, &mut rng);
        Self {
            config,
            assets,
            state,
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// One frame of the state machine. A quit request ends the run before
    /// any simulation work for the frame.
    pub fn step(&mut self, input: &FrameInput) -> FrameOutcome {
        if self.state.is_over() {
            return FrameOutcome::default();
        }
        if input.quit {
            self.state.status = GameStatus::GameOver(GameOverReason::Quit);
            return FrameOutcome::default();
        }
        tick(
            &mut self.state,
            input,
            &self.config,
            &self.assets,
            &mut self.rng,
        )
    }

    /// Draw the current frame: the playfield while playing, the final
    /// score screen once defeated.
    pub fn render<S: Surface>(&self, surface: &mut S) -> io::Result<()> {
        surface.fill(BACKGROUND)?;

        if self.state.status == GameStatus::GameOver(GameOverReason::Defeated) {
            for label in game_over_labels(&self.state) {
                surface.text(&label)?;
            }
            return surface.present();
        }

        let player = &self.state.player;
        surface.blit(self.assets.player(player.angle), player.pos)?;
        for enemy in &self.state.enemies {
            surface.blit(self.assets.enemy(enemy.variant), enemy.pos)?;
        }
        for bullet in &self.state.bullets {
            surface.blit(self.assets.bullet(bullet.variant, bullet.angle), bullet.pos)?;
        }
        for label in hud_labels(&self.state) {
            surface.text(&label)?;
        }
        surface.present()
    }

    /// Run frames until the game ends, then hold for the game-over pause.
    pub fn run<I, S, C>(
        &mut self,
        input: &mut I,
        surface: &mut S,
        clock: &mut C,
    ) -> io::Result<GameOverReason>
    where
        I: InputSource,
        S: Surface,
        C: Clock,
    {
        info!(
            "run started: {} lives, play area {}x{}, {} fps",
            self.state.lives, self.state.area.x, self.state.area.y, self.config.fps
        );

        loop {
            clock.begin_frame();
            let frame_input = input.poll()?;
            let outcome = self.step(&frame_input);
            if outcome.collisions.kills > 0 || outcome.collisions.player_hits > 0 {
                debug!(
                    "frame {}: {} kills, {} player hits, lives {}, score {}",
                    self.state.frame,
                    outcome.collisions.kills,
                    outcome.collisions.player_hits,
                    self.state.lives,
                    self.state.score
                );
            }

            match self.state.status {
                GameStatus::Playing => {
                    self.render(surface)?;
                    clock.end_frame();
                }
                GameStatus::GameOver(reason) => {
                    if reason == GameOverReason::Defeated {
                        self.render(surface)?;
                    }
                    info!(
                        "game over ({:?}) after {} frames, final score {}",
                        reason, self.state.frame, self.state.score
                    );
                    clock.delay(self.config.game_over_pause);
                    return Ok(reason);
                }
            }
        }
    }
}
