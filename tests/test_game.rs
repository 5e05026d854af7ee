use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use glam::Vec2;
use space_hunter::entities::*;
use space_hunter::game::{game_over_labels, hud_labels, BACKGROUND};
use space_hunter::sprites::{Assets, Sprite};
use space_hunter::{Clock, Game, GameConfig, InputSource, Surface};

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Collaborator fakes ────────────────────────────────────────────────────────

/// Plays back queued frames, then idles.
#[derive(Default)]
struct ScriptedInput {
    frames: VecDeque<FrameInput>,
    polls: usize,
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> io::Result<FrameInput> {
        self.polls += 1;
        Ok(self.frames.pop_front().unwrap_or_default())
    }
}

#[derive(Default)]
struct RecordingSurface {
    fills: Vec<Tint>,
    blits: Vec<Vec2>,
    labels: Vec<Label>,
    presents: usize,
}

impl Surface for RecordingSurface {
    fn fill(&mut self, tint: Tint) -> io::Result<()> {
        self.fills.push(tint);
        Ok(())
    }

    fn blit(&mut self, _sprite: &Sprite, center: Vec2) -> io::Result<()> {
        self.blits.push(center);
        Ok(())
    }

    fn text(&mut self, label: &Label) -> io::Result<()> {
        self.labels.push(label.clone());
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        self.presents += 1;
        Ok(())
    }
}

#[derive(Default)]
struct ManualClock {
    frames_begun: usize,
    frames_ended: usize,
    delays: Vec<Duration>,
}

impl Clock for ManualClock {
    fn begin_frame(&mut self) {
        self.frames_begun += 1;
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
    }

    fn delay(&mut self, duration: Duration) {
        self.delays.push(duration);
    }
}

fn new_game(config: GameConfig) -> Game<StdRng> {
    Game::new(config, Assets::builtin(), StdRng::seed_from_u64(7))
}

/// Replace the wave with a single enemy sitting on the player.
fn plant_enemy_on_player(game: &mut Game<StdRng>) {
    let extents = game.assets().enemy(0).extents();
    let state = game.state_mut();
    let pos = state.player.pos;
    state.enemies = vec![Enemy {
        pos,
        variant: 0,
        extents,
        alive: true,
    }];
}

// ── step ──────────────────────────────────────────────────────────────────────

#[test]
fn quit_ends_run_before_simulating() {
    let mut game = new_game(GameConfig::default());
    let input = FrameInput {
        pointer: Vec2::new(400.0, 0.0),
        fire: 1,
        quit: true,
        ..Default::default()
    };
    game.step(&input);
    assert_eq!(game.state().status, GameStatus::GameOver(GameOverReason::Quit));
    assert_eq!(game.state().frame, 0);
    assert!(game.state().bullets.is_empty());
}

#[test]
fn ten_player_hits_end_the_game() {
    let mut game = new_game(GameConfig::default());
    let mut lives_seen = vec![game.state().lives];

    for _ in 0..10 {
        assert_eq!(game.state().status, GameStatus::Playing);
        plant_enemy_on_player(&mut game);
        game.step(&FrameInput::default());
        lives_seen.push(game.state().lives);
    }

    assert_eq!(lives_seen, vec![10, 9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    assert_eq!(
        game.state().status,
        GameStatus::GameOver(GameOverReason::Defeated)
    );

    // the run loop only has the hold left to do
    let mut input = ScriptedInput::default();
    let mut surface = RecordingSurface::default();
    let mut clock = ManualClock::default();
    let reason = game.run(&mut input, &mut surface, &mut clock).unwrap();

    assert_eq!(reason, GameOverReason::Defeated);
    assert_eq!(clock.delays, vec![Duration::from_millis(2500)]);
    assert_eq!(game.state().lives, 0);
}

#[test]
fn bullet_kill_refills_the_wave_same_frame() {
    let mut game = new_game(GameConfig::default());
    assert_eq!(game.state().enemies.len(), 1);

    let spot = Vec2::new(100.0, 100.0);
    let enemy_extents = game.assets().enemy(0).extents();
    let bullet_extents = game.assets().bullet(0, 90.0).extents();
    {
        let state = game.state_mut();
        state.enemies = vec![Enemy {
            pos: spot,
            variant: 0,
            extents: enemy_extents,
            alive: true,
        }];
        state.bullets.push(Bullet {
            pos: spot,
            dir: Vec2::new(0.0, -1.0),
            speed: 10.0,
            angle: 90.0,
            variant: 0,
            extents: bullet_extents,
            alive: true,
        });
    }

    let outcome = game.step(&FrameInput::default());

    assert_eq!(outcome.collisions.kills, 1);
    assert_eq!(game.state().score, 1);
    assert_eq!(game.state().lives, 10);
    assert_eq!(game.state().enemies.len(), 5);
}

// ── run ───────────────────────────────────────────────────────────────────────

#[test]
fn run_quit_holds_without_game_over_screen() {
    let mut game = new_game(GameConfig::default());
    let mut input = ScriptedInput {
        frames: VecDeque::from(vec![FrameInput {
            quit: true,
            ..Default::default()
        }]),
        polls: 0,
    };
    let mut surface = RecordingSurface::default();
    let mut clock = ManualClock::default();

    let reason = game.run(&mut input, &mut surface, &mut clock).unwrap();

    assert_eq!(reason, GameOverReason::Quit);
    assert_eq!(input.polls, 1);
    assert_eq!(surface.presents, 0);
    assert_eq!(clock.delays, vec![Duration::from_millis(2500)]);
}

#[test]
fn run_defeat_shows_final_score_then_holds() {
    let config = GameConfig {
        starting_lives: 1,
        game_over_pause: Duration::from_millis(40),
        ..GameConfig::default()
    };
    let mut game = new_game(config);
    plant_enemy_on_player(&mut game);

    let mut input = ScriptedInput::default();
    let mut surface = RecordingSurface::default();
    let mut clock = ManualClock::default();

    let reason = game.run(&mut input, &mut surface, &mut clock).unwrap();

    assert_eq!(reason, GameOverReason::Defeated);
    assert_eq!(surface.presents, 1);
    assert_eq!(surface.fills, vec![BACKGROUND]);
    assert!(surface.blits.is_empty());
    let texts: Vec<&str> = surface.labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Game Over", "Your Final Score is: 0"]);
    assert_eq!(clock.delays, vec![Duration::from_millis(40)]);
}

#[test]
fn run_paces_every_playing_frame() {
    let mut game = new_game(GameConfig::default());
    let mut frames: VecDeque<FrameInput> = (0..5).map(|_| FrameInput::default()).collect();
    frames.push_back(FrameInput {
        quit: true,
        ..Default::default()
    });
    let mut input = ScriptedInput { frames, polls: 0 };
    let mut surface = RecordingSurface::default();
    let mut clock = ManualClock::default();

    game.run(&mut input, &mut surface, &mut clock).unwrap();

    assert_eq!(clock.frames_begun, 6);
    assert_eq!(clock.frames_ended, 5);
    assert_eq!(surface.presents, 5);
}

// ── render ────────────────────────────────────────────────────────────────────

#[test]
fn render_draws_entities_and_hud() {
    let game = new_game(GameConfig::default());
    let mut surface = RecordingSurface::default();

    game.render(&mut surface).unwrap();

    assert_eq!(surface.fills, vec![BACKGROUND]);
    // player + one enemy
    assert_eq!(surface.blits.len(), 2);
    assert_eq!(surface.blits[0], game.state().player.pos);
    let texts: Vec<&str> = surface.labels.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["Lives: 10", "Score: 0"]);
    assert_eq!(surface.presents, 1);
}

#[test]
fn hud_layout_matches_corners() {
    let game = new_game(GameConfig::default());
    let [lives, score] = hud_labels(game.state());
    assert_eq!(lives.tint, Tint::Red);
    assert_eq!(lives.pos, Vec2::new(10.0, 10.0));
    assert_eq!(lives.align, Align::Left);
    assert_eq!(score.tint, Tint::Yellow);
    assert_eq!(score.pos, Vec2::new(790.0, 10.0));
    assert_eq!(score.align, Align::Right);
}

#[test]
fn game_over_text_is_centred() {
    let mut game = new_game(GameConfig::default());
    game.state_mut().score = 42;
    let [title, score] = game_over_labels(game.state());
    assert_eq!(title.pos, Vec2::new(400.0, 150.0));
    assert_eq!(title.tint, Tint::Red);
    assert_eq!(score.text, "Your Final Score is: 42");
    assert_eq!(score.pos, Vec2::new(400.0, 250.0));
    assert_eq!(score.tint, Tint::White);
    assert_eq!(score.align, Align::Center);
}
