/// Game rules: per-entity updates and the per-frame tick.
///
/// Functions mutate the state they are handed in place.  All randomness
/// comes through an injected `Rng`, so callers control determinism (tests
/// use a seeded `StdRng`).

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::collision::{resolve_collisions, CollisionReport};
use crate::config::GameConfig;
use crate::entities::{
    Bullet, DirectionKeys, Enemy, FrameInput, GameOverReason, GameState, GameStatus, Player, Rect,
};
use crate::sprites::Assets;
use crate::vector::{angle_of, chebyshev_step, direction, facing_angle};

/// Facing angle of a freshly created player (nose up).
pub const INITIAL_FACING: f32 = 90.0;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state for a new run: player centred, `initial_enemies` enemies.
pub fn init_state(config: &GameConfig, assets: &Assets, rng: &mut impl Rng) -> GameState {
    let area = config.area();
    let mut state = GameState {
        player: new_player(area, assets),
        enemies: Vec::with_capacity(config.wave_size.max(config.initial_enemies)),
        bullets: Vec::new(),
        lives: config.starting_lives,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        area,
    };
    spawn_enemies(&mut state, config.initial_enemies, assets, rng);
    state
}

pub fn new_player(area: Vec2, assets: &Assets) -> Player {
    Player {
        pos: area / 2.0,
        angle: INITIAL_FACING,
        extents: assets.player(INITIAL_FACING).extents(),
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Frame displacement for the held keys, `±step` per axis or zero.
///
/// A direction only applies if the player's box stays inside `area` after
/// the step. When both keys of an axis are held, right / down win.
pub fn movement_delta(keys: DirectionKeys, bounds: &Rect, area: Vec2, step: f32) -> Vec2 {
    let mut delta = Vec2::ZERO;
    if keys.left && bounds.left() - step >= 0.0 {
        delta.x = -step;
    }
    if keys.right && bounds.right() + step <= area.x {
        delta.x = step;
    }
    if keys.up && bounds.top() - step >= 0.0 {
        delta.y = -step;
    }
    if keys.down && bounds.bottom() + step <= area.y {
        delta.y = step;
    }
    delta
}

/// Move the player, then turn it toward the pointer.
///
/// Rotation runs every frame, even without movement. A pointer sitting
/// exactly on the player's center keeps the previous angle.
pub fn update_player(player: &mut Player, delta: Vec2, pointer: Vec2, assets: &Assets) {
    player.pos += delta;
    if let Some(angle) = facing_angle(player.pos, pointer) {
        player.angle = angle;
    }
    player.extents = assets.player(player.angle).extents();
}

// ── Enemies ──────────────────────────────────────────────────────────────────

/// Random variant, placed so the whole visual is inside the play area.
pub fn spawn_enemy(area: Vec2, assets: &Assets, rng: &mut impl Rng) -> Enemy {
    let variant = assets.pick_enemy(rng);
    let extents = assets.enemy(variant).extents();
    let half = extents / 2.0;
    let pos = Vec2::new(
        uniform(rng, half.x, area.x - half.x),
        uniform(rng, half.y, area.y - half.y),
    );
    Enemy {
        pos,
        variant,
        extents,
        alive: true,
    }
}

pub fn spawn_enemies(state: &mut GameState, count: usize, assets: &Assets, rng: &mut impl Rng) {
    for _ in 0..count {
        let enemy = spawn_enemy(state.area, assets, rng);
        state.enemies.push(enemy);
    }
}

/// Homing step: Chebyshev-normalized, at most `step` per axis.
pub fn update_enemy(enemy: &mut Enemy, target: Vec2, step: f32) {
    if let Some(dir) = chebyshev_step(enemy.pos, target) {
        enemy.pos += dir * step;
    }
}

/// Spawn a fresh wave if no enemy is left. Returns the number spawned.
pub fn replenish_wave(
    state: &mut GameState,
    wave_size: usize,
    assets: &Assets,
    rng: &mut impl Rng,
) -> usize {
    if state.live_enemies() > 0 {
        return 0;
    }
    spawn_enemies(state, wave_size, assets, rng);
    wave_size
}

// ── Bullets ──────────────────────────────────────────────────────────────────

/// Unit vector from the player's center toward the pointer.
pub fn compute_fire_direction(player_center: Vec2, pointer: Vec2) -> Option<Vec2> {
    direction(player_center, pointer)
}

/// A bullet leaving `player_center` toward `pointer`, or `None` when the
/// pointer sits exactly on the center.
pub fn fire_bullet(
    player_center: Vec2,
    pointer: Vec2,
    speed: f32,
    assets: &Assets,
    rng: &mut impl Rng,
) -> Option<Bullet> {
    let dir = compute_fire_direction(player_center, pointer)?;
    let angle = angle_of(dir);
    let variant = assets.pick_bullet(rng);
    Some(Bullet {
        pos: player_center,
        dir,
        speed,
        angle,
        variant,
        extents: assets.bullet(variant, angle).extents(),
        alive: true,
    })
}

/// Advance one frame; the bullet dies once it is completely off screen.
pub fn update_bullet(bullet: &mut Bullet, area: Vec2) {
    bullet.pos += bullet.dir * bullet.speed;
    let b = bullet.bounds();
    if b.bottom() < 0.0 || b.top() > area.y || b.right() < 0.0 || b.left() > area.x {
        bullet.alive = false;
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// What happened during one tick, for logging and tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    pub bullets_fired: u32,
    pub collisions: CollisionReport,
    pub wave_spawned: usize,
    pub defeated: bool,
}

/// Drop every entity marked dead during this frame.
pub fn compact(state: &mut GameState) {
    state.enemies.retain(|e| e.alive);
    state.bullets.retain(|b| b.alive);
}

/// Advance the simulation by one frame.  Does nothing once the game is over.
pub fn tick(
    state: &mut GameState,
    input: &FrameInput,
    config: &GameConfig,
    assets: &Assets,
    rng: &mut impl Rng,
) -> FrameOutcome {
    let mut outcome = FrameOutcome::default();
    if state.is_over() {
        return outcome;
    }
    state.frame += 1;

    // ── 1. Player ────────────────────────────────────────────────────────────
    let delta = movement_delta(
        input.keys,
        &state.player.bounds(),
        state.area,
        config.player_step,
    );
    update_player(&mut state.player, delta, input.pointer, assets);

    // ── 2. Enemies home in ───────────────────────────────────────────────────
    let target = state.player.pos;
    for enemy in state.enemies.iter_mut().filter(|e| e.alive) {
        update_enemy(enemy, target, config.enemy_step);
    }

    // ── 3. Fire events ───────────────────────────────────────────────────────
    for _ in 0..input.fire {
        match fire_bullet(state.player.pos, input.pointer, config.bullet_speed, assets, rng) {
            Some(bullet) => {
                state.bullets.push(bullet);
                outcome.bullets_fired += 1;
            }
            None => debug!("frame {}: pointer on player center, shot skipped", state.frame),
        }
    }

    // ── 4. Bullets travel ────────────────────────────────────────────────────
    let area = state.area;
    for bullet in state.bullets.iter_mut().filter(|b| b.alive) {
        update_bullet(bullet, area);
    }

    // ── 5. Collisions, then drop the dead ────────────────────────────────────
    outcome.collisions = resolve_collisions(state, assets);
    compact(state);

    // ── 6. Wave check ────────────────────────────────────────────────────────
    outcome.wave_spawned = replenish_wave(state, config.wave_size, assets, rng);
    if outcome.wave_spawned > 0 {
        debug!(
            "frame {}: wave cleared, spawned {} enemies",
            state.frame, outcome.wave_spawned
        );
    }

    // ── 7. Terminal condition ────────────────────────────────────────────────
    if state.lives == 0 {
        state.status = GameStatus::GameOver(GameOverReason::Defeated);
        outcome.defeated = true;
    }

    outcome
}

/// Uniform sample from `[lo, hi]`, collapsing to the midpoint if the range
/// is empty.
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        (lo + hi) / 2.0
    }
}
