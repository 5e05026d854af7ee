//! Collision detection and its effect on score and lives
//!
//! Two passes per frame, always in this order:
//! 1. bullet ↔ enemy, box test, one kill per bullet, +1 score per kill
//! 2. player ↔ enemy, box test then per-cell mask test, every touching
//!    enemy is destroyed, at most one life lost per frame
//!
//! Passes only mark entities dead. The caller compacts the collections.

use glam::Vec2;

use crate::entities::{Bullet, Enemy, GameState, Player, Rect};
use crate::sprites::{Assets, Mask};

/// What the collision passes did this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Enemies destroyed by bullets.
    pub kills: u32,
    /// Enemies destroyed by touching the player.
    pub player_hits: u32,
    /// Lives actually deducted (0 or 1).
    pub lives_lost: u32,
}

/// Axis-aligned box overlap.
#[inline]
pub fn boxes_overlap(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

/// Two-tier test: boxes first, then any pair of solid mask cells.
///
/// Each mask is laid out from the top-left corner of its bounds.
pub fn masks_overlap(a: &Mask, a_bounds: &Rect, b: &Mask, b_bounds: &Rect) -> bool {
    if !boxes_overlap(a_bounds, b_bounds) {
        return false;
    }
    let b_origin: Vec2 = b_bounds.min;
    a.solid_cells(a_bounds.min)
        .filter(|cell| cell.intersects(b_bounds))
        .any(|cell| b.solid_cells(b_origin).any(|other| cell.intersects(&other)))
}

/// Bullet ↔ enemy pass. Returns the number of enemies destroyed.
///
/// Bullets are checked in order; each takes out the first live enemy it
/// overlaps and is consumed by it, so no pair is ever counted twice.
pub fn resolve_bullet_hits(bullets: &mut [Bullet], enemies: &mut [Enemy]) -> u32 {
    let mut kills = 0;
    for bullet in bullets.iter_mut().filter(|b| b.alive) {
        let bounds = bullet.bounds();
        if let Some(enemy) = enemies
            .iter_mut()
            .find(|e| e.alive && boxes_overlap(&bounds, &e.bounds()))
        {
            enemy.alive = false;
            bullet.alive = false;
            kills += 1;
        }
    }
    kills
}

/// Player ↔ enemy pass. Returns the number of enemies that touched the player.
pub fn resolve_player_hits(player: &Player, enemies: &mut [Enemy], assets: &Assets) -> u32 {
    let player_bounds = player.bounds();
    let player_mask = assets.player(player.angle).mask();
    let mut hits = 0;
    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        let enemy_mask = assets.enemy(enemy.variant).mask();
        if masks_overlap(player_mask, &player_bounds, enemy_mask, &enemy.bounds()) {
            enemy.alive = false;
            hits += 1;
        }
    }
    hits
}

/// Run both passes and apply score and lives.
pub fn resolve_collisions(state: &mut GameState, assets: &Assets) -> CollisionReport {
    let kills = resolve_bullet_hits(&mut state.bullets, &mut state.enemies);
    state.score += kills;

    let player_hits = resolve_player_hits(&state.player, &mut state.enemies, assets);
    let lives_lost = if player_hits > 0 && state.lives > 0 {
        state.lives -= 1;
        1
    } else {
        0
    };

    CollisionReport {
        kills,
        player_hits,
        lives_lost,
    }
}
