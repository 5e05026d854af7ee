//! Angle and direction helpers
//!
//! Screen space: x grows right, y grows down. Angles are in degrees,
//! counter-clockwise as seen on screen, 0° pointing right.
//!
//! Every helper returns `None` when the two points coincide instead of
//! dividing by zero; callers treat that as "no update this frame".

use glam::Vec2;

/// Facing angle (degrees) of a visual at `from` looking at `to`.
#[inline]
pub fn facing_angle(from: Vec2, to: Vec2) -> Option<f32> {
    let rel = to - from;
    if rel == Vec2::ZERO {
        return None;
    }
    Some((-rel.y.atan2(rel.x)).to_degrees())
}

/// Unit vector pointing from `from` to `to`.
#[inline]
pub fn direction(from: Vec2, to: Vec2) -> Option<Vec2> {
    let rel = to - from;
    let len = rel.length();
    if len == 0.0 {
        return None;
    }
    Some(rel / len)
}

/// Chebyshev-normalized step from `from` toward `to`.
///
/// The larger axis moves exactly one unit, the other proportionally less,
/// so diagonal approaches are faster than Euclidean homing.
#[inline]
pub fn chebyshev_step(from: Vec2, to: Vec2) -> Option<Vec2> {
    let delta = to - from;
    let dist = delta.abs().max_element();
    if dist == 0.0 {
        return None;
    }
    Some(delta / dist)
}

/// Display angle (degrees) of a direction vector in screen space.
#[inline]
pub fn angle_of(dir: Vec2) -> f32 {
    (-dir.y.atan2(dir.x)).to_degrees()
}

/// 45° sector of an angle: 0 = right, 2 = up, 4 = left, 6 = down.
#[inline]
pub fn octant(angle_deg: f32) -> usize {
    ((angle_deg / 45.0).round() as i32).rem_euclid(8) as usize
}
