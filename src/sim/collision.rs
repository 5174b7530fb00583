//! Collision response math.
//!
//! The arena walls reflect a single velocity axis; destructible obstacles
//! absorb part of the normal component while leaving the tangential
//! component untouched.

use glam::Vec2;

/// A coordinate axis, used to pick which velocity component a wall flips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Negate one component of a velocity (boundary bounce).
#[inline]
pub fn reflect_axis(velocity: Vec2, axis: Axis) -> Vec2 {
    match axis {
        Axis::X => Vec2::new(-velocity.x, velocity.y),
        Axis::Y => Vec2::new(velocity.x, -velocity.y),
    }
}

/// Inelastic collision response against a unit surface normal.
///
/// The velocity is split into a normal component and a tangential
/// remainder; the normal component is reversed and scaled by
/// `restitution` (1 = elastic, 0 = fully absorbed), the tangential
/// component passes through unchanged.
#[inline]
pub fn collide_inelastic(velocity: Vec2, normal: Vec2, restitution: f32) -> Vec2 {
    let vn = velocity.dot(normal);
    let normal_vel = normal * vn;
    let tangent_vel = velocity - normal_vel;
    tangent_vel - normal_vel * restitution
}

/// Circle-circle overlap test (strict: touching is not a hit).
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    (a_pos - b_pos).length() < a_radius + b_radius
}
