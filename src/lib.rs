//! Cannonade - a two-player turn-based artillery duel
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ballistics, collisions, turn state)
//! - `tuning`: Data-driven physics balance
//!
//! Rendering, window construction and input mapping are external
//! collaborators: they read [`sim::Snapshot`] and feed discrete commands
//! through [`sim::TickInput`].

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Recommended driver timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions (screen coordinates, y grows downward)
    pub const ARENA_WIDTH: f32 = 1200.0;
    pub const ARENA_HEIGHT: f32 = 400.0;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 8.0;
    pub const PROJECTILE_MASS: f32 = 1.0;

    /// Representative (avatar) radius
    pub const AVATAR_RADIUS: f32 = 15.0;

    /// How far past the arena edge the projectile may travel before the
    /// turn ends
    pub const EXIT_MARGIN: f32 = 100.0;

    /// Launch command ranges (clamped upstream by the UI, not validated here)
    pub const MIN_LAUNCH_ANGLE: f32 = 0.0;
    pub const MAX_LAUNCH_ANGLE: f32 = 180.0;
    pub const MIN_LAUNCH_SPEED: f32 = 50.0;
    pub const MAX_LAUNCH_SPEED: f32 = 300.0;
}

/// Convert a launch angle (degrees) and speed into a velocity vector.
///
/// Screen coordinates: up is negative y, so 90 degrees fires straight up.
#[inline]
pub fn launch_velocity(angle_degrees: f32, speed: f32) -> Vec2 {
    let theta = angle_degrees.to_radians();
    Vec2::new(speed * theta.cos(), -speed * theta.sin())
}
