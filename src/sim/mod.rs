//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by explicit `dt` steps and discrete commands
//! - No randomness
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod state;
pub mod tick;

pub use body::{Aabb, Body};
pub use collision::{Axis, circles_overlap, collide_inelastic, reflect_axis};
pub use state::{
    MatchEvent, MatchState, Obstacle, ObstacleSnapshot, Player, PlayerSnapshot, Projectile,
    ProjectileSnapshot, Snapshot, TurnPhase,
};
pub use tick::{LaunchCommand, TickInput, tick};
