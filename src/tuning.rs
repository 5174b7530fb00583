//! Data-driven physics balance.
//!
//! Everything a designer might want to tweak about the physical model
//! lives here so call sites never hardcode the numbers.

use serde::{Deserialize, Serialize};

/// Tunable physics constants for a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tuning {
    /// Downward acceleration applied to an in-flight projectile, units/s².
    pub gravity: f32,

    /// Fraction of projectile momentum converted into obstacle damage.
    pub damage_factor: f32,

    /// Fraction of the normal velocity component retained (reversed) when
    /// the projectile strikes an obstacle. 1 = elastic, 0 = fully absorbed.
    pub restitution: f32,

    /// Turn length ceiling in seconds.
    pub max_turn_time: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 98.0,
            damage_factor: 0.5,
            restitution: 0.7,
            max_turn_time: 12.0,
        }
    }
}
