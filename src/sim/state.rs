//! Match state and core simulation types
//!
//! Everything a driver needs to persist or replay a duel lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Aabb, Body};
use super::collision::{self, Axis};
use crate::consts::*;
use crate::launch_velocity;
use crate::tuning::Tuning;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No projectile in flight; a launch command is accepted
    Idle,
    /// Projectile in flight; the turn timer is running
    InFlight,
    /// Match decided; only reset exits this phase
    GameOver,
}

/// The single shared projectile.
///
/// Constructed inactive; `launch` arms it, `deactivate` disarms it until
/// the next launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Player who fired the current shot
    pub owner: usize,
    mass: f32,
    active: bool,
    gravity: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, radius: f32, mass: f32, gravity: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            owner: 0,
            mass,
            active: false,
            gravity,
        }
    }

    /// Arm the projectile with a launch angle (degrees) and speed.
    ///
    /// Silently ignored while a shot is already in flight.
    pub fn launch(&mut self, angle_degrees: f32, speed: f32, owner: usize) {
        if self.active {
            log::debug!("launch ignored: projectile already in flight");
            return;
        }
        self.vel = launch_velocity(angle_degrees, speed);
        self.active = true;
        self.owner = owner;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Disarm the projectile. Idempotent.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Damage-scaling quantity: mass times speed.
    #[inline]
    pub fn momentum(&self) -> f32 {
        self.mass * self.vel.length()
    }

    /// Boundary bounce: flip one velocity component.
    pub fn reflect_axis(&mut self, axis: Axis) {
        self.vel = collision::reflect_axis(self.vel, axis);
    }

    /// Oblique bounce off a destructible surface.
    pub fn apply_inelastic(&mut self, normal: Vec2, restitution: f32) {
        self.vel = collision::collide_inelastic(self.vel, normal, restitution);
    }
}

impl Body for Projectile {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    /// Semi-implicit Euler: velocity first, then position, for stable
    /// energy behavior under gravity. No-op while inactive.
    fn integrate(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.vel.y += self.gravity * dt;
        self.pos += self.vel * dt;
    }

    fn bounds(&self) -> Aabb {
        Aabb::new(
            self.pos - Vec2::splat(self.radius),
            self.pos + Vec2::splat(self.radius),
        )
    }
}

/// A static destructible block. `pos` is the top-left corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    resistance: f32,
    max_resistance: f32,
}

impl Obstacle {
    pub fn new(pos: Vec2, width: f32, height: f32, resistance: f32) -> Self {
        Self {
            pos,
            width,
            height,
            resistance,
            max_resistance: resistance,
        }
    }

    /// Reduce resistance, clamped at zero.
    pub fn take_damage(&mut self, amount: f32) {
        self.resistance = (self.resistance - amount).max(0.0);
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.resistance == 0.0
    }

    #[inline]
    pub fn resistance(&self) -> f32 {
        self.resistance
    }

    #[inline]
    pub fn max_resistance(&self) -> f32 {
        self.max_resistance
    }

    /// Remaining fraction of hit points, for display.
    #[inline]
    pub fn resistance_ratio(&self) -> f32 {
        self.resistance / self.max_resistance
    }

    /// Axis-aligned unit normal of the face nearest to `other_pos`.
    ///
    /// Penetration depth along each axis is normalized by that axis's
    /// half-extent and the larger one wins; ties go to the horizontal
    /// axis. Near-corner hits can misclassify the face; accepted, as
    /// fixing it would change gameplay feel.
    pub fn collision_normal(&self, other_pos: Vec2) -> Vec2 {
        let dir = other_pos - self.bounds().center();
        let dx = dir.x.abs() / (self.width / 2.0);
        let dy = dir.y.abs() / (self.height / 2.0);

        if dx >= dy {
            Vec2::new(if dir.x > 0.0 { 1.0 } else { -1.0 }, 0.0)
        } else {
            Vec2::new(0.0, if dir.y > 0.0 { 1.0 } else { -1.0 })
        }
    }
}

impl Body for Obstacle {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn velocity(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn mass(&self) -> f32 {
        1.0
    }

    /// Obstacles are static; nothing moves.
    fn integrate(&mut self, _dt: f32) {}

    fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.width, self.height)
    }
}

/// One combatant: an obstacle line and a circular avatar target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: usize,
    pub obstacles: Vec<Obstacle>,
    pub avatar_pos: Vec2,
    pub avatar_radius: f32,
    pub color: [u8; 3],
}

impl Player {
    /// Sweep out destroyed obstacles, returning how many were removed.
    pub fn remove_destroyed_obstacles(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain(|obstacle| !obstacle.is_destroyed());
        before - self.obstacles.len()
    }

    /// Defeated once the obstacle line is gone.
    #[inline]
    pub fn has_lost(&self) -> bool {
        self.obstacles.is_empty()
    }
}

/// Something a UI or audio collaborator may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MatchEvent {
    ProjectileLaunched { player: usize },
    WallBounce,
    ObstacleDamaged { player: usize, damage: f32 },
    ObstacleDestroyed { player: usize },
    TurnEnded { next_player: usize },
    MatchWon { winner: usize },
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Physics balance for this match
    pub tuning: Tuning,
    /// Arena rectangle
    pub bounds: Aabb,
    /// The two combatants, indices 0 and 1
    pub players: [Player; 2],
    /// The single shared projectile
    pub projectile: Projectile,
    /// Whose turn it is
    pub current_player: usize,
    /// Seconds elapsed in the current turn
    pub turn_timer: f32,
    /// Turn state machine
    pub phase: TurnPhase,
    /// Set exactly when `phase` is `GameOver`
    pub winner: Option<usize>,
    /// Events raised by the most recent tick (not part of saved state)
    #[serde(skip)]
    pub events: Vec<MatchEvent>,
}

impl MatchState {
    /// Create a fresh match over a `width` x `height` arena.
    pub fn new(width: f32, height: f32, tuning: Tuning) -> Self {
        let bounds = Aabb::new(Vec2::ZERO, Vec2::new(width, height));
        Self {
            tuning,
            bounds,
            players: starting_lineup(&bounds),
            projectile: Projectile::new(
                Vec2::ZERO,
                PROJECTILE_RADIUS,
                PROJECTILE_MASS,
                tuning.gravity,
            ),
            current_player: 0,
            turn_timer: 0.0,
            phase: TurnPhase::Idle,
            winner: None,
            events: Vec::new(),
        }
    }

    /// Fire the current player's shot from their avatar position.
    ///
    /// Silently ignored unless the match is idle; out-of-range values are
    /// clamped upstream by the UI, not validated here.
    pub fn launch_projectile(&mut self, angle_degrees: f32, speed: f32) {
        if self.phase != TurnPhase::Idle {
            log::debug!("launch ignored in phase {:?}", self.phase);
            return;
        }
        self.projectile.pos = self.players[self.current_player].avatar_pos;
        self.projectile
            .launch(angle_degrees, speed, self.current_player);
        self.turn_timer = 0.0;
        self.phase = TurnPhase::InFlight;
        self.events.push(MatchEvent::ProjectileLaunched {
            player: self.current_player,
        });
        log::info!(
            "player {} fires: angle {:.1} deg, speed {:.1}",
            self.current_player,
            angle_degrees,
            speed
        );
    }

    /// Restore the starting configuration.
    pub fn reset(&mut self) {
        self.players = starting_lineup(&self.bounds);
        self.projectile.deactivate();
        self.current_player = 0;
        self.turn_timer = 0.0;
        self.phase = TurnPhase::Idle;
        self.winner = None;
        self.events.clear();
        log::info!("match reset");
    }

    #[inline]
    pub fn is_projectile_active(&self) -> bool {
        self.projectile.is_active()
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    /// Seconds left in the current turn, floored at zero for display.
    pub fn turn_time_left(&self) -> f32 {
        (self.tuning.max_turn_time - self.turn_timer).max(0.0)
    }

    /// Read-only view handed to the rendering collaborator.
    pub fn snapshot(&self) -> Snapshot {
        let player_snapshot = |player: &Player| PlayerSnapshot {
            avatar_pos: player.avatar_pos,
            avatar_radius: player.avatar_radius,
            color: player.color,
            obstacles: player
                .obstacles
                .iter()
                .map(|obstacle| ObstacleSnapshot {
                    rect: obstacle.bounds(),
                    resistance_ratio: obstacle.resistance_ratio(),
                })
                .collect(),
        };

        Snapshot {
            projectile: ProjectileSnapshot {
                pos: self.projectile.pos,
                radius: self.projectile.radius,
                active: self.projectile.is_active(),
                owner: self.projectile.owner,
            },
            players: [
                player_snapshot(&self.players[0]),
                player_snapshot(&self.players[1]),
            ],
            current_player: self.current_player,
            game_over: self.is_game_over(),
            winner: self.winner,
            turn_time_left: self.turn_time_left(),
        }
    }
}

/// Both players with their canonical obstacle lines: player 0 defends the
/// left side, player 1 the right, mirrored around the arena center.
fn starting_lineup(bounds: &Aabb) -> [Player; 2] {
    let w = bounds.width();
    let h = bounds.height();

    let left = Player {
        id: 0,
        obstacles: vec![
            Obstacle::new(Vec2::new(120.0, h - 180.0), 70.0, 100.0, 120.0),
            Obstacle::new(Vec2::new(210.0, h - 150.0), 60.0, 70.0, 100.0),
            Obstacle::new(Vec2::new(150.0, h - 280.0), 80.0, 80.0, 150.0),
            Obstacle::new(Vec2::new(290.0, h - 200.0), 70.0, 120.0, 130.0),
        ],
        avatar_pos: Vec2::new(70.0, h - 70.0),
        avatar_radius: AVATAR_RADIUS,
        color: [200, 80, 80],
    };

    let right = Player {
        id: 1,
        obstacles: vec![
            Obstacle::new(Vec2::new(w - 190.0, h - 180.0), 70.0, 100.0, 120.0),
            Obstacle::new(Vec2::new(w - 270.0, h - 150.0), 60.0, 70.0, 100.0),
            Obstacle::new(Vec2::new(w - 230.0, h - 280.0), 80.0, 80.0, 150.0),
            Obstacle::new(Vec2::new(w - 360.0, h - 200.0), 70.0, 120.0, 130.0),
        ],
        avatar_pos: Vec2::new(w - 70.0, h - 70.0),
        avatar_radius: AVATAR_RADIUS,
        color: [80, 120, 200],
    };

    [left, right]
}

/// Drawable projectile state
#[derive(Debug, Clone, Serialize)]
pub struct ProjectileSnapshot {
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
    pub owner: usize,
}

/// Drawable obstacle state
#[derive(Debug, Clone, Serialize)]
pub struct ObstacleSnapshot {
    pub rect: Aabb,
    pub resistance_ratio: f32,
}

/// Drawable player state
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub avatar_pos: Vec2,
    pub avatar_radius: f32,
    pub color: [u8; 3],
    pub obstacles: Vec<ObstacleSnapshot>,
}

/// Everything the rendering collaborator needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub projectile: ProjectileSnapshot,
    pub players: [PlayerSnapshot; 2],
    pub current_player: usize,
    pub game_over: bool,
    pub winner: Option<usize>,
    pub turn_time_left: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_projectile() -> Projectile {
        Projectile::new(Vec2::ZERO, PROJECTILE_RADIUS, PROJECTILE_MASS, 98.0)
    }

    #[test]
    fn test_launch_straight_up() {
        let mut projectile = test_projectile();
        projectile.launch(90.0, 150.0, 0);
        assert!(projectile.is_active());
        assert!(projectile.vel.x.abs() < 1e-3);
        assert!((projectile.vel.y - (-150.0)).abs() < 1e-3);
    }

    #[test]
    fn test_launch_horizontal() {
        let mut projectile = test_projectile();
        projectile.launch(0.0, 150.0, 1);
        assert_eq!(projectile.owner, 1);
        assert!((projectile.vel.x - 150.0).abs() < 1e-3);
        assert!(projectile.vel.y.abs() < 1e-3);
    }

    #[test]
    fn test_launch_while_active_ignored() {
        let mut projectile = test_projectile();
        projectile.launch(0.0, 150.0, 0);
        let vel = projectile.vel;
        projectile.launch(90.0, 300.0, 1);
        assert_eq!(projectile.vel, vel);
        assert_eq!(projectile.owner, 0);
    }

    #[test]
    fn test_deactivate_idempotent() {
        let mut projectile = test_projectile();
        projectile.launch(0.0, 150.0, 0);
        projectile.deactivate();
        assert!(!projectile.is_active());
        projectile.deactivate();
        assert!(!projectile.is_active());
    }

    #[test]
    fn test_inactive_projectile_does_not_integrate() {
        let mut projectile = test_projectile();
        projectile.integrate(1.0);
        assert_eq!(projectile.pos, Vec2::ZERO);
        assert_eq!(projectile.vel, Vec2::ZERO);
    }

    #[test]
    fn test_momentum_is_mass_times_speed() {
        let mut projectile = test_projectile();
        projectile.launch(0.0, 150.0, 0);
        assert!((projectile.momentum() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_free_fall_symplectic() {
        // Horizontal launch from the origin: after time T the vertical
        // velocity is exactly g*T and the drop is g*T^2/2 up to the
        // discretization term.
        let gravity = 98.0;
        let dt = 1.0 / 60.0;
        let steps = 600;
        let total_time = dt * steps as f32;

        let mut projectile = Projectile::new(Vec2::ZERO, 8.0, 1.0, gravity);
        projectile.launch(0.0, 120.0, 0);
        for _ in 0..steps {
            projectile.integrate(dt);
        }

        assert!((projectile.vel.y - gravity * total_time).abs() < 0.5);

        let ideal_drop = gravity * total_time * total_time / 2.0;
        let relative_error = (projectile.pos.y - ideal_drop).abs() / ideal_drop;
        assert!(relative_error < 0.005, "drop off by {relative_error}");
    }

    #[test]
    fn test_obstacle_destroyed_at_zero() {
        let mut obstacle = Obstacle::new(Vec2::ZERO, 70.0, 100.0, 120.0);
        assert!(!obstacle.is_destroyed());
        obstacle.take_damage(120.0);
        assert!(obstacle.is_destroyed());
        assert_eq!(obstacle.resistance(), 0.0);
        // Further damage stays clamped
        obstacle.take_damage(50.0);
        assert_eq!(obstacle.resistance(), 0.0);
    }

    #[test]
    fn test_collision_normal_faces() {
        // 70x100 rectangle cornered at the origin, center (35, 50)
        let obstacle = Obstacle::new(Vec2::ZERO, 70.0, 100.0, 120.0);

        assert_eq!(
            obstacle.collision_normal(Vec2::new(100.0, 50.0)),
            Vec2::new(1.0, 0.0)
        );
        assert_eq!(
            obstacle.collision_normal(Vec2::new(-30.0, 50.0)),
            Vec2::new(-1.0, 0.0)
        );
        assert_eq!(
            obstacle.collision_normal(Vec2::new(35.0, -40.0)),
            Vec2::new(0.0, -1.0)
        );
        assert_eq!(
            obstacle.collision_normal(Vec2::new(35.0, 160.0)),
            Vec2::new(0.0, 1.0)
        );
    }

    #[test]
    fn test_collision_normal_tie_goes_horizontal() {
        // (70, 100) is exactly on the diagonal from the center (35, 50)
        let obstacle = Obstacle::new(Vec2::ZERO, 70.0, 100.0, 120.0);
        assert_eq!(
            obstacle.collision_normal(Vec2::new(70.0, 100.0)),
            Vec2::new(1.0, 0.0)
        );
    }

    #[test]
    fn test_remove_destroyed_obstacles() {
        let mut state = MatchState::new(ARENA_WIDTH, ARENA_HEIGHT, Tuning::default());
        state.players[0].obstacles[1].take_damage(1000.0);
        let removed = state.players[0].remove_destroyed_obstacles();
        assert_eq!(removed, 1);
        assert_eq!(state.players[0].obstacles.len(), 3);
        assert!(!state.players[0].has_lost());
    }

    #[test]
    fn test_starting_snapshot() {
        let state = MatchState::new(ARENA_WIDTH, ARENA_HEIGHT, Tuning::default());
        let snapshot = state.snapshot();

        assert!(!snapshot.projectile.active);
        assert_eq!(snapshot.current_player, 0);
        assert!(!snapshot.game_over);
        assert_eq!(snapshot.winner, None);
        assert_eq!(snapshot.turn_time_left, 12.0);
        for player in &snapshot.players {
            assert_eq!(player.obstacles.len(), 4);
            for obstacle in &player.obstacles {
                assert_eq!(obstacle.resistance_ratio, 1.0);
            }
        }
        assert_eq!(snapshot.players[0].avatar_pos, Vec2::new(70.0, 330.0));
        assert_eq!(snapshot.players[1].avatar_pos, Vec2::new(1130.0, 330.0));
    }

    proptest! {
        #[test]
        fn prop_damage_clamped_and_monotonic(
            amounts in proptest::collection::vec(0.0f32..200.0, 0..20)
        ) {
            let mut obstacle = Obstacle::new(Vec2::ZERO, 70.0, 100.0, 120.0);
            let mut prev = obstacle.resistance();
            for amount in amounts {
                obstacle.take_damage(amount);
                let resistance = obstacle.resistance();
                prop_assert!(resistance >= 0.0);
                prop_assert!(resistance <= obstacle.max_resistance());
                prop_assert!(resistance <= prev);
                prev = resistance;
            }
        }
    }
}
