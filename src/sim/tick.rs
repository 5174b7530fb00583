//! Per-tick turn lifecycle and collision pipeline
//!
//! An external driver calls [`tick`] once per time step. Discrete
//! commands from the input collaborator ride along in [`TickInput`];
//! everything else is pure state advancement.

use super::body::Body;
use super::collision::{self, Axis};
use super::state::{MatchEvent, MatchState, TurnPhase};
use crate::consts::EXIT_MARGIN;

/// A shot request from the input collaborator.
///
/// Angle in degrees (0 fires right, 90 straight up), speed in units/s.
/// The UI clamps both to their slider ranges before they get here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaunchCommand {
    pub angle_degrees: f32,
    pub speed: f32,
}

/// Commands for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Fire the current player's shot (ignored unless the match is idle)
    pub launch: Option<LaunchCommand>,
    /// Reinitialize the whole match
    pub reset: bool,
}

/// Advance the match by one time step.
pub fn tick(state: &mut MatchState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.reset {
        state.reset();
    }
    if let Some(command) = input.launch {
        state.launch_projectile(command.angle_degrees, command.speed);
    }

    match state.phase {
        TurnPhase::Idle | TurnPhase::GameOver => return,
        TurnPhase::InFlight => {}
    }

    state.turn_timer += dt;
    state.projectile.integrate(dt);

    // Pipeline order is fixed: walls, then the opponent's obstacles, then
    // the opponent's avatar. The first win condition to fire freezes the
    // match; nothing else runs that step.
    resolve_boundary_collisions(state);
    resolve_obstacle_collisions(state);
    if state.phase == TurnPhase::GameOver {
        return;
    }
    check_avatar_hit(state);
    if state.phase == TurnPhase::GameOver {
        return;
    }

    let pos = state.projectile.pos;
    let timed_out = state.turn_timer >= state.tuning.max_turn_time;
    let exited = pos.y > state.bounds.max.y + EXIT_MARGIN
        || pos.x < state.bounds.min.x - EXIT_MARGIN
        || pos.x > state.bounds.max.x + EXIT_MARGIN;
    if timed_out || exited {
        end_turn(state);
    }
}

/// Clamp the projectile just inside any crossed arena edge and flip the
/// matching velocity axis. The four edges are checked independently; a
/// corner can trigger two of them in one step.
fn resolve_boundary_collisions(state: &mut MatchState) {
    let bounds = state.bounds;
    let projectile = &mut state.projectile;
    let radius = projectile.radius;
    let mut bounced = false;

    if projectile.pos.x - radius < bounds.min.x {
        projectile.pos.x = bounds.min.x + radius;
        projectile.reflect_axis(Axis::X);
        bounced = true;
    }
    if projectile.pos.x + radius > bounds.max.x {
        projectile.pos.x = bounds.max.x - radius;
        projectile.reflect_axis(Axis::X);
        bounced = true;
    }
    if projectile.pos.y - radius < bounds.min.y {
        projectile.pos.y = bounds.min.y + radius;
        projectile.reflect_axis(Axis::Y);
        bounced = true;
    }
    if projectile.pos.y + radius > bounds.max.y {
        projectile.pos.y = bounds.max.y - radius;
        projectile.reflect_axis(Axis::Y);
        bounced = true;
    }

    if bounced {
        state.events.push(MatchEvent::WallBounce);
    }
}

/// Run the projectile against the opponent's obstacle line: momentum
/// damage, inelastic bounce, and a flush reposition against the struck
/// face so the next step doesn't start inside the block.
fn resolve_obstacle_collisions(state: &mut MatchState) {
    let attacker = state.current_player;
    let defender = 1 - attacker;
    let damage_factor = state.tuning.damage_factor;
    let restitution = state.tuning.restitution;

    let defeated = {
        let MatchState {
            players,
            projectile,
            events,
            ..
        } = &mut *state;

        for obstacle in players[defender].obstacles.iter_mut() {
            if !projectile.bounds().intersects(&obstacle.bounds()) {
                continue;
            }

            let damage = damage_factor * projectile.momentum();
            obstacle.take_damage(damage);

            let normal = obstacle.collision_normal(projectile.pos);
            projectile.apply_inelastic(normal, restitution);

            let rect = obstacle.bounds();
            if normal.x != 0.0 {
                projectile.pos.x = if normal.x > 0.0 {
                    rect.max.x + projectile.radius
                } else {
                    rect.min.x - projectile.radius
                };
            } else {
                projectile.pos.y = if normal.y > 0.0 {
                    rect.max.y + projectile.radius
                } else {
                    rect.min.y - projectile.radius
                };
            }

            events.push(MatchEvent::ObstacleDamaged {
                player: defender,
                damage,
            });
            log::debug!(
                "obstacle hit: {:.1} damage, {:.1} resistance left",
                damage,
                obstacle.resistance()
            );
        }

        let removed = players[defender].remove_destroyed_obstacles();
        for _ in 0..removed {
            events.push(MatchEvent::ObstacleDestroyed { player: defender });
        }
        players[defender].has_lost()
    };

    if defeated {
        declare_winner(state, attacker);
    }
}

/// Circle-circle hit test against the opponent's avatar; a hit ends the
/// match even if obstacles remain.
fn check_avatar_hit(state: &mut MatchState) {
    let attacker = state.current_player;
    let avatar_pos = state.players[1 - attacker].avatar_pos;
    let avatar_radius = state.players[1 - attacker].avatar_radius;

    if collision::circles_overlap(
        state.projectile.pos,
        state.projectile.radius,
        avatar_pos,
        avatar_radius,
    ) {
        declare_winner(state, attacker);
    }
}

fn declare_winner(state: &mut MatchState, winner: usize) {
    state.projectile.deactivate();
    state.phase = TurnPhase::GameOver;
    state.winner = Some(winner);
    state.events.push(MatchEvent::MatchWon { winner });
    log::info!("player {winner} wins the match");
}

fn end_turn(state: &mut MatchState) {
    state.projectile.deactivate();
    state.current_player = 1 - state.current_player;
    state.turn_timer = 0.0;
    state.phase = TurnPhase::Idle;
    state.events.push(MatchEvent::TurnEnded {
        next_player: state.current_player,
    });
    log::info!("turn over, player {} to fire", state.current_player);
}
