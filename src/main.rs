//! Cannonade entry point
//!
//! Headless demo driver: stands in for the excluded UI collaborator by
//! feeding a scripted duel through the simulation at 60 Hz.

use cannonade::Tuning;
use cannonade::consts::{ARENA_HEIGHT, ARENA_WIDTH, SIM_DT};
use cannonade::sim::{LaunchCommand, MatchState, TickInput, TurnPhase, tick};

fn main() {
    env_logger::init();
    log::info!("Cannonade (headless) starting...");

    let mut state = MatchState::new(ARENA_WIDTH, ARENA_HEIGHT, Tuning::default());

    // Alternating scripted shots; the first pair matches the UI slider
    // defaults (45 degrees, speed 150).
    let script = [
        LaunchCommand {
            angle_degrees: 45.0,
            speed: 150.0,
        },
        LaunchCommand {
            angle_degrees: 135.0,
            speed: 150.0,
        },
        LaunchCommand {
            angle_degrees: 60.0,
            speed: 220.0,
        },
        LaunchCommand {
            angle_degrees: 120.0,
            speed: 220.0,
        },
        LaunchCommand {
            angle_degrees: 30.0,
            speed: 280.0,
        },
        LaunchCommand {
            angle_degrees: 150.0,
            speed: 280.0,
        },
    ];
    let mut next_shot = 0;

    // Five minutes of simulated time, well past any realistic duel
    let max_ticks = 60 * 60 * 5;
    for _ in 0..max_ticks {
        let mut input = TickInput::default();
        if state.phase == TurnPhase::Idle {
            input.launch = Some(script[next_shot % script.len()]);
            next_shot += 1;
        }

        tick(&mut state, &input, SIM_DT);

        for event in &state.events {
            log::debug!("event: {event:?}");
        }
        if state.phase == TurnPhase::GameOver {
            break;
        }
    }

    match state.winner {
        Some(winner) => log::info!("match over, player {winner} wins"),
        None => log::info!("no winner within the tick limit"),
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("snapshot serialization failed: {err}"),
    }
}
