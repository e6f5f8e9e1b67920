//! Asteroid Belt headless runner
//!
//! Runs the simulation in demo mode at a fixed timestep and prints a JSON
//! summary of the round. Rendering and live input live outside this crate.
//!
//! Usage: `asteroid-belt [config.json] [seed]`

use asteroid_belt::GameConfig;
use asteroid_belt::consts::SIM_DT;
use asteroid_belt::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use serde::Serialize;

/// Longest demo round, in simulated seconds
const MAX_ROUND_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct RoundSummary {
    seed: u64,
    phase: GamePhase,
    won: bool,
    score: u64,
    asteroids_remaining: usize,
    ticks: u64,
    asteroids_destroyed: usize,
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(err)) => {
            log::error!("invalid seed: {err}");
            std::process::exit(1);
        }
        None => 0x5eed,
    };

    log::info!("Asteroid Belt (headless) starting, seed {seed}");

    let mut state = GameState::new(config, seed);
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let max_ticks = (MAX_ROUND_SECS as f32 / SIM_DT) as u64;
    let mut destroyed = 0;

    for _ in 0..max_ticks {
        tick(&mut state, &input, SIM_DT);

        for event in state.drain_events() {
            if matches!(event, GameEvent::AsteroidDestroyed { .. }) {
                destroyed += 1;
            }
            log::debug!("{event:?}");
        }

        if state.is_game_over() || state.is_won() {
            break;
        }
    }

    let summary = RoundSummary {
        seed,
        phase: state.phase(),
        won: state.is_won(),
        score: state.score(),
        asteroids_remaining: state.asteroid_count(),
        ticks: state.time_ticks(),
        asteroids_destroyed: destroyed,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to encode summary: {err}"),
    }
}
