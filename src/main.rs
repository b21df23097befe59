//! Brick Breaker headless entry point
//!
//! Drives the simulation at the nominal tick cadence with an autopilot
//! paddle and logs each game's outcome.
//!
//! Usage: `brick-breaker [seed] [games] [config.json]`

use std::process::ExitCode;

use brick_breaker::GameConfig;
use brick_breaker::sim::{Command, Edges, GameEvent, GameState, tick};

/// Give up on a game that neither ends nor progresses
const MAX_TICKS_PER_GAME: u32 = 50_000;

/// Autopilot: keep the paddle center under the ball
fn autopilot(state: &GameState) -> Command {
    let ball_x = state.ball().center().x;
    let paddle_x = state.paddle().rect.center().x;
    let dead_zone = state.paddle().rect.width() / 8.0;

    if ball_x < paddle_x - dead_zone {
        Command::MoveLeft
    } else if ball_x > paddle_x + dead_zone {
        Command::MoveRight
    } else {
        Command::StopPaddle
    }
}

fn load_config(path: Option<&str>) -> Result<GameConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            Ok(GameConfig::from_json(&json)?)
        }
        None => Ok(GameConfig::default()),
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = match args.first() {
        Some(seed) => seed.parse()?,
        None => 0x5EED,
    };
    let games: u32 = match args.get(1) {
        Some(games) => games.parse()?,
        None => 5,
    };
    let config = load_config(args.get(2).map(String::as_str))?;
    let dt = config.tick_interval;

    let mut state = GameState::new(config, seed)?;
    log::info!("Game initialized with seed: {}", seed);

    for game in 1..=games {
        state.apply(Command::Confirm);

        let mut ticks = 0;
        while !state.is_paused() && ticks < MAX_TICKS_PER_GAME {
            state.apply(autopilot(&state));
            for event in tick(&mut state, dt)? {
                match event {
                    GameEvent::BrickDestroyed { row, column } => {
                        log::debug!("Game {}: brick ({}, {}) destroyed", game, row, column)
                    }
                    GameEvent::Won | GameEvent::Lost => {
                        log::info!(
                            "Game {}: {:?} after {} ticks, score {}",
                            game,
                            state.status(),
                            ticks + 1,
                            state.score()
                        )
                    }
                    _ => {}
                }
            }
            ticks += 1;
        }

        if !state.status().is_over() {
            log::warn!("Game {} stalled after {} ticks", game, ticks);
        }
        state.apply(Command::Pause);
        state.apply(Command::Restart);
    }

    log::info!("Last results: {:?}", state.last_results());
    log::info!("Best results: {:?}", state.best_results());
    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
