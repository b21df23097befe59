//! Error types: configuration validation and runtime command errors

use thiserror::Error;

use crate::sim::GameStatus;

/// Configuration errors, raised when building a game or a brick grid
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Brick grid must have at least one row and one column (got {rows}x{columns})")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("`{field}` must be a positive finite number (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("Brick grid needs {required}px along {axis} but the playfield offers {available}px")]
    GridOverflow {
        axis: &'static str,
        required: f32,
        available: f32,
    },
    #[error("Paddle does not fit between the borders")]
    PaddleOverflow,
    #[error("{object} starting at ({x}, {y}) lies outside the borders")]
    StartOutOfBounds { object: &'static str, x: f32, y: f32 },
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors reported for input entering the simulation
#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Ball speed must be positive and finite (got {0})")]
    InvalidSpeed(f32),
    #[error("Paddle direction must be -1 or 1 (got {0})")]
    InvalidPaddleDirection(i32),
    #[error("Tick delta time must be positive and finite (got {0})")]
    InvalidDeltaTime(f32),
    #[error("Game already ended ({0:?}); restart to play again")]
    GameOver(GameStatus),
}
