//! Brick Breaker - A single-player ball-and-paddle arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, collisions, game state, tick)
//! - `results`: Last and best results of the session
//! - `config`: Data-driven playfield and gameplay parameters
//! - `error`: Configuration and command errors

pub mod config;
pub mod error;
pub mod results;
pub mod sim;

pub use config::{GameConfig, GridLayout};
pub use error::{ConfigError, GameError};
pub use results::ResultsHistory;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Nominal tick interval in seconds (one "step" of ball and paddle motion)
    pub const TICK_INTERVAL: f32 = 0.040;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1000.0;
    pub const PLAYFIELD_HEIGHT: f32 = 1000.0;
    pub const BORDER_THICKNESS: f32 = 25.0;

    /// Ball defaults
    pub const BALL_START: Vec2 = Vec2::new(500.0, 500.0);
    pub const BALL_DIAMETER: f32 = 50.0;
    /// Pixels travelled per nominal tick
    pub const BALL_START_SPEED: f32 = 10.0;
    /// Launch direction range (degrees, inclusive)
    pub const BALL_MIN_DIRECTION: u32 = 45;
    pub const BALL_MAX_DIRECTION: u32 = 135;

    /// Paddle defaults
    pub const PADDLE_START: Vec2 = Vec2::new(500.0, 800.0);
    pub const PADDLE_WIDTH: f32 = 200.0;
    pub const PADDLE_HEIGHT: f32 = 50.0;
    /// Pixels travelled per nominal tick while a move is held
    pub const PADDLE_STEP: f32 = 25.0;

    /// Brick grid defaults
    pub const BRICK_ROWS: usize = 3;
    pub const BRICK_COLUMNS: usize = 5;
    pub const BRICK_WIDTH: f32 = 178.0;
    pub const BRICK_HEIGHT: f32 = 75.0;
    pub const BRICK_GAP: f32 = 10.0;
    /// Lives handed out to a grid, shuffled before assignment
    pub const LIVES_TEMPLATE: [u8; 15] = [1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3];

    /// Scoring
    pub const HIT_POINTS: u64 = 50;
    pub const DESTROY_BONUS: u64 = 25;

    /// Speed gained when a brick drops to its last life
    pub const DAMAGED_SPEEDUP: f32 = 0.5;
    /// Speed gained when a brick is destroyed
    pub const DESTROYED_SPEEDUP: f32 = 1.0;

    /// Reflections closer than this to horizontal get nudged away (degrees)
    pub const ANTI_STALL_MARGIN: f32 = 10.0;
    /// Landing-side bias is the distance to vertical divided by this
    pub const LANDING_BIAS_DIVISOR: f32 = 4.0;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit heading vector for a direction in degrees (0° = east, 90° = south)
#[inline]
pub fn heading(degrees: f32) -> glam::Vec2 {
    let radians = degrees.to_radians();
    glam::Vec2::new(radians.cos(), radians.sin())
}
