//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Externally driven ticks only
//! - Injected RNG only
//! - Stable iteration order (row-major bricks)
//! - No rendering, timer or input-device dependencies

pub mod collision;
pub mod command;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{LandingSide, Side, horizontal_reflection, vertical_reflection};
pub use command::Command;
pub use geometry::{Circle, Edges, Rect};
pub use state::{
    Ball, Brick, BrickGrid, GameEvent, GameState, GameStatus, Paddle, PaddleDirection, Snapshot,
    brick_color,
};
pub use tick::{generate_bricks, tick};
