//! Game configuration
//!
//! Every geometry and gameplay parameter the simulation needs, with defaults
//! matching the classic 1000x1000 playfield. Loadable from JSON; missing
//! fields fall back to the defaults.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::geometry::{Edges, Rect};

/// Brick grid layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridLayout {
    pub rows: usize,
    pub columns: usize,
    pub brick_width: f32,
    pub brick_height: f32,
    /// Gap between bricks and between the outer bricks and the border
    pub gap: f32,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            rows: BRICK_ROWS,
            columns: BRICK_COLUMNS,
            brick_width: BRICK_WIDTH,
            brick_height: BRICK_HEIGHT,
            gap: BRICK_GAP,
        }
    }
}

impl GridLayout {
    /// Fail fast on an empty grid or degenerate brick sizes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }
        positive("grid.brick_width", self.brick_width)?;
        positive("grid.brick_height", self.brick_height)?;
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "grid.gap",
                value: self.gap,
            });
        }
        Ok(())
    }

    /// Horizontal extent of the grid including the outer gaps
    pub fn span_width(&self) -> f32 {
        self.columns as f32 * self.brick_width + (self.columns + 1) as f32 * self.gap
    }

    /// Vertical extent of the grid including the outer gaps
    pub fn span_height(&self) -> f32 {
        self.rows as f32 * self.brick_height + (self.rows + 1) as f32 * self.gap
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Nominal seconds per tick; `tick(dt)` scales motion by `dt / tick_interval`
    pub tick_interval: f32,

    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub border_thickness: f32,

    // === Ball ===
    /// Top-left corner of the ball's bounding box at game start
    pub ball_start: Vec2,
    pub ball_diameter: f32,
    pub ball_speed: f32,

    // === Paddle ===
    pub paddle_start: Vec2,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_step: f32,

    // === Bricks ===
    pub grid: GridLayout,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,

            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            border_thickness: BORDER_THICKNESS,

            ball_start: BALL_START,
            ball_diameter: BALL_DIAMETER,
            ball_speed: BALL_START_SPEED,

            paddle_start: PADDLE_START,
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_step: PADDLE_STEP,

            grid: GridLayout::default(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON config and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every parameter; the simulation assumes a validated config
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("tick_interval", self.tick_interval)?;
        positive("playfield_width", self.playfield_width)?;
        positive("playfield_height", self.playfield_height)?;
        if !self.border_thickness.is_finite() || self.border_thickness < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "border_thickness",
                value: self.border_thickness,
            });
        }
        positive("ball_diameter", self.ball_diameter)?;
        positive("ball_speed", self.ball_speed)?;
        positive("paddle_width", self.paddle_width)?;
        positive("paddle_height", self.paddle_height)?;
        positive("paddle_step", self.paddle_step)?;
        self.grid.validate()?;

        let inner = self.inner_bounds();
        if self.grid.span_width() > inner.width() {
            return Err(ConfigError::GridOverflow {
                axis: "x",
                required: self.grid.span_width(),
                available: inner.width(),
            });
        }
        if self.grid.span_height() > inner.height() {
            return Err(ConfigError::GridOverflow {
                axis: "y",
                required: self.grid.span_height(),
                available: inner.height(),
            });
        }
        if self.paddle_width > inner.width() {
            return Err(ConfigError::PaddleOverflow);
        }

        let paddle = Rect::new(
            self.paddle_start,
            Vec2::new(self.paddle_width, self.paddle_height),
        );
        if !fits_inside(&paddle, &inner) {
            return Err(ConfigError::StartOutOfBounds {
                object: "paddle",
                x: self.paddle_start.x,
                y: self.paddle_start.y,
            });
        }
        let ball = Rect::new(self.ball_start, Vec2::splat(self.ball_diameter));
        if !fits_inside(&ball, &inner) {
            return Err(ConfigError::StartOutOfBounds {
                object: "ball",
                x: self.ball_start.x,
                y: self.ball_start.y,
            });
        }
        Ok(())
    }

    /// Playing area inside the borders
    pub fn inner_bounds(&self) -> Rect {
        let border = Vec2::splat(self.border_thickness);
        Rect::new(
            border,
            Vec2::new(self.playfield_width, self.playfield_height) - border * 2.0,
        )
    }
}

fn fits_inside(rect: &Rect, bounds: &Rect) -> bool {
    rect.left() >= bounds.left()
        && rect.right() <= bounds.right()
        && rect.top() >= bounds.top()
        && rect.bottom() <= bounds.bottom()
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}
