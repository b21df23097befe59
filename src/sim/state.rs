//! Game state and core simulation types
//!
//! The session owns everything here; presentation layers only see shared
//! references or an owned [`Snapshot`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{LandingSide, Side};
use super::geometry::{Circle, Edges, Rect};
use super::tick::layout_bricks;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::GameError;
use crate::heading;
use crate::normalize_degrees;
use crate::results::ResultsHistory;

/// Outcome of the current game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameStatus {
    /// Initial and resumable
    #[default]
    Playing,
    /// Ball fell past the paddle; terminal until restart
    Lost,
    /// Every brick destroyed; terminal until restart
    Won,
}

impl GameStatus {
    /// Numeric status code (0 playing, -1 lost, 1 won)
    pub fn code(self) -> i8 {
        match self {
            GameStatus::Playing => 0,
            GameStatus::Lost => -1,
            GameStatus::Won => 1,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameStatus::Playing
    }
}

/// The ball: a circle travelling along a heading in degrees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: Circle,
    /// Heading in degrees, [0, 360), 0° = east, 90° = south
    pub direction: f32,
    /// Pixels per nominal tick
    pub speed: f32,
}

impl Ball {
    pub fn new(pos: Vec2, diameter: f32, direction: f32, speed: f32) -> Result<Self, GameError> {
        check_speed(speed)?;
        Ok(Self {
            body: Circle::new(pos, diameter),
            direction: normalize_degrees(direction),
            speed,
        })
    }

    pub fn set_direction(&mut self, direction: f32) {
        self.direction = normalize_degrees(direction);
    }

    pub fn set_speed(&mut self, speed: f32) -> Result<(), GameError> {
        check_speed(speed)?;
        self.speed = speed;
        Ok(())
    }

    /// Increase speed by a positive amount
    pub(crate) fn accelerate(&mut self, by: f32) {
        self.speed += by;
    }

    /// Integrate one tick of motion; `scale` is the fraction of a nominal tick
    pub fn advance(&mut self, scale: f32) {
        self.body.pos += heading(self.direction) * self.speed * scale;
    }
}

impl Edges for Ball {
    fn left(&self) -> f32 {
        self.body.left()
    }
    fn top(&self) -> f32 {
        self.body.top()
    }
    fn right(&self) -> f32 {
        self.body.right()
    }
    fn bottom(&self) -> f32 {
        self.body.bottom()
    }
    fn center(&self) -> Vec2 {
        self.body.center()
    }
}

fn check_speed(speed: f32) -> Result<(), GameError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(GameError::InvalidSpeed(speed))
    }
}

/// Horizontal paddle movement request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleDirection {
    Left,
    Right,
}

impl PaddleDirection {
    pub fn sign(self) -> f32 {
        match self {
            PaddleDirection::Left => -1.0,
            PaddleDirection::Right => 1.0,
        }
    }
}

impl TryFrom<i32> for PaddleDirection {
    type Error = GameError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(PaddleDirection::Left),
            1 => Ok(PaddleDirection::Right),
            other => Err(GameError::InvalidPaddleDirection(other)),
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Signed pixels per nominal tick (0 when idle)
    pub velocity: f32,
    /// Speed used while a move is held
    pub step: f32,
}

impl Paddle {
    pub fn new(pos: Vec2, size: Vec2, step: f32) -> Self {
        Self {
            rect: Rect::new(pos, size),
            velocity: 0.0,
            step,
        }
    }

    pub fn set_velocity(&mut self, direction: PaddleDirection) {
        self.velocity = direction.sign() * self.step;
    }

    pub fn stop(&mut self) {
        self.velocity = 0.0;
    }

    pub fn is_moving(&self) -> bool {
        self.velocity != 0.0
    }

    /// Move by the current velocity, stopping at the borders
    pub fn advance(&mut self, scale: f32, bounds: &Rect) {
        if !self.is_moving() {
            return;
        }
        self.rect.pos.x += self.velocity * scale;
        if self.clamp(bounds) {
            self.stop();
        }
    }

    /// Keep the paddle between the borders; returns true if it was moved
    pub fn clamp(&mut self, bounds: &Rect) -> bool {
        if self.rect.left() < bounds.left() {
            self.rect.pos.x = bounds.left();
            true
        } else if self.rect.right() > bounds.right() {
            self.rect.pos.x = bounds.right() - self.rect.width();
            true
        } else {
            false
        }
    }

    /// Which quarter of the paddle sits under `x`
    ///
    /// `None` when `x` is outside the paddle, so grazing hits get no bias.
    pub fn landing_side(&self, x: f32) -> Option<LandingSide> {
        if !self.rect.spans_x(x) {
            return None;
        }
        let quarter = self.rect.width() / 4.0;
        Some(if x < self.rect.left() + quarter {
            LandingSide::Left
        } else if x > self.rect.right() - quarter {
            LandingSide::Right
        } else {
            LandingSide::Center
        })
    }
}

/// Display color for a brick with the given lives (fewer lives, lighter)
pub fn brick_color(lives: u8) -> u32 {
    match lives {
        1 => 0xCCDDFF,
        2 => 0x99BBFF,
        _ => 0x6699FF,
    }
}

/// Left edge of the brick in `column`
pub fn brick_left(column: usize, gap: f32, brick_width: f32, border_thickness: f32) -> f32 {
    border_thickness + (column + 1) as f32 * gap + column as f32 * brick_width
}

/// Top edge of the brick in `row`
pub fn brick_top(row: usize, gap: f32, brick_height: f32, border_thickness: f32) -> f32 {
    border_thickness + (row + 1) as f32 * gap + row as f32 * brick_height
}

/// A brick entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub lives: u8,
}

impl Brick {
    pub fn new(rect: Rect, lives: u8) -> Self {
        Self { rect, lives }
    }

    pub fn exists(&self) -> bool {
        self.lives > 0
    }

    /// Take one hit; returns the lives left
    pub fn hit(&mut self) -> u8 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn color(&self) -> u32 {
        brick_color(self.lives)
    }
}

/// Fixed rows x columns of bricks, stored row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    pub(crate) rows: usize,
    pub(crate) columns: usize,
    pub(crate) bricks: Vec<Brick>,
}

impl BrickGrid {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Option<&Brick> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.bricks.get(row * self.columns + column)
    }

    /// (row, column) of the brick stored at `index`
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Every brick, destroyed ones included, in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn live_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.exists()).count()
    }

    pub fn total_lives(&self) -> u32 {
        self.bricks.iter().map(|b| u32::from(b.lives)).sum()
    }
}

/// Something that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit {
        side: Side,
        landing: Option<LandingSide>,
    },
    BorderBounce {
        side: Side,
    },
    BrickDamaged {
        row: usize,
        column: usize,
        lives: u8,
    },
    BrickDestroyed {
        row: usize,
        column: usize,
    },
    Lost,
    Won,
}

/// Owned copy of everything a presentation layer reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub ball: Ball,
    pub paddle: Paddle,
    pub bricks: BrickGrid,
    pub score: u64,
    pub status: GameStatus,
    pub paused: bool,
    pub live_bricks: usize,
    pub last_results: Vec<u64>,
    pub best_results: Vec<u64>,
    pub time_ticks: u64,
}

/// Complete game state for one session
///
/// Randomness (launch direction, lives shuffle) comes only from `rng`, so two
/// sessions built from the same seed play out identically.
#[derive(Debug, Clone)]
pub struct GameState<R = Pcg32> {
    pub(crate) config: GameConfig,
    pub(crate) rng: R,
    pub(crate) ball: Ball,
    pub(crate) paddle: Paddle,
    pub(crate) bricks: BrickGrid,
    pub(crate) status: GameStatus,
    pub(crate) paused: bool,
    pub(crate) score: u64,
    pub(crate) results: ResultsHistory,
    /// Simulated ticks since the session started
    pub(crate) time_ticks: u64,
}

impl GameState<Pcg32> {
    /// Create a new session with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> GameState<R> {
    /// Create a new session drawing randomness from `rng`
    pub fn with_rng(config: GameConfig, mut rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let bricks = layout_bricks(&config, &mut rng);
        let ball = launch_ball(&config, &mut rng);
        let paddle = default_paddle(&config);

        log::info!(
            "New game: {}x{} bricks, ball heading {}°",
            bricks.rows,
            bricks.columns,
            ball.direction
        );

        Ok(Self {
            config,
            rng,
            ball,
            paddle,
            bricks,
            status: GameStatus::Playing,
            paused: true,
            score: 0,
            results: ResultsHistory::new(),
            time_ticks: 0,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn paddle(&self) -> &Paddle {
        &self.paddle
    }

    pub fn bricks(&self) -> &BrickGrid {
        &self.bricks
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn live_bricks(&self) -> usize {
        self.bricks.live_count()
    }

    pub fn last_results(&self) -> &[u64] {
        self.results.last()
    }

    pub fn best_results(&self) -> &[u64] {
        self.results.best()
    }

    pub fn results(&self) -> &ResultsHistory {
        &self.results
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball: self.ball.clone(),
            paddle: self.paddle.clone(),
            bricks: self.bricks.clone(),
            score: self.score,
            status: self.status,
            paused: self.paused,
            live_bricks: self.live_bricks(),
            last_results: self.results.last().to_vec(),
            best_results: self.results.best().to_vec(),
            time_ticks: self.time_ticks,
        }
    }

    /// Start moving the paddle; ignored while paused
    pub fn set_paddle_velocity(&mut self, direction: PaddleDirection) {
        if self.paused {
            log::debug!("Ignoring paddle move {:?} while paused", direction);
            return;
        }
        self.paddle.set_velocity(direction);
    }

    /// Stop the paddle immediately, paused or not
    pub fn stop_paddle(&mut self) {
        self.paddle.stop();
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume a paused game; a finished game has to be restarted instead
    pub fn resume(&mut self) -> Result<(), GameError> {
        if self.status.is_over() {
            return Err(GameError::GameOver(self.status));
        }
        self.paused = false;
        Ok(())
    }

    /// Archive the score and set up a fresh, paused game
    pub fn restart(&mut self) {
        let rank = self.results.record(self.score);
        log::info!(
            "Restarting: archived score {} (best rank {:?})",
            self.score,
            rank
        );

        self.bricks = layout_bricks(&self.config, &mut self.rng);
        self.ball = launch_ball(&self.config, &mut self.rng);
        self.paddle = default_paddle(&self.config);
        self.status = GameStatus::Playing;
        self.paused = true;
        self.score = 0;
    }

    /// Enter a terminal status
    pub(crate) fn finish(&mut self, status: GameStatus) {
        self.status = status;
        self.paused = true;
        match status {
            GameStatus::Won => log::info!("Game won with score {}", self.score),
            GameStatus::Lost => log::info!("Game lost with score {}", self.score),
            GameStatus::Playing => {}
        }
    }
}

/// Ball at its start position with a random downward heading
fn launch_ball<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Ball {
    let direction = rng.random_range(BALL_MIN_DIRECTION..=BALL_MAX_DIRECTION) as f32;
    Ball {
        body: Circle::new(config.ball_start, config.ball_diameter),
        direction,
        speed: config.ball_speed,
    }
}

fn default_paddle(config: &GameConfig) -> Paddle {
    Paddle::new(
        config.paddle_start,
        Vec2::new(config.paddle_width, config.paddle_height),
        config.paddle_step,
    )
}
