//! Player commands
//!
//! Semantic actions an input layer maps device events onto. Keeps the
//! confirm/restart rules in one place so every front end behaves the same.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameState, PaddleDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    StopPaddle,
    /// Stop the paddle and pause
    Pause,
    /// Resume a paused game, or restart a finished one
    Confirm,
    /// Restart, unless a game is actively running
    Restart,
}

impl<R: Rng> GameState<R> {
    /// Apply a player command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft => self.set_paddle_velocity(PaddleDirection::Left),
            Command::MoveRight => self.set_paddle_velocity(PaddleDirection::Right),
            Command::StopPaddle => self.stop_paddle(),
            Command::Pause => {
                self.stop_paddle();
                self.pause();
            }
            Command::Confirm => {
                if self.resume().is_err() {
                    self.restart();
                }
            }
            Command::Restart => {
                if self.paused || self.status.is_over() {
                    self.restart();
                }
            }
        }
    }
}
