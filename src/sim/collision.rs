//! Collision detection and response for axis-aligned geometry
//!
//! Each edge test pairs an overlap check on one axis with a center-alignment
//! check on the other. Edges are tested Bottom, Left, Right, Top and the first
//! match wins; that order decides corner hits and must stay fixed.

use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Edges, Rect};
use super::state::Ball;
use crate::consts::{ANTI_STALL_MARGIN, LANDING_BIAS_DIVISOR};
use crate::normalize_degrees;

/// Edge of a rectangle (or of the playfield) touched by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Bottom,
    Left,
    Right,
    Top,
}

impl Side {
    /// Test order for every target; first match wins
    pub const PRIORITY: [Side; 4] = [Side::Bottom, Side::Left, Side::Right, Side::Top];

    /// Bottom and top hits flip the vertical component of the heading
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Bottom | Side::Top)
    }
}

/// Zone of the paddle struck by the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandingSide {
    Left,
    Center,
    Right,
}

/// Check a single edge of `rect` against the ball
pub fn ball_hits_side(ball: &Circle, rect: &Rect, side: Side) -> bool {
    let center = ball.center();
    match side {
        Side::Top => {
            ball.bottom() >= rect.top() && ball.top() < rect.top() && rect.spans_x(center.x)
        }
        Side::Bottom => {
            ball.top() <= rect.bottom() && ball.bottom() > rect.bottom() && rect.spans_x(center.x)
        }
        Side::Left => {
            ball.right() >= rect.left() && ball.left() < rect.left() && rect.spans_y(center.y)
        }
        Side::Right => {
            ball.left() <= rect.right() && ball.right() > rect.right() && rect.spans_y(center.y)
        }
    }
}

/// First edge of `rect` the ball collides with, in priority order
pub fn ball_rect_collision(ball: &Circle, rect: &Rect) -> Option<Side> {
    Side::PRIORITY
        .into_iter()
        .find(|&side| ball_hits_side(ball, rect, side))
}

/// First border the ball has crossed, in priority order
///
/// `bounds` is the playing area inside the borders. A `Side::Bottom` result
/// means the ball left the playfield.
pub fn ball_border_collision(ball: &Circle, bounds: &Rect) -> Option<Side> {
    Side::PRIORITY.into_iter().find(|&side| match side {
        Side::Bottom => ball.bottom() > bounds.bottom(),
        Side::Left => ball.left() < bounds.left(),
        Side::Right => ball.right() > bounds.right(),
        Side::Top => ball.top() < bounds.top(),
    })
}

/// Heading has a downward component (0° < d < 180°)
#[inline]
pub fn heading_down(direction: f32) -> bool {
    0.0 < direction && direction < 180.0
}

/// Heading has an upward component (180° < d < 360°)
#[inline]
pub fn heading_up(direction: f32) -> bool {
    180.0 < direction && direction < 360.0
}

/// Bounce off a vertical surface (mirror across the y axis)
#[inline]
pub fn vertical_reflection(direction: f32) -> f32 {
    normalize_degrees(180.0 - direction)
}

/// Bounce off a horizontal surface, biased by where the ball landed
///
/// Landing on the left or right quarter of the paddle bends the bounce
/// toward that side, emulating a curved paddle. Biased results that end up
/// nearly horizontal are nudged away from the horizon.
pub fn horizontal_reflection(direction: f32, landing: Option<LandingSide>) -> f32 {
    let reflected = normalize_degrees(360.0 - direction);
    let side = match landing {
        None | Some(LandingSide::Center) => return reflected,
        Some(side) => side,
    };

    let down = heading_down(reflected);
    let up = heading_up(reflected);
    let off_vertical = if down {
        (90.0 - reflected).abs()
    } else {
        (270.0 - reflected).abs()
    };
    let change_by = off_vertical / LANDING_BIAS_DIVISOR;

    let biased = match side {
        LandingSide::Right if up => reflected + change_by,
        LandingSide::Left if down => reflected + change_by,
        LandingSide::Right if down => reflected - change_by,
        LandingSide::Left if up => reflected - change_by,
        _ => reflected,
    };

    nudge_off_horizontal(normalize_degrees(biased))
}

fn nudge_off_horizontal(direction: f32) -> f32 {
    let off_axis = direction % 180.0;
    if off_axis.min(180.0 - off_axis) >= ANTI_STALL_MARGIN {
        return direction;
    }
    let nudged = if (0.0 < direction && direction < 90.0) || (180.0 < direction && direction < 270.0)
    {
        direction + ANTI_STALL_MARGIN
    } else {
        direction - ANTI_STALL_MARGIN
    };
    normalize_degrees(nudged)
}

/// Move the ball flush against `side` of `rect` and reflect its heading
pub fn resolve_rect_collision(
    ball: &mut Ball,
    rect: &Rect,
    side: Side,
    landing: Option<LandingSide>,
) {
    let diameter = ball.body.diameter;
    match side {
        Side::Bottom => ball.body.pos.y = rect.bottom(),
        Side::Top => ball.body.pos.y = rect.top() - diameter,
        Side::Left => ball.body.pos.x = rect.left() - diameter,
        Side::Right => ball.body.pos.x = rect.right(),
    }
    ball.direction = if side.is_horizontal() {
        horizontal_reflection(ball.direction, landing)
    } else {
        vertical_reflection(ball.direction)
    };
}

/// Bounce the ball back inside `bounds`
///
/// The bottom border is not a wall: a ball crossing it is left where it is
/// and the caller ends the game.
pub fn resolve_border_collision(ball: &mut Ball, bounds: &Rect, side: Side) {
    let diameter = ball.body.diameter;
    match side {
        Side::Bottom => {}
        Side::Left => {
            ball.body.pos.x = bounds.left();
            ball.direction = vertical_reflection(ball.direction);
        }
        Side::Right => {
            ball.body.pos.x = bounds.right() - diameter;
            ball.direction = vertical_reflection(ball.direction);
        }
        Side::Top => {
            ball.body.pos.y = bounds.top();
            ball.direction = horizontal_reflection(ball.direction, None);
        }
    }
}
