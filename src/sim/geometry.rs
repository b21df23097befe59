//! Axis-aligned geometry for the ball, paddle, bricks and borders
//!
//! Screen space: x grows to the right, y grows downward. Every shape is
//! anchored at the top-left corner of its bounding box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Edge accessors shared by every shape
pub trait Edges {
    fn left(&self) -> f32;
    fn top(&self) -> f32;
    fn right(&self) -> f32;
    fn bottom(&self) -> f32;

    /// Center of the bounding box
    fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left() + self.right()) / 2.0,
            (self.top() + self.bottom()) / 2.0,
        )
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Strictly between the left and right edges
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        self.left() < x && x < self.right()
    }

    /// Strictly between the top and bottom edges
    #[inline]
    pub fn spans_y(&self, y: f32) -> bool {
        self.top() < y && y < self.bottom()
    }
}

impl Edges for Rect {
    #[inline]
    fn left(&self) -> f32 {
        self.pos.x
    }
    #[inline]
    fn top(&self) -> f32 {
        self.pos.y
    }
    #[inline]
    fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
    #[inline]
    fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// A circle described by its bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Top-left corner of the bounding box
    pub pos: Vec2,
    pub diameter: f32,
}

impl Circle {
    pub const fn new(pos: Vec2, diameter: f32) -> Self {
        Self { pos, diameter }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.diameter / 2.0
    }
}

impl Edges for Circle {
    #[inline]
    fn left(&self) -> f32 {
        self.pos.x
    }
    #[inline]
    fn top(&self) -> f32 {
        self.pos.y
    }
    #[inline]
    fn right(&self) -> f32 {
        self.pos.x + self.diameter
    }
    #[inline]
    fn bottom(&self) -> f32 {
        self.pos.y + self.diameter
    }

    fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius())
    }
}
