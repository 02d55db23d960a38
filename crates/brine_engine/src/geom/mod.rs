//! Geometry primitives for the 2D simulation
//!
//! A game object's spatial state is a [`Transform`] (position plus
//! [`Dimensions`]); the region used for overlap tests is its [`Hitbox`],
//! derived from the transform every fixed tick.

mod directions;
mod hitbox;

pub use directions::{relation, Axis, Direction, DirectionSet};
pub use hitbox::Hitbox;

use crate::foundation::math::Vec2;

/// Width and height of a rectangular region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimensions {
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Dimensions {
    /// Create new dimensions
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle, used by drawing commands and overlap queries
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether this rectangle overlaps `other`
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

/// Position and dimensions of a game object
///
/// Mutable, and owned exclusively by its game object; other objects only ever
/// see it through collision queries.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vec2,
    dimensions: Dimensions,
}

impl Transform {
    /// Create a transform from position and extent
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            dimensions: Dimensions::new(width, height),
        }
    }

    /// Create a transform from existing parts
    pub fn from_parts(position: Vec2, dimensions: Dimensions) -> Self {
        Self {
            position,
            dimensions,
        }
    }

    /// Current position (top-left corner)
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Set the position (top-left corner)
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Horizontal position
    pub fn x(&self) -> f32 {
        self.position.x
    }

    /// Set the horizontal position
    pub fn set_x(&mut self, x: f32) {
        self.position.x = x;
    }

    /// Vertical position
    pub fn y(&self) -> f32 {
        self.position.y
    }

    /// Set the vertical position
    pub fn set_y(&mut self, y: f32) {
        self.position.y = y;
    }

    /// Current dimensions
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Horizontal extent
    pub fn width(&self) -> f32 {
        self.dimensions.width
    }

    /// Set the horizontal extent
    pub fn set_width(&mut self, width: f32) {
        self.dimensions.width = width;
    }

    /// Vertical extent
    pub fn height(&self) -> f32 {
        self.dimensions.height
    }

    /// Set the vertical extent
    pub fn set_height(&mut self, height: f32) {
        self.dimensions.height = height;
    }

    /// Center point of the region
    pub fn middle(&self) -> Vec2 {
        Vec2::new(
            self.position.x + self.dimensions.width / 2.0,
            self.position.y + self.dimensions.height / 2.0,
        )
    }

    /// The covered region as a rectangle
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.dimensions.width,
            self.dimensions.height,
        )
    }
}
