//! Axis-aligned hitboxes derived from transforms

use crate::foundation::math::Vec2;

use super::{Dimensions, Rect, Transform};

/// The geometric region used for overlap testing
///
/// A hitbox follows its owner's transform at a fixed offset; the reserved
/// hitbox-recalculation component re-derives it every fixed tick so that
/// collision queries always see the position of the current tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Hitbox {
    offset: Vec2,
    dimensions: Dimensions,
    position: Vec2,
}

impl Hitbox {
    /// Create a hitbox covering the whole transform
    pub fn from_transform(transform: &Transform) -> Self {
        Self::with_offset(transform, Vec2::zeros(), transform.dimensions())
    }

    /// Create a hitbox at an offset from the transform's position
    ///
    /// Useful for hitboxes smaller than the drawn sprite.
    pub fn with_offset(transform: &Transform, offset: Vec2, dimensions: Dimensions) -> Self {
        Self {
            offset,
            dimensions,
            position: transform.position() + offset,
        }
    }

    /// Re-derive the hitbox position from the owning transform
    pub fn recalculate(&mut self, transform: &Transform) {
        self.position = transform.position() + self.offset;
    }

    /// Current position of the hitbox (top-left corner)
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Offset from the owning transform's position
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Change the offset; takes effect on the next recalculation
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
    }

    /// Extent of the hitbox
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Change the extent of the hitbox
    pub fn set_dimensions(&mut self, dimensions: Dimensions) {
        self.dimensions = dimensions;
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

    /// Whether this hitbox overlaps `other`
    pub fn collides(&self, other: &Self) -> bool {
        self.rect().overlaps(&other.rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_follows_transform_on_recalculate() {
        let mut transform = Transform::new(0.0, 0.0, 10.0, 10.0);
        let mut hitbox = Hitbox::from_transform(&transform);

        transform.set_x(25.0);
        transform.set_y(-5.0);
        hitbox.recalculate(&transform);

        assert_relative_eq!(hitbox.position().x, 25.0);
        assert_relative_eq!(hitbox.position().y, -5.0);
    }

    #[test]
    fn test_offset_hitbox() {
        let transform = Transform::new(10.0, 10.0, 16.0, 16.0);
        let hitbox = Hitbox::with_offset(&transform, Vec2::new(2.0, 4.0), Dimensions::new(12.0, 8.0));

        assert_relative_eq!(hitbox.position().x, 12.0);
        assert_relative_eq!(hitbox.position().y, 14.0);
        assert_relative_eq!(hitbox.dimensions().width, 12.0);
    }

    #[test]
    fn test_collides() {
        let a = Hitbox::from_transform(&Transform::new(0.0, 0.0, 10.0, 10.0));
        let b = Hitbox::from_transform(&Transform::new(6.0, 6.0, 10.0, 10.0));
        let c = Hitbox::from_transform(&Transform::new(30.0, 0.0, 5.0, 5.0));

        assert!(a.collides(&b));
        assert!(b.collides(&a));
        assert!(!a.collides(&c));
    }
}
