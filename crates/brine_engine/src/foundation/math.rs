//! Math utilities and types
//!
//! Provides the fundamental math types used by the 2D simulation.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Linear interpolation between two values
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_lerp_endpoints() {
        assert_relative_eq!(lerp(2.0, 10.0, 0.0), 2.0);
        assert_relative_eq!(lerp(2.0, 10.0, 1.0), 10.0);
    }

    #[test]
    fn test_lerp_midpoint() {
        assert_relative_eq!(lerp(-4.0, 4.0, 0.5), 0.0);
    }
}
