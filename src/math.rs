//! 2D vector helpers
//!
//! The simulation uses `glam::Vec2` as its vector value type. Arithmetic,
//! `length`, `dot`, `distance`, `lerp`, `perp`, `normalize_or_zero` and
//! `clamp_length_max` come straight from glam; [`Vec2Ext`] fills in the few
//! operations the game needs in a slightly different shape.

use glam::Vec2;

/// The vector value type used across the simulation
pub type Vector2 = Vec2;

/// Default tolerance for [`Vec2Ext::approx_eq`]
pub const DEFAULT_TOLERANCE: f32 = 1e-4;

/// Extra vector operations used by the simulation
pub trait Vec2Ext {
    /// Signed angle of the vector, `atan2(y, x)`
    fn bearing(self) -> f32;

    /// Unit vector, or zero for a zero-length (or non-finite length) input
    fn unit(self) -> Self;

    /// Rotate counter-clockwise by `radians`
    fn rotated(self, radians: f32) -> Self;

    /// Clamp the length to `max`, leaving shorter vectors untouched
    fn limited(self, max: f32) -> Self;

    /// Per-axis equality within `tolerance` (strict)
    fn approx_eq(self, other: Self, tolerance: f32) -> bool;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn bearing(self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    fn unit(self) -> Self {
        self.normalize_or_zero()
    }

    #[inline]
    fn rotated(self, radians: f32) -> Self {
        Vec2::from_angle(radians).rotate(self)
    }

    #[inline]
    fn limited(self, max: f32) -> Self {
        if max <= 0.0 {
            return Vec2::ZERO;
        }
        self.clamp_length_max(max)
    }

    #[inline]
    fn approx_eq(self, other: Self, tolerance: f32) -> bool {
        (self.x - other.x).abs() < tolerance && (self.y - other.y).abs() < tolerance
    }
}
