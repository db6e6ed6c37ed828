//! Collision detection and response for boxes and circles
//!
//! Every entity embeds an [`Aabb`]; the free functions here work on that
//! shared shape. Overlap tests are strict: boxes that only touch along an
//! edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box, anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Box of `size` centered on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Closest point inside the box to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min(), self.max())
    }

    /// Whether the box lies entirely inside `bounds` (edges may touch)
    pub fn is_within(&self, bounds: &Aabb) -> bool {
        let (min, max) = (self.min(), self.max());
        min.x >= bounds.pos.x
            && min.y >= bounds.pos.y
            && max.x <= bounds.max().x
            && max.y <= bounds.max().y
    }

    /// Clamp the box position so it stays inside `bounds`
    pub fn clamp_into(&mut self, bounds: &Aabb) {
        let upper = (bounds.max() - self.size).max(bounds.pos);
        self.pos = self.pos.clamp(bounds.pos, upper);
    }
}

/// Circle given by center and radius
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Box-box overlap (projections must overlap on both axes)
#[inline]
pub fn rect_rect(a: &Aabb, b: &Aabb) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Box-circle overlap via the closest point on the box
#[inline]
pub fn rect_circle(rect: &Aabb, circle: &Circle) -> bool {
    let closest = rect.closest_point(circle.center);
    closest.distance_squared(circle.center) < circle.radius * circle.radius
}

/// Circle-circle overlap
#[inline]
pub fn circle_circle(a: &Circle, b: &Circle) -> bool {
    a.center.distance(b.center) < a.radius + b.radius
}

/// Overlap extent of two boxes on each axis (zero or negative when apart)
pub fn overlap(a: &Aabb, b: &Aabb) -> Vec2 {
    a.max().min(b.max()) - a.min().max(b.min())
}

/// Push `a` out of `b` along the axis of smaller overlap
///
/// `a` moves away from `b`'s center; `b` is left alone. Returns `true` if a
/// correction was applied.
pub fn resolve_penetration(a: &mut Aabb, b: &Aabb) -> bool {
    if !rect_rect(a, b) {
        return false;
    }
    let depth = overlap(a, b);
    let (a_center, b_center) = (a.center(), b.center());
    if depth.x.abs() < depth.y.abs() {
        if a_center.x < b_center.x {
            a.pos.x -= depth.x;
        } else {
            a.pos.x += depth.x;
        }
    } else if a_center.y < b_center.y {
        a.pos.y -= depth.y;
    } else {
        a.pos.y += depth.y;
    }
    true
}
