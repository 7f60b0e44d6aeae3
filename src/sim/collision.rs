//! Axis-aligned collision and boundary helpers
//!
//! Every shape in the scene is treated as a box for collision purposes:
//! the ball uses its bounding square, the star image and the collectible
//! polygons their bounding rectangles.

use glam::Vec2;

/// Axis-aligned bounding box (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of `size` centered on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Bounding square of a circle
    pub fn from_circle(center: Vec2, radius: f32) -> Self {
        Self::from_center(center, Vec2::splat(radius * 2.0))
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Overlap test; boxes that share an edge count as intersecting
    pub fn intersects(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.max.y < other.min.y
            || self.min.x > other.max.x
            || self.min.y > other.max.y)
    }

    /// True if this box lies within `[0, extent.x] x [0, extent.y]`
    pub fn within(&self, extent: Vec2) -> bool {
        self.min.x >= 0.0 && self.min.y >= 0.0 && self.max.x <= extent.x && self.max.y <= extent.y
    }
}

/// Reflective bounce on one axis.
///
/// Returns the velocity component inverted when `pos` is closer than
/// `margin` to either edge of `[0, extent]`. Position is left untouched.
#[inline]
pub fn bounce_axis(pos: f32, vel: f32, margin: f32, extent: f32) -> f32 {
    if pos < margin || pos > extent - margin {
        -vel
    } else {
        vel
    }
}

/// Clamp a center coordinate so `[center - half, center + half]` stays in `[0, extent]`.
///
/// The low edge wins when the object is larger than the extent.
#[inline]
pub fn clamp_axis(center: f32, half: f32, extent: f32) -> f32 {
    if center < half {
        half
    } else if center > extent - half {
        extent - half
    } else {
        center
    }
}

/// Clamp a box center so the whole box stays inside `[0, viewport]` on both axes
#[inline]
pub fn clamp_center(center: Vec2, half_extent: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        clamp_axis(center.x, half_extent.x, viewport.x),
        clamp_axis(center.y, half_extent.y, viewport.y),
    )
}

/// Clamp each velocity component to `[-cap, cap]`
#[inline]
pub fn cap_velocity(vel: Vec2, cap: f32) -> Vec2 {
    if cap.is_nan() {
        return vel;
    }
    let cap = cap.abs();
    Vec2::new(vel.x.clamp(-cap, cap), vel.y.clamp(-cap, cap))
}
