//! Axis-aligned collision helpers shared by both minigames
//!
//! Overlap tests are strict: rectangles that only touch along an edge do not
//! collide, which keeps grazing contacts forgiving.

use glam::Vec2;
use serde::Serialize;

/// Axis-aligned rectangle (y grows downward, like screen space)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle from its top-left corner and size
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Shrink every side by `margin` (never past the center)
    pub fn inset(&self, margin: f32) -> Self {
        let half = (self.max - self.min) * 0.5;
        let margin = Vec2::splat(margin).min(half);
        Self {
            min: self.min + margin,
            max: self.max - margin,
        }
    }

    /// Strict overlap on both axes
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.max.x > other.min.x
            && self.min.x < other.max.x
            && self.max.y > other.min.y
            && self.min.y < other.max.y
    }

    /// Strict containment of a point
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

/// Whether a value lies outside the inclusive range [lo, hi]
#[inline]
pub fn out_of_bounds(value: f32, lo: f32, hi: f32) -> bool {
    value < lo || value > hi
}
