//! Axis-aligned bounding boxes
//!
//! Every collision in the game is a box overlap test. Screen space: y grows
//! downward, so `min` is the top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle anchored at its top-left corner
    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Rectangle from explicit edges
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            min: Vec2::new(left, top),
            max: Vec2::new(right, bottom),
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}
