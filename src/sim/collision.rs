//! Axis-aligned bounding boxes
//!
//! Every hazard and pickup test in the game is a box overlap. The test is
//! open: boxes that only share an edge do not intersect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Box in playfield coordinates (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    /// Square of side `2 * radius` centred on `center`
    pub fn around(center: Vec2, radius: f32) -> Self {
        Self::new(center.x - radius, center.y - radius, radius * 2.0, radius * 2.0)
    }

    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        aabb_intersects(self, other)
    }
}

/// Strict overlap on both axes
#[inline]
pub fn aabb_intersects(a: &Aabb, b: &Aabb) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}
