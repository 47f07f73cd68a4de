//! Axis-aligned rectangles for sprite bounds
//!
//! Screen space: origin at the top-left, y grows downward.
//! A rect is stored as its top-left corner plus size.

use glam::{IVec2, Vec2};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Rect of the given size centered on `center`
    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self::new(center - size / 2.0, size)
    }

    /// Rect of the given size whose bottom edge midpoint sits at `anchor`
    #[inline]
    pub fn from_mid_bottom(anchor: Vec2, size: Vec2) -> Self {
        Self::new(Vec2::new(anchor.x - size.x / 2.0, anchor.y - size.y), size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    /// Midpoint of the top edge (where lasers leave the ship)
    #[inline]
    pub fn mid_top(&self) -> Vec2 {
        Vec2::new(self.min.x + self.size.x / 2.0, self.min.y)
    }

    /// Top-left corner snapped to whole pixels, used to align masks
    #[inline]
    pub fn pixel_origin(&self) -> IVec2 {
        self.min.round().as_ivec2()
    }

    /// Strict overlap test: rects that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}
