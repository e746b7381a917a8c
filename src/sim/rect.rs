//! Axis-aligned rectangle geometry
//!
//! A rectangle is stored as its lower-bound (left/bottom) and upper-bound
//! (right/top) corners. Y grows upward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding rectangle, `lb <= rt` componentwise
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left-bottom corner
    pub lb: Vec2,
    /// Right-top corner
    pub rt: Vec2,
}

impl Rect {
    /// Build from a lower-left position and a size
    pub fn new(position: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x >= 0.0 && size.y >= 0.0, "negative rect size {size:?}");
        Self {
            lb: position,
            rt: position + size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.lb.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.rt.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.lb.y
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.rt.y
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.rt - self.lb
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.lb + self.rt) * 0.5
    }

    /// Grow the rectangle by `margin` on every side
    pub fn expand(&self, margin: Vec2) -> Self {
        Self {
            lb: self.lb - margin,
            rt: self.rt + margin,
        }
    }

    /// Overlap test that counts touching edges as overlapping
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }

    /// Horizontal extents overlap (edges inclusive)
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        !(self.left() > other.right() || self.right() < other.left())
    }

    /// Vertical extents overlap (edges inclusive)
    #[inline]
    pub fn overlaps_y(&self, other: &Rect) -> bool {
        !(self.top() < other.bottom() || self.bottom() > other.top())
    }

    /// Horizontal interiors overlap; flush sides do not count
    #[inline]
    pub fn intersects_x(&self, other: &Rect) -> bool {
        self.left() < other.right() && self.right() > other.left()
    }

    /// Vertical interiors overlap; flush edges do not count
    #[inline]
    pub fn intersects_y(&self, other: &Rect) -> bool {
        self.bottom() < other.top() && self.top() > other.bottom()
    }

    /// Interiors overlap; touching edges do not count
    pub fn intersects_strict(&self, other: &Rect) -> bool {
        self.intersects_x(other) && self.intersects_y(other)
    }

    /// `other` lies entirely within `self` (edges inclusive)
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.lb.x >= self.lb.x
            && other.lb.y >= self.lb.y
            && other.rt.x <= self.rt.x
            && other.rt.y <= self.rt.y
    }
}
