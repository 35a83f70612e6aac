//! Axis-aligned rectangles for collision queries

use crate::vector::Vec2;

/// Axis-aligned rectangle in left/top/width/height form.
///
/// `left`/`top` is the minimum corner; y grows downward, as in screen
/// space. This is the canonical position and extent of every collidable
/// body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create from a minimum corner and a size.
    #[inline]
    pub fn from_position_size(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Minimum corner.
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.left, self.top)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.left + self.width * 0.5, self.top + self.height * 0.5)
    }

    /// Move the rectangle by `offset` in place.
    #[inline]
    pub fn translate(&mut self, offset: Vec2) {
        self.left += offset.x;
        self.top += offset.y;
    }

    /// A copy moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.left + offset.x, self.top + offset.y, self.width, self.height)
    }

    /// Grow by `amount` on every side.
    #[inline]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Whether the point lies inside (edges count as inside).
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Whether the two rectangles' interiors intersect with non-zero area.
    ///
    /// Strict on both axes: rectangles that merely share an edge or a
    /// corner do not overlap. Anything weaker would re-resolve resting
    /// contacts every tick.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && self.right() > other.left
            && self.top < other.bottom()
            && self.bottom() > other.top
    }
}
