//! Axis-aligned boxes for every entity
//!
//! Screen coordinates: `x` grows right, `y` grows down, `(x, y)` is the
//! top-left corner.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Box of the given size centred on `center`
    pub fn from_center(center: Vec2, w: f32, h: f32) -> Self {
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Move so the centre lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap: touching edges do not count, empty boxes never overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Shift back inside `bounds` (boxes larger than bounds stick to the top-left)
    pub fn clamp_within(&mut self, bounds: &Rect) {
        if self.right() > bounds.right() {
            self.x = bounds.right() - self.w;
        }
        if self.x < bounds.x {
            self.x = bounds.x;
        }
        if self.bottom() > bounds.bottom() {
            self.y = bounds.bottom() - self.h;
        }
        if self.y < bounds.y {
            self.y = bounds.y;
        }
    }

    /// True once the box has fully crossed the edge of `bounds` it travels toward
    ///
    /// Only the direction of `velocity` matters; a box at rest is never past.
    pub fn is_past(&self, bounds: &Rect, velocity: Vec2) -> bool {
        (velocity.x > 0.0 && self.left() > bounds.right())
            || (velocity.x < 0.0 && self.right() < bounds.left())
            || (velocity.y > 0.0 && self.top() > bounds.bottom())
            || (velocity.y < 0.0 && self.bottom() < bounds.top())
    }
}
