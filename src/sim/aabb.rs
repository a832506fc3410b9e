//! Axis-aligned box overlap with grazing tolerance
//!
//! Screen coordinates: x grows right, y grows down. A box's trailing edges
//! (right and bottom) are pulled in by the tolerance before testing, so a
//! shallow graze does not count as contact.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}

/// Tolerant overlap test.
///
/// True when `a.left < b.right - tol`, `a.right - tol > b.left`,
/// `a.top < b.bottom - tol` and `a.bottom - tol > b.top` all hold.
#[inline]
pub fn intersects(a: &Rect, b: &Rect, tolerance: f32) -> bool {
    a.left() < b.right() - tolerance
        && a.right() - tolerance > b.left()
        && a.top() < b.bottom() - tolerance
        && a.bottom() - tolerance > b.top()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f32 = 8.0;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let b = Rect::new(10.0, 10.0, 50.0, 50.0);
        assert!(intersects(&a, &b, TOL));
        assert!(intersects(&b, &a, TOL));
    }

    #[test]
    fn test_disjoint_boxes_miss() {
        let a = Rect::new(0.0, 0.0, 30.0, 30.0);
        let b = Rect::new(100.0, 0.0, 30.0, 30.0);
        assert!(!intersects(&a, &b, TOL));
    }

    #[test]
    fn test_horizontal_overlap_of_exactly_tolerance_misses() {
        // a's right edge reaches exactly TOL into b
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(50.0 - TOL, 0.0, 50.0, 50.0);
        assert!(!intersects(&a, &b, TOL));

        // One pixel deeper is a hit
        let b = Rect::new(50.0 - TOL - 1.0, 0.0, 50.0, 50.0);
        assert!(intersects(&a, &b, TOL));
    }

    #[test]
    fn test_vertical_overlap_of_exactly_tolerance_misses() {
        let a = Rect::new(0.0, 100.0, 50.0, 50.0);
        // b's bottom edge reaches exactly TOL into a from above
        let b = Rect::new(0.0, 100.0 + TOL - 50.0, 50.0, 50.0);
        assert!(!intersects(&a, &b, TOL));

        let b = Rect::new(0.0, 100.0 + TOL + 1.0 - 50.0, 50.0, 50.0);
        assert!(intersects(&a, &b, TOL));
    }

    #[test]
    fn test_zero_tolerance_is_plain_aabb() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let overlapping = Rect::new(9.5, 0.0, 10.0, 10.0);
        assert!(!intersects(&a, &touching, 0.0));
        assert!(intersects(&a, &overlapping, 0.0));
    }

    #[test]
    fn test_box_thinner_than_tolerance_never_hits_from_trailing_side() {
        // b is shorter than the tolerance, so `a.top < b.bottom - tol` can only
        // hold when a starts above b
        let b = Rect::new(0.0, 100.0, 50.0, 4.0);
        let a = Rect::new(0.0, 101.0, 50.0, 50.0);
        assert!(!intersects(&a, &b, TOL));
    }
}
