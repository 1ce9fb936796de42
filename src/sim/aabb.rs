//! Axis-aligned bounding boxes
//!
//! The only collision primitive in the crate. Overlap is strict: boxes that
//! merely touch along an edge do not overlap, matching the `<`/`>`
//! comparisons every variant of the original game used.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos(pos: Vec2, size: (f32, f32)) -> Self {
        Self {
            pos,
            size: Vec2::new(size.0, size.1),
        }
    }

    /// Top-left corner
    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test. Edge contact is not an overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let a_max = self.max();
        let b_max = other.max();
        self.pos.x < b_max.x
            && a_max.x > other.pos.x
            && self.pos.y < b_max.y
            && a_max.y > other.pos.y
    }

    /// True if the point is inside the box (min edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.pos.x && point.x < max.x && point.y >= self.pos.y && point.y < max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn aabb_strategy() -> impl Strategy<Value = Aabb> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            1.0f32..100.0,
            1.0f32..100.0,
        )
            .prop_map(|(x, y, w, h)| Aabb::new(x, y, w, h))
    }

    proptest! {
        /// a overlaps b exactly when b overlaps a
        #[test]
        fn prop_overlap_is_symmetric(a in aabb_strategy(), b in aabb_strategy()) {
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
        }

        /// Every box overlaps itself
        #[test]
        fn prop_overlap_is_reflexive(a in aabb_strategy()) {
            prop_assert!(a.overlaps(&a));
        }

        /// Translating both boxes by the same offset preserves the verdict
        #[test]
        fn prop_overlap_translation_invariant(
            a in aabb_strategy(),
            b in aabb_strategy(),
            dx in -200.0f32..200.0,
            dy in -200.0f32..200.0,
        ) {
            let offset = Vec2::new(dx, dy);
            let a2 = Aabb { pos: a.pos + offset, ..a };
            let b2 = Aabb { pos: b.pos + offset, ..b };
            prop_assert_eq!(a.overlaps(&b), a2.overlaps(&b2));
        }
    }

    #[test]
    fn test_clear_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_disjoint_boxes() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(20.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_edge_contact_is_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        // b's left edge exactly on a's right edge
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        // Corner contact only
        let c = Aabb::new(10.0, 10.0, 5.0, 5.0);
        assert!(!a.overlaps(&c));

        // One pixel of penetration flips the verdict
        let d = Aabb::new(9.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&d));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 10.0, 10.0);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_contains_point() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.contains(Vec2::new(0.0, 0.0)));
        assert!(a.contains(Vec2::new(9.9, 9.9)));
        assert!(!a.contains(Vec2::new(10.0, 5.0)));
        assert!(!a.contains(Vec2::new(-0.1, 5.0)));
    }

    #[test]
    fn test_center() {
        let a = Aabb::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(a.center(), Vec2::new(25.0, 40.0));
    }
}
