//! Shared capabilities of simulated bodies.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (min/max corners).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box anchored at a top-left corner.
    pub fn from_corner(corner: Vec2, width: f32, height: f32) -> Self {
        Self {
            min: corner,
            max: corner + Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Overlap test, boundary contact counts as intersection.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Capability set shared by every simulated body.
///
/// Mass is fixed at construction and never mutates.
pub trait Body {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn mass(&self) -> f32;

    /// Advance the body by `dt` seconds.
    fn integrate(&mut self, dt: f32);

    /// Extent used for broad-phase overlap tests.
    fn bounds(&self) -> Aabb;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_intersects() {
        let a = Aabb::from_corner(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Aabb::from_corner(Vec2::new(5.0, 5.0), 10.0, 10.0);
        let c = Aabb::from_corner(Vec2::new(20.0, 20.0), 5.0, 5.0);

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_edge_contact_counts() {
        let a = Aabb::from_corner(Vec2::new(0.0, 0.0), 10.0, 10.0);
        let b = Aabb::from_corner(Vec2::new(10.0, 0.0), 10.0, 10.0);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_aabb_center() {
        let a = Aabb::from_corner(Vec2::new(10.0, 20.0), 70.0, 100.0);
        assert_eq!(a.center(), Vec2::new(45.0, 70.0));
        assert_eq!(a.width(), 70.0);
        assert_eq!(a.height(), 100.0);
    }
}
