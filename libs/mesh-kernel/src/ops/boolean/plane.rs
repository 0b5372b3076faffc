//! # Plane for BSP Operations
//!
//! Oriented plane with point classification.

use config::constants::PLANE_EPSILON;
use glam::DVec3;

// =============================================================================
// CLASSIFICATION
// =============================================================================

/// Classification of a point or polygon relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// In front of the plane (positive side).
    Front,
    /// Behind the plane (negative side).
    Back,
    /// On the plane.
    Coplanar,
    /// Polygon with vertices on both sides.
    Spanning,
}

// =============================================================================
// PLANE
// =============================================================================

/// A plane given by unit normal and signed distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: DVec3,
    w: f64,
}

impl Plane {
    /// Creates a plane from a unit normal and distance.
    pub fn new(normal: DVec3, w: f64) -> Self {
        Self { normal, w }
    }

    /// Fits a plane to a vertex loop with Newell's method.
    ///
    /// Returns `None` for degenerate loops.
    pub fn from_points(points: &[DVec3]) -> Option<Self> {
        if points.len() < 3 {
            return None;
        }
        let n = points.len();
        let mut normal = DVec3::ZERO;
        let mut center = DVec3::ZERO;
        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
            center += p;
        }
        let normal = normal.try_normalize()?;
        let center = center / n as f64;
        Some(Self::new(normal, normal.dot(center)))
    }

    /// Unit normal.
    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Returns the plane facing the other way.
    pub fn flip(&self) -> Plane {
        Plane::new(-self.normal, -self.w)
    }

    /// Signed distance, positive in front.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.w
    }

    /// Classifies a point with `PLANE_EPSILON` tolerance.
    pub fn classify_point(&self, point: DVec3) -> Classification {
        let dist = self.signed_distance(point);
        if dist > PLANE_EPSILON {
            Classification::Front
        } else if dist < -PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_from_points() {
        let plane = Plane::from_points(&[
            DVec3::new(0.0, 0.0, 2.0),
            DVec3::new(1.0, 0.0, 2.0),
            DVec3::new(0.0, 1.0, 2.0),
        ])
        .unwrap();

        assert!((plane.normal() - DVec3::Z).length() < 1e-12);
        assert!((plane.w - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_degenerate() {
        assert!(Plane::from_points(&[DVec3::ZERO, DVec3::X, DVec3::X * 2.0]).is_none());
    }

    #[test]
    fn test_plane_classify_point() {
        let plane = Plane::new(DVec3::Z, 0.0);
        assert_eq!(plane.classify_point(DVec3::Z), Classification::Front);
        assert_eq!(plane.classify_point(-DVec3::Z), Classification::Back);
        assert_eq!(plane.classify_point(DVec3::new(1.0, 1.0, 1e-7)), Classification::Coplanar);
    }

    #[test]
    fn test_plane_flip() {
        let flipped = Plane::new(DVec3::Z, 5.0).flip();
        assert_eq!(flipped.normal(), -DVec3::Z);
        assert_eq!(flipped.signed_distance(DVec3::new(0.0, 0.0, 4.0)), 1.0);
        assert_eq!(flipped.flip(), Plane::new(DVec3::Z, 5.0));
    }
}
