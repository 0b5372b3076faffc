//! # Closest Surface Point
//!
//! Brute force nearest point search over all faces. Each face is treated as
//! a planar polygon: the query is projected onto the face plane, and if the
//! projection falls outside the polygon the nearest boundary point is used
//! instead.

use crate::kernel::SurfaceHit;
use crate::mesh::{Face, Mesh};
use glam::{DVec2, DVec3};

/// Finds the closest point on any face of `mesh` to `point`.
///
/// Ties keep the lowest face index. Returns `None` if the mesh has no
/// usable face.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::{ops::closest::closest_point, Mesh};
///
/// let tri = Mesh::from_polygon("tri", &[DVec3::ZERO, DVec3::X, DVec3::Y]);
/// let hit = closest_point(&tri, DVec3::new(0.25, 0.25, 3.0)).unwrap();
/// assert_eq!(hit.location, DVec3::new(0.25, 0.25, 0.0));
/// assert_eq!(hit.face, 0);
/// ```
pub fn closest_point(mesh: &Mesh, point: DVec3) -> Option<SurfaceHit> {
    let mut best: Option<(f64, SurfaceHit)> = None;
    for (index, face) in mesh.faces().iter().enumerate() {
        let normal = face.normal(mesh.vertices());
        if normal == DVec3::ZERO {
            continue;
        }
        let location = closest_on_face(face, mesh.vertices(), normal, point);
        let distance = location.distance_squared(point);
        if best.as_ref().map_or(true, |(d, _)| distance < *d) {
            best = Some((
                distance,
                SurfaceHit {
                    location,
                    normal,
                    face: index,
                },
            ));
        }
    }
    best.map(|(_, hit)| hit)
}

fn closest_on_face(face: &Face, positions: &[DVec3], normal: DVec3, point: DVec3) -> DVec3 {
    let corners: Vec<DVec3> = face.vertices().iter().map(|&v| positions[v as usize]).collect();
    let origin = face.centroid(positions);
    let projected = point - normal * (point - origin).dot(normal);

    let (u, v) = normal.any_orthonormal_pair();
    let to_2d = |p: DVec3| DVec2::new((p - origin).dot(u), (p - origin).dot(v));
    let polygon: Vec<DVec2> = corners.iter().map(|&p| to_2d(p)).collect();
    if contains(&polygon, to_2d(projected)) {
        return projected;
    }

    let n = corners.len();
    (0..n)
        .map(|i| closest_on_segment(corners[i], corners[(i + 1) % n], point))
        .reduce(|a, b| {
            if b.distance_squared(point) < a.distance_squared(point) {
                b
            } else {
                a
            }
        })
        .unwrap_or(projected)
}

/// Even-odd crossing test. Points on the boundary may land either way; the
/// boundary fallback returns the same location for them.
fn contains(polygon: &[DVec2], p: DVec2) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn closest_on_segment(a: DVec3, b: DVec3, p: DVec3) -> DVec3 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    a + ab * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::extrude::extrude;

    #[test]
    fn test_closest_outside_polygon_uses_boundary() {
        let tri = Mesh::from_polygon("tri", &[DVec3::ZERO, DVec3::X, DVec3::Y]);
        let hit = closest_point(&tri, DVec3::new(2.0, -1.0, 0.0)).unwrap();
        assert!((hit.location - DVec3::X).length() < 1e-12);
    }

    #[test]
    fn test_closest_on_box_picks_nearest_face() {
        let mut mesh = Mesh::from_polygon(
            "square",
            &[
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
        );
        extrude(&mut mesh, DVec3::Z).unwrap();
        let hit = closest_point(&mesh, DVec3::new(0.5, 0.5, 0.9)).unwrap();
        assert!((hit.location - DVec3::new(0.5, 0.5, 1.0)).length() < 1e-12);
        assert!((hit.normal - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_closest_inside_non_convex() {
        // L shape: the notch corner is outside
        let l_shape = Mesh::from_polygon(
            "l",
            &[
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(2.0, 0.0, 0.0),
                DVec3::new(2.0, 1.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(1.0, 2.0, 0.0),
                DVec3::new(0.0, 2.0, 0.0),
            ],
        );
        let inside = closest_point(&l_shape, DVec3::new(0.5, 1.5, 1.0)).unwrap();
        assert!((inside.location - DVec3::new(0.5, 1.5, 0.0)).length() < 1e-12);
        let notch = closest_point(&l_shape, DVec3::new(1.5, 1.5, 0.0)).unwrap();
        assert!(notch.location.distance(DVec3::new(1.5, 1.5, 0.0)) > 0.4);
    }
}
