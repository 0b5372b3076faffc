//! # Boolean Intersection (CSG)
//!
//! Constructive Solid Geometry intersection using BSP trees.
//!
//! ## Algorithm
//!
//! Based on the csg.js algorithm by Evan Wallace:
//!
//! ```text
//! A.invert(); B.clipTo(A); B.invert(); A.clipTo(B); B.clipTo(A);
//! A.build(B.allPolygons()); A.invert(); result = A.allPolygons()
//! ```
//!
//! Faces are split into convex pieces before entering the tree. The
//! result is rebuilt into an indexed mesh by welding coincident corners
//! within `WELD_EPSILON`; T-junctions from BSP splits are left in place.

mod bsp;
mod plane;
mod polygon;


use super::triangulate::convex_pieces;
use super::weld::VertexWelder;
use crate::error::{KernelError, KernelResult};
use crate::mesh::{Face, Mesh};
use bsp::BspNode;
use config::constants::WELD_EPSILON;
use polygon::Polygon;

// =============================================================================
// PUBLIC API
// =============================================================================

/// Computes the intersection of two closed meshes.
///
/// Both operands are taken in world space (their transforms are applied to
/// the polygon soup); the result has an identity transform and the name of
/// `a`.
///
/// ## Errors
///
/// `BooleanFailed` if an operand has no faces or the operands do not
/// overlap, `TriangulationFailed` if a non-convex face cannot be split.
///
/// ## Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::{ops::{extrude::extrude, intersection}, Mesh};
///
/// let cube = |min: f64| {
///     let mut m = Mesh::from_polygon("cube", &[
///         DVec3::new(min, min, min),
///         DVec3::new(min + 2.0, min, min),
///         DVec3::new(min + 2.0, min + 2.0, min),
///         DVec3::new(min, min + 2.0, min),
///     ]);
///     extrude(&mut m, DVec3::new(0.0, 0.0, 2.0)).unwrap();
///     m
/// };
/// let result = intersection(&cube(0.0), &cube(1.0)).unwrap();
/// let (min, max) = result.bounding_box();
/// assert!((min - DVec3::splat(1.0)).length() < 1e-9);
/// assert!((max - DVec3::splat(2.0)).length() < 1e-9);
/// ```
pub fn intersection(a: &Mesh, b: &Mesh) -> KernelResult<Mesh> {
    let polys_a = mesh_to_polygons(a)?;
    let polys_b = mesh_to_polygons(b)?;

    for (mesh, polys) in [(a, &polys_a), (b, &polys_b)] {
        if polys.is_empty() {
            return Err(KernelError::BooleanFailed {
                operation: "intersection".to_string(),
                message: format!("operand '{}' has no faces", mesh.name()),
            });
        }
    }

    let mut bsp_a = BspNode::new(polys_a);
    let mut bsp_b = BspNode::new(polys_b);

    bsp_a.invert();
    bsp_b.clip_to(&bsp_a);
    bsp_b.invert();
    bsp_a.clip_to(&bsp_b);
    bsp_b.clip_to(&bsp_a);
    bsp_a.build(bsp_b.all_polygons());
    bsp_a.invert();

    let result = polygons_to_mesh(a.name(), &bsp_a.all_polygons());
    if result.face_count() == 0 {
        return Err(KernelError::BooleanFailed {
            operation: "intersection".to_string(),
            message: format!("'{}' and '{}' do not overlap", a.name(), b.name()),
        });
    }

    log::debug!(
        "intersection of '{}' and '{}': {} faces, {} vertices",
        a.name(),
        b.name(),
        result.face_count(),
        result.vertex_count()
    );
    Ok(result)
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Converts a mesh to world-space convex polygons.
fn mesh_to_polygons(mesh: &Mesh) -> KernelResult<Vec<Polygon>> {
    let transform = mesh.transform();
    let world: Vec<_> = mesh
        .vertices()
        .iter()
        .map(|p| transform.transform_point3(*p))
        .collect();

    let mut polygons = Vec::with_capacity(mesh.face_count());
    for face in mesh.faces() {
        let face = if transform.determinant() < 0.0 {
            face.reversed()
        } else {
            face.clone()
        };
        for piece in convex_pieces(&face, &world)? {
            let corners = piece.vertices().iter().map(|&v| world[v as usize]).collect();
            if let Some(poly) = Polygon::from_vertices(corners) {
                polygons.push(poly);
            }
        }
    }
    Ok(polygons)
}

/// Rebuilds an indexed mesh from a polygon soup.
fn polygons_to_mesh(name: &str, polygons: &[Polygon]) -> Mesh {
    let mut welder = VertexWelder::new(WELD_EPSILON);
    let mut faces = Vec::with_capacity(polygons.len());

    for poly in polygons {
        let mut ring: Vec<u32> = Vec::with_capacity(poly.vertices().len());
        for &p in poly.vertices() {
            let index = welder.weld(p);
            if ring.last() != Some(&index) {
                ring.push(index);
            }
        }
        while ring.len() > 1 && ring.first() == ring.last() {
            ring.pop();
        }
        if ring.len() >= 3 {
            faces.push(Face::new(ring));
        }
    }

    let mut mesh = Mesh::new(name);
    mesh.replace(welder.into_positions(), faces, Vec::new());
    mesh.remove_loose_vertices();
    mesh
}
