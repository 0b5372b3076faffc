//! # Face Triangulation
//!
//! Splits non-convex faces into triangles so that algorithms assuming
//! convex polygons (BSP splitting) can consume them. Convex faces are
//! returned unchanged.
//!
//! Non-convex faces are projected onto their plane and triangulated with
//! `earcutr`, a port of the earcut.js ear clipping library.

use crate::error::{KernelError, KernelResult};
use crate::mesh::Face;
use glam::DVec3;

/// Tolerance on the turn test, relative to the squared edge lengths.
const CONVEX_EPSILON: f64 = 1e-12;

/// Returns true if the face turns the same way at every corner.
pub fn is_convex(face: &Face, positions: &[DVec3]) -> bool {
    let normal = face.normal(positions);
    let v = face.vertices();
    let n = v.len();
    (0..n).all(|i| {
        let a = positions[v[i] as usize];
        let b = positions[v[(i + 1) % n] as usize];
        let c = positions[v[(i + 2) % n] as usize];
        let ab = b - a;
        let bc = c - b;
        ab.cross(bc).dot(normal) >= -CONVEX_EPSILON * ab.length_squared().max(bc.length_squared())
    })
}

/// Splits `face` into convex pieces wound like the original.
///
/// # Errors
///
/// Returns `TriangulationFailed` if ear clipping produces no triangles.
pub fn convex_pieces(face: &Face, positions: &[DVec3]) -> KernelResult<Vec<Face>> {
    if face.len() <= 3 || is_convex(face, positions) {
        return Ok(vec![face.clone()]);
    }

    let normal = face.normal(positions);
    let (u, v) = normal.any_orthonormal_pair();
    let mut coords = Vec::with_capacity(face.len() * 2);
    for &i in face.vertices() {
        let p = positions[i as usize];
        coords.push(p.dot(u));
        coords.push(p.dot(v));
    }

    let hole_indices: Vec<usize> = Vec::new();
    let triangles = earcutr::earcut(&coords, &hole_indices, 2)
        .map_err(|e| KernelError::TriangulationFailed(format!("earcut error: {:?}", e)))?;
    if triangles.is_empty() {
        return Err(KernelError::TriangulationFailed(format!(
            "no triangles for a face with {} vertices",
            face.len()
        )));
    }

    let corners = face.vertices();
    Ok(triangles
        .chunks_exact(3)
        .map(|t| {
            let tri = Face::new(vec![corners[t[0]], corners[t[1]], corners[t[2]]]);
            if tri.normal(positions).dot(normal) < 0.0 {
                tri.reversed()
            } else {
                tri
            }
        })
        .collect())
}
