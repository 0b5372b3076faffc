//! # Extrusion
//!
//! Sweeps every element of a mesh along an offset vector:
//!
//! - faces become closed prisms (bottom cap, top cap, side walls on the
//!   region boundary)
//! - wire edges become quads
//! - loose vertices become edges
//!
//! Caps are oriented so the top cap faces along the offset, which keeps the
//! prism outward facing whatever winding the source faces had.

use crate::error::{KernelError, KernelResult};
use crate::mesh::{Edge, Face, Mesh};
use glam::DVec3;

/// Extrudes `mesh` by `offset` in place.
///
/// # Errors
///
/// Returns `DegenerateGeometry` for a zero or non-finite offset.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::{ops::extrude::extrude, Mesh};
///
/// let mut tri = Mesh::from_polygon("tri", &[DVec3::ZERO, DVec3::X, DVec3::Y]);
/// extrude(&mut tri, DVec3::new(0.0, 0.0, 2.0)).unwrap();
/// assert_eq!(tri.vertex_count(), 6);
/// assert_eq!(tri.face_count(), 5);
/// ```
pub fn extrude(mesh: &mut Mesh, offset: DVec3) -> KernelResult<()> {
    if !offset.is_finite() || offset.length_squared() == 0.0 {
        return Err(KernelError::DegenerateGeometry(format!(
            "cannot extrude mesh '{}' by {:?}",
            mesh.name(),
            offset
        )));
    }

    let n = mesh.vertex_count() as u32;
    let mut positions = mesh.vertices().to_vec();
    positions.extend(mesh.vertices().iter().map(|p| *p + offset));

    let counts = mesh.edge_face_counts();
    let boundary = |a: u32, b: u32| {
        mesh.edge_index(a, b)
            .map(|i| counts[i] == 1)
            .unwrap_or(false)
    };

    let mut faces = Vec::with_capacity(mesh.face_count() * 2);
    let mut walls = Vec::new();
    for face in mesh.faces() {
        let oriented = if face.normal(mesh.vertices()).dot(offset) >= 0.0 {
            face.clone()
        } else {
            face.reversed()
        };
        for (a, b) in oriented.directed_edges() {
            if a != b && boundary(a, b) {
                walls.push(Face::new(vec![a, b, b + n, a + n]));
            }
        }
        faces.push(oriented.reversed());
        faces.push(oriented.shifted(n));
    }

    let mut wire = Vec::new();
    let mut touched = vec![false; n as usize];
    for (edge, &count) in mesh.edges().iter().zip(&counts) {
        let [a, b] = edge.vertices();
        touched[a as usize] = true;
        touched[b as usize] = true;
        if count == 0 {
            walls.push(Face::new(vec![a, b, b + n, a + n]));
        }
    }
    for face in mesh.faces() {
        for &v in face.vertices() {
            touched[v as usize] = true;
        }
    }
    for v in (0..n).filter(|v| !touched[*v as usize]) {
        wire.push(Edge::new(v, v + n));
    }

    log::debug!(
        "extruded '{}': {} caps, {} walls, {} vertex edges",
        mesh.name(),
        faces.len(),
        walls.len(),
        wire.len()
    );

    faces.extend(walls);
    mesh.replace(positions, faces, wire);
    Ok(())
}
