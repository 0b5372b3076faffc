//! # Bisect
//!
//! Cuts a mesh with a plane. Edges crossing the plane are split at the
//! crossing point, faces spanning the plane are split along the cut chord,
//! and with `fill` every closed loop of cut chords receives a cap face.
//!
//! Both halves are kept. Vertices within `PLANE_EPSILON` of the plane count
//! as lying on it and are never duplicated.

use crate::error::{KernelError, KernelResult};
use crate::mesh::{Edge, Face, Mesh};
use config::constants::PLANE_EPSILON;
use glam::DVec3;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Cuts `mesh` with the plane through `point` with `normal`.
///
/// Cap faces are wound so their normal points along `normal`.
///
/// # Errors
///
/// Returns `DegenerateGeometry` for a zero or non-finite normal.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::{ops::bisect::bisect, Mesh};
///
/// let mut quad = Mesh::from_polygon("wall", &[
///     DVec3::new(0.0, 0.0, -1.0),
///     DVec3::new(1.0, 0.0, -1.0),
///     DVec3::new(1.0, 0.0, 1.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// ]);
/// bisect(&mut quad, DVec3::ZERO, DVec3::Z, false).unwrap();
/// assert_eq!(quad.face_count(), 2);
/// assert_eq!(quad.vertex_count(), 6);
/// ```
pub fn bisect(mesh: &mut Mesh, point: DVec3, normal: DVec3, fill: bool) -> KernelResult<()> {
    let normal = normal.normalize_or_zero();
    if !point.is_finite() || normal == DVec3::ZERO || !normal.is_finite() {
        return Err(KernelError::DegenerateGeometry(format!(
            "bisect plane of mesh '{}' is undefined",
            mesh.name()
        )));
    }

    let mut positions = mesh.vertices().to_vec();
    let mut side: Vec<i8> = positions
        .iter()
        .map(|p| {
            let d = (*p - point).dot(normal);
            if d > PLANE_EPSILON {
                1
            } else if d < -PLANE_EPSILON {
                -1
            } else {
                0
            }
        })
        .collect();

    // Split crossing edges
    let mut splits: HashMap<Edge, u32> = HashMap::new();
    for edge in mesh.edges() {
        let [a, b] = edge.vertices();
        if side[a as usize] * side[b as usize] < 0 {
            let pa = positions[a as usize];
            let pb = positions[b as usize];
            let da = (pa - point).dot(normal);
            let db = (pb - point).dot(normal);
            let t = da / (da - db);
            splits.insert(*edge, positions.len() as u32);
            positions.push(pa.lerp(pb, t));
            side.push(0);
        }
    }

    // Split faces
    let mut faces = Vec::with_capacity(mesh.face_count() + splits.len());
    let mut chords = Vec::new();
    for face in mesh.faces() {
        let mut ring = Vec::with_capacity(face.len() + 2);
        for (a, b) in face.directed_edges() {
            ring.push(a);
            if let Some(&m) = splits.get(&Edge::new(a, b)) {
                ring.push(m);
            }
        }

        let spans = face.vertices().iter().any(|&v| side[v as usize] > 0)
            && face.vertices().iter().any(|&v| side[v as usize] < 0);
        let cuts: Vec<usize> = (0..ring.len())
            .filter(|&k| side[ring[k] as usize] == 0)
            .collect();

        if spans && cuts.len() == 2 && cuts[1] - cuts[0] > 1 && cuts[1] - cuts[0] < ring.len() - 1 {
            let (i, j) = (cuts[0], cuts[1]);
            let first = ring[i..=j].to_vec();
            let mut second = ring[j..].to_vec();
            second.extend_from_slice(&ring[..=i]);
            chords.push(Edge::new(ring[i], ring[j]));
            faces.push(Face::new(first));
            faces.push(Face::new(second));
        } else {
            if spans {
                log::warn!(
                    "bisect of '{}' left a face with {} cut points unsplit",
                    mesh.name(),
                    cuts.len()
                );
            }
            faces.push(Face::new(ring));
        }
    }

    // Keep wire edges, split where they cross
    let counts = mesh.edge_face_counts();
    let mut wire = Vec::new();
    for (edge, &count) in mesh.edges().iter().zip(&counts) {
        if count > 0 {
            continue;
        }
        let [a, b] = edge.vertices();
        match splits.get(edge) {
            Some(&m) => {
                wire.push(Edge::new(a, m));
                wire.push(Edge::new(m, b));
            }
            None => wire.push(*edge),
        }
    }

    if fill {
        for cap in cap_loops(&chords) {
            let face = Face::new(cap);
            let face = if face.normal(&positions).dot(normal) < 0.0 {
                face.reversed()
            } else {
                face
            };
            faces.push(face);
        }
    }

    log::debug!(
        "bisected '{}': {} edges split, {} chords",
        mesh.name(),
        splits.len(),
        chords.len()
    );

    mesh.replace(positions, faces, wire);
    Ok(())
}

/// Walks closed loops in the chord graph. Only components where every
/// vertex has exactly two chords are returned.
fn cap_loops(chords: &[Edge]) -> Vec<Vec<u32>> {
    let unique: BTreeSet<Edge> = chords.iter().copied().collect();
    let mut graph: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for edge in &unique {
        let [a, b] = edge.vertices();
        graph.entry(a).or_default().push(b);
        graph.entry(b).or_default().push(a);
    }

    let mut visited: BTreeSet<u32> = BTreeSet::new();
    let mut loops = Vec::new();
    for (&start, neighbors) in &graph {
        if visited.contains(&start) || neighbors.len() != 2 {
            continue;
        }
        let mut ring = vec![start];
        let mut prev = start;
        let mut current = neighbors[0];
        let mut closed = false;
        while let Some(next) = graph.get(&current) {
            if current == start {
                closed = true;
                break;
            }
            if next.len() != 2 || ring.contains(&current) {
                break;
            }
            ring.push(current);
            let step = if next[0] == prev { next[1] } else { next[0] };
            prev = current;
            current = step;
        }
        visited.extend(ring.iter().copied());
        if closed && ring.len() >= 3 {
            loops.push(ring);
        }
    }
    loops
}
