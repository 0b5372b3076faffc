//! # Contour Extractor
//!
//! Recovers the tube cross-section from the intersection solid.
//!
//! The two projected solids are built so that the wanted cross-section is
//! their intersection's "equator": the loop of lowest `|z|`. The walk starts
//! at the lowest vertex overall and repeatedly steps to the lowest
//! neighbor, never straight back to where it came from.
//!
//! ## Branch Filter
//!
//! Where several neighbors are available, edges running along Y (same X
//! at both ends) are skipped. Those come from the seam where the boolean
//! cut the solid on a constant-X plane. The exception is an edge whose
//! ends mirror each other across the X axis: it crosses a concave point
//! of the outline lying on that axis and belongs to the contour. When the
//! filter leaves nothing, every neighbor lies in the same YZ plane and all
//! of them stay candidates.
//!
//! ## Cut Faces
//!
//! The boolean leaves each constant-X cut face as a single polygon, so the
//! edge between two mirrored corners may not exist yet. Before the walk,
//! every such face is split along its mirrored chord of lowest `|z|`.
//!
//! ## Closure
//!
//! The walk stops on the first revisited vertex. If that is not the start
//! vertex, the lead-in path is dropped so the result is always a cycle.

use crate::error::AmbiguousError;
use config::constants::approx_equal;
use glam::DVec3;
use mesh_kernel::{Adjacency, Edge, Mesh};
use std::collections::HashSet;

// =============================================================================
// CONTOUR
// =============================================================================

/// Closed loop of distinct vertex indices; consecutive entries, including
/// last and first, are joined by a mesh edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contour {
    vertices: Vec<u32>,
}

impl Contour {
    /// Vertex indices in walk order.
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true for an empty loop.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Loop edges, including the closing one.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Edge::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }
}

// =============================================================================
// WALK
// =============================================================================

/// Index of the vertex with smallest `|z|`; the first one wins ties.
fn min_abs_z(mesh: &Mesh, indices: impl IntoIterator<Item = u32>) -> Option<u32> {
    let mut best: Option<(f64, u32)> = None;
    for i in indices {
        let z = mesh.vertex(i).z.abs();
        if best.map_or(z < f64::MAX, |(min, _)| z < min) {
            best = Some((z, i));
        }
    }
    best.map(|(_, i)| i)
}

/// True when `a` and `b` mirror each other across the X axis.
fn is_mirrored(a: DVec3, b: DVec3) -> bool {
    approx_equal(a.y, -b.y) && approx_equal(a.z, -b.z)
}

/// Neighbors of `current` the walk may step to.
fn candidates(mesh: &Mesh, adjacency: &Adjacency, current: u32, previous: Option<u32>) -> Vec<u32> {
    let found: Vec<u32> = adjacency
        .neighbors(mesh, current)
        .filter(|&i| Some(i) != previous)
        .collect();
    if found.len() <= 1 {
        return found;
    }

    let v = mesh.vertex(current);
    let filtered: Vec<u32> = found
        .iter()
        .copied()
        .filter(|&i| {
            let vi = mesh.vertex(i);
            v.x != vi.x || is_mirrored(v, vi)
        })
        .collect();
    if filtered.is_empty() {
        found
    } else {
        filtered
    }
}

/// Walks the contour of `mesh` without modifying it.
///
/// # Errors
///
/// `NoConnectedVertex` if the walk reaches a vertex without candidates,
/// including the empty mesh.
pub fn find_contour(mesh: &Mesh) -> Result<Contour, AmbiguousError> {
    let start = min_abs_z(mesh, 0..mesh.vertex_count() as u32)
        .ok_or(AmbiguousError::NoConnectedVertex { vertex: 0 })?;
    let adjacency = mesh.adjacency();

    let mut position: Vec<Option<usize>> = vec![None; mesh.vertex_count()];
    let mut vertices = vec![start];
    position[start as usize] = Some(0);
    let mut previous = None;
    let mut current = start;

    loop {
        let next = min_abs_z(mesh, candidates(mesh, &adjacency, current, previous))
            .ok_or(AmbiguousError::NoConnectedVertex { vertex: current })?;
        previous = Some(current);
        current = next;

        if let Some(at) = position[current as usize] {
            if at > 0 {
                log::debug!("contour closed on vertex {current}, dropping {at} lead-in vertices");
                vertices.drain(..at);
            }
            break;
        }
        position[current as usize] = Some(vertices.len());
        vertices.push(current);
    }

    Ok(Contour { vertices })
}

// =============================================================================
// CUT FACES
// =============================================================================

/// Lowest mirrored chord of a face lying in a constant-X plane.
fn mirrored_chord(mesh: &Mesh, corners: &[u32]) -> Option<(u32, u32)> {
    let &first = corners.first()?;
    let x = mesh.vertex(first).x;
    if !corners.iter().all(|&c| approx_equal(mesh.vertex(c).x, x)) {
        return None;
    }

    let n = corners.len();
    let mut best: Option<(f64, u32, u32)> = None;
    for i in 0..n {
        for j in i + 2..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (a, b) = (corners[i], corners[j]);
            let (pa, pb) = (mesh.vertex(a), mesh.vertex(b));
            if !is_mirrored(pa, pb) {
                continue;
            }
            let height = pa.z.abs().max(pb.z.abs());
            if best.map_or(true, |(min, _, _)| height < min) {
                best = Some((height, a, b));
            }
        }
    }
    best.map(|(_, a, b)| (a, b))
}

/// Splits every constant-X face along its lowest mirrored chord.
///
/// Returns the number of faces split. Faces without a mirrored pair of
/// non-adjacent corners are left alone.
///
/// # Errors
///
/// `KernelOperationFailed` if a split is rejected by the mesh.
pub fn connect_mirrored_corners(mesh: &mut Mesh) -> Result<usize, AmbiguousError> {
    let chords: Vec<(usize, u32, u32)> = mesh
        .faces()
        .iter()
        .enumerate()
        .filter_map(|(face, f)| mirrored_chord(mesh, f.vertices()).map(|(a, b)| (face, a, b)))
        .collect();
    // Appended halves never shift earlier face indices
    for &(face, a, b) in &chords {
        mesh.split_face(face, a, b)?;
    }
    if !chords.is_empty() {
        log::debug!("split {} cut faces of '{}'", chords.len(), mesh.name());
    }
    Ok(chords.len())
}

// =============================================================================
// EXTRACTION
// =============================================================================

/// Walks the contour, then prunes `mesh` down to the contour polyline.
///
/// Constant-X faces are first split by [`connect_mirrored_corners`]. Faces
/// and every non-contour edge are then deleted and the remaining vertices
/// are renumbered; the returned contour uses the new numbering.
///
/// # Errors
///
/// As [`find_contour`] and [`connect_mirrored_corners`]. On error the mesh
/// has at most gained chord edges.
pub fn extract_contour(mesh: &mut Mesh) -> Result<Contour, AmbiguousError> {
    connect_mirrored_corners(mesh)?;
    let contour = find_contour(mesh)?;
    let keep: HashSet<Edge> = contour.edges().collect();
    let old_count = mesh.vertex_count();

    mesh.clear_faces();
    mesh.retain_edges(|_, edge| keep.contains(edge));
    mesh.remove_loose_vertices();

    // Surviving vertices keep their relative order
    let mut sorted = contour.vertices.clone();
    sorted.sort_unstable();
    let mut new_index = vec![0u32; old_count];
    for (rank, &v) in sorted.iter().enumerate() {
        new_index[v as usize] = rank as u32;
    }
    let vertices = contour
        .vertices
        .iter()
        .map(|&v| new_index[v as usize])
        .collect();

    log::debug!(
        "contour of '{}': {} vertices",
        mesh.name(),
        contour.len()
    );
    Ok(Contour { vertices })
}

// =============================================================================
// TESTS
// =============================================================================
