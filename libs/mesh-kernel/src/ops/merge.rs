//! # Merge by Distance
//!
//! Welds vertices closer than a threshold and cleans up faces and edges
//! collapsed by the weld.

use super::weld::VertexWelder;
use crate::mesh::Mesh;

/// Welds vertices of `mesh` within `threshold` of each other.
///
/// A non-positive or NaN threshold is a no-op. Returns the number of
/// removed vertices.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::{ops::merge::merge_by_distance, Mesh};
///
/// let mut mesh = Mesh::from_polygon("quad", &[
///     DVec3::ZERO,
///     DVec3::X,
///     DVec3::new(1.0, 1e-6, 0.0),
///     DVec3::Y,
/// ]);
/// assert_eq!(merge_by_distance(&mut mesh, 1e-3), 1);
/// assert_eq!(mesh.faces()[0].len(), 3);
/// ```
pub fn merge_by_distance(mesh: &mut Mesh, threshold: f64) -> usize {
    if threshold.is_nan() || threshold <= 0.0 || mesh.is_empty() {
        return 0;
    }

    let mut welder = VertexWelder::new(threshold);
    let new_index: Vec<u32> = mesh.vertices().iter().map(|p| welder.weld(*p)).collect();
    let removed = mesh.vertex_count() - welder.len();
    if removed == 0 {
        return 0;
    }

    mesh.reindex(&new_index, welder.into_positions());
    log::debug!(
        "merged {} vertices of '{}' within {:.3e}",
        removed,
        mesh.name(),
        threshold
    );
    removed
}
