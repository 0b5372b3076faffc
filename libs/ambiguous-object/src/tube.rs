//! # Tube Builder
//!
//! Extrudes the contour polyline downward into the tube wall and, on
//! request, cuts the wall with a horizontal plane whose cap forms an inner
//! brace.

use crate::error::AmbiguousError;
use config::constants::GeometryParams;
use glam::DVec3;
use mesh_kernel::{GeometryKernel, Mesh};

/// Turns the contour polyline in `mesh` into a tube of height
/// `tube_extrusion * depth` hanging below it.
///
/// With `cross_plane`, the tube is bisected at `z = -depth * plane_position`
/// and the cut is capped.
pub fn build_tube<K>(
    mesh: &mut Mesh,
    depth: f64,
    cross_plane: bool,
    params: &GeometryParams,
    kernel: &K,
) -> Result<(), AmbiguousError>
where
    K: GeometryKernel + ?Sized,
{
    let height = params.tube_extrusion * depth;
    kernel.extrude(mesh, DVec3::new(0.0, 0.0, -height))?;

    if cross_plane {
        let point = DVec3::new(0.0, 0.0, -depth * params.plane_position);
        kernel.bisect(mesh, point, DVec3::Z, true)?;
    }

    log::debug!(
        "tube '{}': height {:.6}, cross plane {}, {} faces",
        mesh.name(),
        height,
        cross_plane,
        mesh.face_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_kernel::MeshKernel;

    fn triangle_loop() -> Mesh {
        let mut mesh = Mesh::new("loop");
        mesh.add_vertex(DVec3::new(-1.0, -1.0, 0.0));
        mesh.add_vertex(DVec3::new(1.0, -1.0, 0.0));
        mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            mesh.add_edge(a, b).unwrap();
        }
        mesh
    }

    #[test]
    fn test_tube_without_cross_plane() {
        let params = GeometryParams::default();
        let mut mesh = triangle_loop();
        build_tube(&mut mesh, 2.0, false, &params, &MeshKernel).unwrap();

        assert_eq!(mesh.face_count(), 3);
        assert_eq!(mesh.vertex_count(), 6);
        let (min, max) = mesh.bounding_box();
        assert_relative_eq!(min.z, -params.tube_extrusion * 2.0);
        assert_eq!(max.z, 0.0);
    }

    #[test]
    fn test_tube_with_cross_plane() {
        let params = GeometryParams::default();
        let mut mesh = triangle_loop();
        build_tube(&mut mesh, 2.0, true, &params, &MeshKernel).unwrap();

        let level = -2.0 * params.plane_position;
        let caps: Vec<_> = mesh
            .faces()
            .iter()
            .filter(|f| {
                f.vertices()
                    .iter()
                    .all(|&v| (mesh.vertex(v).z - level).abs() < 1e-9)
            })
            .collect();
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].len(), 3);
        assert_eq!(mesh.face_count(), 7);
    }
}
