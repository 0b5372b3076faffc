//! # Geometry Kernel
//!
//! The set of mesh edits the pipeline needs, behind a trait so callers can
//! swap the implementation (a test double, a different boolean engine).
//!
//! All linear transforms pivot about the world origin and act on vertex
//! coordinates directly; the mesh's world transform is left untouched.

use crate::error::{KernelError, KernelResult};
use crate::mesh::Mesh;
use crate::ops;
use glam::{DMat4, DQuat, DVec3};

// =============================================================================
// SURFACE HIT
// =============================================================================

/// Closest point on a mesh surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Location on the surface.
    pub location: DVec3,
    /// Unit normal of the face containing the location.
    pub normal: DVec3,
    /// Index of that face.
    pub face: usize,
}

// =============================================================================
// TRAIT
// =============================================================================

/// Mesh editing operations used by the pipeline.
pub trait GeometryKernel {
    /// Extrudes the whole mesh by `offset`.
    ///
    /// Faces become closed prisms, wire edges become quads and loose
    /// vertices become edges.
    fn extrude(&self, mesh: &mut Mesh, offset: DVec3) -> KernelResult<()>;

    /// Scales vertex coordinates per axis about the origin.
    fn scale(&self, mesh: &mut Mesh, factors: DVec3) -> KernelResult<()>;

    /// Rotates vertex coordinates by `angle` radians about `axis` through
    /// the origin.
    fn rotate(&self, mesh: &mut Mesh, angle: f64, axis: DVec3) -> KernelResult<()>;

    /// Moves vertex coordinates by `offset`.
    fn translate(&self, mesh: &mut Mesh, offset: DVec3) -> KernelResult<()>;

    /// Replaces `base` with its intersection with `tool`. The result keeps
    /// the name of `base`; `tool` is consumed.
    fn boolean_intersect(&self, base: &mut Mesh, tool: Mesh) -> KernelResult<()>;

    /// Welds vertices closer than `threshold`. Returns how many vertices
    /// were removed.
    fn merge_by_distance(&self, mesh: &mut Mesh, threshold: f64) -> KernelResult<usize>;

    /// Cuts every edge and face crossing the plane through `point` with
    /// `normal`. With `fill`, closed cut loops get a cap face.
    fn bisect(&self, mesh: &mut Mesh, point: DVec3, normal: DVec3, fill: bool)
        -> KernelResult<()>;

    /// Finds the surface point closest to `point`, or `None` for a mesh
    /// without faces.
    fn closest_point_on_surface(&self, mesh: &Mesh, point: DVec3) -> Option<SurfaceHit>;
}

// =============================================================================
// MESH KERNEL
// =============================================================================

/// Pure Rust implementation of [`GeometryKernel`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MeshKernel;

impl MeshKernel {
    fn linear(mesh: &mut Mesh, matrix: DMat4, what: &str) -> KernelResult<()> {
        if !matrix.is_finite() {
            return Err(KernelError::DegenerateGeometry(format!(
                "{} of mesh '{}' has non-finite parameters",
                what,
                mesh.name()
            )));
        }
        mesh.transform_vertices(&matrix);
        Ok(())
    }
}

impl GeometryKernel for MeshKernel {
    fn extrude(&self, mesh: &mut Mesh, offset: DVec3) -> KernelResult<()> {
        ops::extrude::extrude(mesh, offset)
    }

    fn scale(&self, mesh: &mut Mesh, factors: DVec3) -> KernelResult<()> {
        Self::linear(mesh, DMat4::from_scale(factors), "scale")
    }

    fn rotate(&self, mesh: &mut Mesh, angle: f64, axis: DVec3) -> KernelResult<()> {
        let axis = axis.normalize_or_zero();
        if axis == DVec3::ZERO {
            return Err(KernelError::DegenerateGeometry(format!(
                "rotation of mesh '{}' about a zero axis",
                mesh.name()
            )));
        }
        Self::linear(
            mesh,
            DMat4::from_quat(DQuat::from_axis_angle(axis, angle)),
            "rotation",
        )
    }

    fn translate(&self, mesh: &mut Mesh, offset: DVec3) -> KernelResult<()> {
        Self::linear(mesh, DMat4::from_translation(offset), "translation")
    }

    fn boolean_intersect(&self, base: &mut Mesh, tool: Mesh) -> KernelResult<()> {
        let name = base.name().to_string();
        let mut result = ops::boolean::intersection(base, &tool)?;
        result.set_name(name);
        *base = result;
        Ok(())
    }

    fn merge_by_distance(&self, mesh: &mut Mesh, threshold: f64) -> KernelResult<usize> {
        Ok(ops::merge::merge_by_distance(mesh, threshold))
    }

    fn bisect(
        &self,
        mesh: &mut Mesh,
        point: DVec3,
        normal: DVec3,
        fill: bool,
    ) -> KernelResult<()> {
        ops::bisect::bisect(mesh, point, normal, fill)
    }

    fn closest_point_on_surface(&self, mesh: &Mesh, point: DVec3) -> Option<SurfaceHit> {
        ops::closest::closest_point(mesh, point)
    }
}

// =============================================================================
// TESTS
// =============================================================================
