//! # Width Aligner
//!
//! Gives the second outline the X extent of the first one: uniform XY
//! scaling about the origin followed by a shift along X. The first outline
//! is never touched.

use crate::error::AmbiguousError;
use glam::DVec3;
use mesh_kernel::{GeometryKernel, Mesh};

/// World-space `(min_x, max_x)` of the outline's bounding box.
pub fn x_extent(outline: &Mesh) -> (f64, f64) {
    let (min, max) = outline.world_bounds();
    (min.x, max.x)
}

/// Scales and moves `b` so its X extent matches `a`'s. Returns the scale
/// factor applied to `b`.
///
/// # Errors
///
/// `DegenerateWidth` naming the outline with zero or non-finite width;
/// kernel errors are wrapped in `KernelOperationFailed`.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use ambiguous_object::align::{align, x_extent};
/// use mesh_kernel::{Mesh, MeshKernel};
///
/// let a = Mesh::from_polygon("A", &[
///     DVec3::new(-2.0, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 1.0, 0.0),
/// ]);
/// let mut b = Mesh::from_polygon("B", &[
///     DVec3::new(0.0, 0.0, 0.0), DVec3::new(1.0, 0.0, 0.0), DVec3::new(0.0, 1.0, 0.0),
/// ]);
/// let scale = align(&a, &mut b, &MeshKernel).unwrap();
/// assert_eq!(scale, 4.0);
/// assert_eq!(x_extent(&b), (-2.0, 2.0));
/// ```
pub fn align<K>(a: &Mesh, b: &mut Mesh, kernel: &K) -> Result<f64, AmbiguousError>
where
    K: GeometryKernel + ?Sized,
{
    let (min_a, max_a) = x_extent(a);
    let (min_b, max_b) = x_extent(b);
    for (outline, width) in [(a, max_a - min_a), (&*b, max_b - min_b)] {
        if !(width.is_finite() && width > 0.0) {
            return Err(AmbiguousError::DegenerateWidth {
                outline: outline.name().to_string(),
            });
        }
    }

    let scale = (max_a - min_a) / (max_b - min_b);
    kernel.scale(b, DVec3::new(scale, scale, 1.0))?;

    let (new_min_b, _) = x_extent(b);
    kernel.translate(b, DVec3::new(min_a - new_min_b, 0.0, 0.0))?;

    log::debug!(
        "aligned '{}' on '{}': scale {:.6}, x in [{:.6}, {:.6}]",
        b.name(),
        a.name(),
        scale,
        min_a,
        max_a
    );
    Ok(scale)
}
