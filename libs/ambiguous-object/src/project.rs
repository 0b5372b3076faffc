//! # Oblique Projector
//!
//! Turns a flat outline into a solid whose silhouette, seen along a
//! direction tilted by `rotation` from the vertical, is the outline again.
//!
//! The outline is extruded into a prism centered on `z = 0`, squashed on Y
//! by `cos(rotation)` and tilted about X. Looking down the tilted Z axis,
//! the squash is undone exactly by foreshortening, so the outline's Y
//! extent is preserved while the two views for opposite signs differ.

use crate::error::AmbiguousError;
use config::constants::GeometryParams;
use glam::DVec3;
use mesh_kernel::{GeometryKernel, Mesh};

/// The two viewing directions of the illusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSign {
    /// Tilt by `+rotation` about X.
    Positive,
    /// Tilt by `-rotation` about X.
    Negative,
}

impl ViewSign {
    /// Returns `1.0` or `-1.0`.
    pub fn value(self) -> f64 {
        match self {
            ViewSign::Positive => 1.0,
            ViewSign::Negative => -1.0,
        }
    }
}

/// Projects `outline` in place into the solid seen from `sign`.
///
/// # Errors
///
/// Kernel failures are wrapped in `KernelOperationFailed`; an outline with
/// no Y extent cannot be extruded.
pub fn project<K>(
    outline: &mut Mesh,
    sign: ViewSign,
    params: &GeometryParams,
    kernel: &K,
) -> Result<(), AmbiguousError>
where
    K: GeometryKernel + ?Sized,
{
    let depth = outline.dimensions().y;
    let height = params.extrusion_factor * depth;

    kernel.extrude(outline, DVec3::new(0.0, 0.0, height))?;
    kernel.translate(outline, DVec3::new(0.0, 0.0, -height / 2.0))?;
    kernel.scale(outline, DVec3::new(1.0, params.rotation.cos(), 1.0))?;
    kernel.rotate(outline, params.rotation * sign.value(), DVec3::X)?;

    log::debug!(
        "projected '{}' ({:?}): depth {:.6}, prism height {:.6}",
        outline.name(),
        sign,
        depth,
        height
    );
    Ok(())
}
