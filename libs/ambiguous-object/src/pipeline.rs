//! # Pipeline Orchestrator
//!
//! Sequences the whole construction:
//!
//! ```text
//! apply transforms → validate A, B → align B on A → project A (+), B (-)
//!   → A ∩ B → merge → contour → tube
//! ```
//!
//! Every step runs once, in this order. The first failure aborts the run;
//! outlines may be left partially modified by an aborted run.

use crate::align::align;
use crate::contour::extract_contour;
use crate::error::AmbiguousError;
use crate::project::{project, ViewSign};
use crate::tube::build_tube;
use crate::validate::validate;
use config::constants::GeometryParams;
use mesh_kernel::{GeometryKernel, Mesh};
use serde::{Deserialize, Serialize};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Options of one build.
///
/// # Example
///
/// ```rust
/// use ambiguous_object::PipelineConfig;
///
/// let config: PipelineConfig = serde_json::from_str(r#"{"cross_plane": false}"#).unwrap();
/// assert!(!config.cross_plane);
/// assert_eq!(config.params, Default::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Cut the tube with a capped horizontal plane, which stiffens a paper
    /// model of the tube.
    pub cross_plane: bool,
    /// Proportions of the construction.
    pub params: GeometryParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cross_plane: true,
            params: GeometryParams::default(),
        }
    }
}

// =============================================================================
// BUILD
// =============================================================================

/// Builds the ambiguous object tube from two outlines.
///
/// `outlines` must hold exactly the two outlines, A first. On success both
/// are taken out of the vector: B is consumed by the intersection and A is
/// returned as the tube. On failure the vector keeps whatever state the
/// outlines reached. The reason of every failure is also logged at error
/// level.
///
/// # Errors
///
/// `WrongSelectionCount` unless two outlines are given, `InvalidConfig`,
/// the validation errors of the first invalid outline, `DegenerateWidth`,
/// `NoConnectedVertex`, or `KernelOperationFailed`.
pub fn build<K>(
    outlines: &mut Vec<Mesh>,
    kernel: &K,
    config: &PipelineConfig,
) -> Result<Mesh, AmbiguousError>
where
    K: GeometryKernel + ?Sized,
{
    run(outlines, kernel, config).inspect_err(|err| log::error!("{err}"))
}

fn run<K>(
    outlines: &mut Vec<Mesh>,
    kernel: &K,
    config: &PipelineConfig,
) -> Result<Mesh, AmbiguousError>
where
    K: GeometryKernel + ?Sized,
{
    let count = outlines.len();
    let [a, b] = outlines.as_mut_slice() else {
        return Err(AmbiguousError::WrongSelectionCount { count });
    };
    let params = &config.params;
    params.validate()?;

    a.apply_transform();
    b.apply_transform();
    validate(a, kernel)?;
    validate(b, kernel)?;
    log::info!("outlines '{}' and '{}' are valid", a.name(), b.name());

    let min_edge = match (a.shortest_edge_length(), b.shortest_edge_length()) {
        (Some(ea), Some(eb)) => ea.min(eb),
        (Some(e), None) | (None, Some(e)) => e,
        (None, None) => 0.0,
    };

    let scale = align(a, b, kernel)?;
    log::info!("scaled '{}' by {:.6} to the width of '{}'", b.name(), scale, a.name());

    project(a, ViewSign::Positive, params, kernel)?;
    project(b, ViewSign::Negative, params, kernel)?;
    let depth = a.dimensions().y;
    log::info!("projected both outlines, depth {depth:.6}");

    kernel.boolean_intersect(a, std::mem::take(b))?;
    let threshold = min_edge * params.merge_factor;
    let merged = kernel.merge_by_distance(a, threshold)?;
    log::info!(
        "intersection has {} faces, {} vertices merged within {:.3e}",
        a.face_count(),
        merged,
        threshold
    );

    let contour = extract_contour(a)?;
    log::info!("contour has {} vertices", contour.len());

    build_tube(a, depth, config.cross_plane, params, kernel)?;
    let tube = std::mem::take(a);
    outlines.clear();
    log::info!("tube '{}' built with {} faces", tube.name(), tube.face_count());
    Ok(tube)
}
