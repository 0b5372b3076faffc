//! # Pipeline Errors
//!
//! Every failure of the ambiguous object build. All of them are fatal: the
//! build stops at the first one and returns no partial tube.

use config::constants::ConfigError;
use mesh_kernel::KernelError;
use thiserror::Error;

/// Errors that can occur while building an ambiguous object.
///
/// The `Display` text is the reason shown to the user and names the outline
/// or vertex involved.
///
/// ## Example
///
/// ```rust
/// use ambiguous_object::AmbiguousError;
///
/// let err = AmbiguousError::NotSingleFace { outline: "Circle".into(), faces: 3 };
/// assert_eq!(err.to_string(), "Circle should have a single face, found 3");
/// assert_eq!(err.outline(), Some("Circle"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmbiguousError {
    /// The build needs exactly two outlines.
    #[error("2 outlines must be selected, got {count}")]
    WrongSelectionCount {
        /// Number of outlines supplied
        count: usize,
    },

    /// An outline has zero or several faces.
    #[error("{outline} should have a single face, found {faces}")]
    NotSingleFace {
        /// Outline name
        outline: String,
        /// Number of faces found
        faces: usize,
    },

    /// An outline's world transform is not centered on the origin.
    #[error("{outline} origin isn't at 0,0,0")]
    OriginNotCentered {
        /// Outline name
        outline: String,
    },

    /// An outline has a vertex above the ground plane.
    #[error("{outline} isn't flat: vertex {vertex} has z = {z}")]
    NotFlat {
        /// Outline name
        outline: String,
        /// Offending vertex index
        vertex: u32,
        /// Its z coordinate
        z: f64,
    },

    /// An outline's face does not cover the origin.
    #[error("{outline} doesn't include the origin")]
    OriginNotCovered {
        /// Outline name
        outline: String,
    },

    /// An outline has no extent along X, so widths cannot be matched.
    #[error("{outline} has zero width along X")]
    DegenerateWidth {
        /// Outline name
        outline: String,
    },

    /// The contour walk reached a vertex with nowhere to go.
    #[error("No connected vertex found from vertex {vertex} while building the tube contour")]
    NoConnectedVertex {
        /// Vertex where the walk stopped
        vertex: u32,
    },

    /// A geometry kernel operation failed.
    #[error("Geometry kernel error: {0}")]
    KernelOperationFailed(#[from] KernelError),

    /// The geometry parameters were rejected before anything was touched.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

impl AmbiguousError {
    /// Returns the name of the outline the error is about, if any.
    pub fn outline(&self) -> Option<&str> {
        match self {
            Self::NotSingleFace { outline, .. }
            | Self::OriginNotCentered { outline }
            | Self::NotFlat { outline, .. }
            | Self::OriginNotCovered { outline }
            | Self::DegenerateWidth { outline } => Some(outline),
            _ => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
