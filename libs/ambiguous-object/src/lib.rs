//! # Ambiguous Object
//!
//! Builds a Sugihara-style ambiguous object: a tube whose top edge looks
//! like outline A from one oblique viewpoint and like outline B from the
//! opposite one.
//!
//! ## Architecture
//!
//! ```text
//! validate → align → project (×2) → [kernel: intersect, merge]
//!          → contour → tube (+ optional cross plane)
//! ```
//!
//! Mesh edits are delegated to a [`GeometryKernel`]; [`MeshKernel`] is the
//! bundled implementation.
//!
//! ## Usage
//!
//! ```rust
//! use ambiguous_object::{build, AmbiguousError, PipelineConfig};
//! use glam::DVec3;
//! use mesh_kernel::{Mesh, MeshKernel};
//!
//! let square = Mesh::from_polygon("Square", &[
//!     DVec3::new(-1.0, -1.0, 0.0),
//!     DVec3::new(1.0, -1.0, 0.0),
//!     DVec3::new(1.0, 1.0, 0.0),
//!     DVec3::new(-1.0, 1.0, 0.0),
//! ]);
//! let mut outlines = vec![square];
//! let result = build(&mut outlines, &MeshKernel, &PipelineConfig::default());
//! assert_eq!(result, Err(AmbiguousError::WrongSelectionCount { count: 1 }));
//! ```
//!
//! ## Reporting
//!
//! Progress is logged through the `log` facade (`info` per stage, `debug`
//! for numbers) and every failure reason at `error` level. No logger is
//! installed here.

pub mod align;
pub mod contour;
pub mod error;
pub mod pipeline;
pub mod project;
pub mod tube;
pub mod validate;

pub use contour::Contour;
pub use error::AmbiguousError;
pub use mesh_kernel::{GeometryKernel, MeshKernel};
pub use pipeline::{build, PipelineConfig};
pub use project::ViewSign;
