//! # Config Crate
//!
//! Centralized configuration constants for the ambiguous object pipeline.
//! Every magic number of the outline-to-tube construction is defined here so
//! the kernel and the pipeline agree on tolerances and proportions.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{GeometryParams, SMALL_DISTANCE, TUBE_EXTRUSION};
//!
//! // Flatness checks use SMALL_DISTANCE as the tolerance
//! let z: f64 = 0.0004;
//! assert!(z <= SMALL_DISTANCE);
//!
//! // Tunable proportions default to the constants
//! let params = GeometryParams::default();
//! assert_eq!(params.tube_extrusion, TUBE_EXTRUSION);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Validated Overrides**: `GeometryParams::new` rejects unusable values
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;

#[cfg(test)]
mod tests;
