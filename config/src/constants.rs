//! # Configuration Constants
//!
//! Centralized constants for the ambiguous object pipeline. Projection
//! proportions, tube proportions and precision values are defined here.
//!
//! ## Categories
//!
//! - **Projection**: Oblique viewing angle and prism extrusion
//! - **Tube**: Wall height and cross plane position
//! - **Precision**: Tolerances for flatness, merging and plane tests

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::fmt;

// =============================================================================
// PROJECTION CONSTANTS
// =============================================================================

/// Viewing elevation of both cameras, in radians.
///
/// Each outline is sheared by `cos(ROTATION)` on Y and then rotated by
/// `±ROTATION` about the global X axis.
///
/// # Example
///
/// ```rust
/// use config::constants::ROTATION;
///
/// assert!((ROTATION.cos() - ROTATION.sin()).abs() < 1e-12);
/// ```
pub const ROTATION: f64 = std::f64::consts::FRAC_PI_4;

/// Prism height of a projected outline, as a multiple of its Y depth.
///
/// # Example
///
/// ```rust
/// use config::constants::EXTRUSION_FACTOR;
///
/// let depth = 2.0;
/// assert_eq!(EXTRUSION_FACTOR * depth, 4.0);
/// ```
pub const EXTRUSION_FACTOR: f64 = 2.0;

// =============================================================================
// TUBE CONSTANTS
// =============================================================================

/// Tube wall height, as a multiple of the projected depth.
///
/// # Example
///
/// ```rust
/// use config::constants::{PLANE_POSITION, TUBE_EXTRUSION};
///
/// // The cross plane must cut through the wall
/// assert!(PLANE_POSITION < TUBE_EXTRUSION);
/// ```
pub const TUBE_EXTRUSION: f64 = 1.6;

/// Depth of the internal cross plane below the contour, as a multiple of the
/// projected depth.
pub const PLANE_POSITION: f64 = 1.2;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Merge distance after the boolean intersection, as a fraction of the
/// shortest outline edge.
///
/// # Example
///
/// ```rust
/// use config::constants::MERGE_FACTOR;
///
/// let shortest_edge = 0.5;
/// assert!((shortest_edge * MERGE_FACTOR - 0.005).abs() < 1e-12);
/// ```
pub const MERGE_FACTOR: f64 = 0.01;

/// Tolerance for outline flatness, origin coverage and the contour symmetry
/// test.
///
/// # Example
///
/// ```rust
/// use config::constants::SMALL_DISTANCE;
///
/// fn is_flat(z: f64) -> bool {
///     z <= SMALL_DISTANCE
/// }
///
/// assert!(is_flat(0.0005));
/// assert!(!is_flat(0.01));
/// ```
pub const SMALL_DISTANCE: f64 = 1e-3;

/// World origin. Outlines must be centered on it and cover it.
pub const ORIGIN: [f64; 3] = [0.0, 0.0, 0.0];

/// Plane classification tolerance for BSP splitting and bisection.
///
/// Matches the csg.js tolerance: points closer than this to a plane are
/// treated as lying on it.
pub const PLANE_EPSILON: f64 = 1e-5;

/// Distance under which boolean output vertices are treated as the same
/// point when the result mesh is assembled.
pub const WELD_EPSILON: f64 = 1e-9;

// =============================================================================
// GEOMETRY PARAMETERS
// =============================================================================

/// Tunable proportions of the construction.
///
/// Every field defaults to the constant of the same name, which reproduces
/// the classic ambiguous cylinder proportions.
///
/// # Examples
/// ```
/// use config::constants::{GeometryParams, ROTATION};
/// let params = GeometryParams::default();
/// assert_eq!(params.rotation, ROTATION);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryParams {
    /// Camera elevation in radians, strictly between 0 and π/2.
    pub rotation: f64,
    /// Prism height factor applied to the outline depth.
    pub extrusion_factor: f64,
    /// Tube wall height factor applied to the projected depth.
    pub tube_extrusion: f64,
    /// Cross plane depth factor applied to the projected depth.
    pub plane_position: f64,
    /// Merge threshold factor applied to the shortest outline edge.
    pub merge_factor: f64,
}

impl GeometryParams {
    /// Builds parameters enforcing strict validation of every factor.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeometryParams;
    /// let params = GeometryParams::new(0.5, 2.0, 1.6, 1.2, 0.01).expect("valid params");
    /// assert_eq!(params.rotation, 0.5);
    /// assert!(GeometryParams::new(0.0, 2.0, 1.6, 1.2, 0.01).is_err());
    /// ```
    pub fn new(
        rotation: f64,
        extrusion_factor: f64,
        tube_extrusion: f64,
        plane_position: f64,
        merge_factor: f64,
    ) -> Result<Self, ConfigError> {
        let params = Self {
            rotation,
            extrusion_factor,
            tube_extrusion,
            plane_position,
            merge_factor,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks an already built (for instance deserialized) parameter set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rotation.is_finite() && self.rotation > 0.0 && self.rotation < FRAC_PI_2) {
            return Err(ConfigError::InvalidRotation(self.rotation));
        }
        let factors = [
            ("extrusion_factor", self.extrusion_factor),
            ("tube_extrusion", self.tube_extrusion),
            ("plane_position", self.plane_position),
            ("merge_factor", self.merge_factor),
        ];
        for (name, value) in factors {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidFactor { name, value });
            }
        }
        Ok(())
    }
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            rotation: ROTATION,
            extrusion_factor: EXTRUSION_FACTOR,
            tube_extrusion: TUBE_EXTRUSION,
            plane_position: PLANE_POSITION,
            merge_factor: MERGE_FACTOR,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when the rotation is not strictly between 0 and π/2.
    InvalidRotation(f64),
    /// Raised when a proportional factor is zero, negative or not finite.
    InvalidFactor {
        /// Field name of the rejected factor.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidRotation(value) => {
                write!(f, "rotation must lie strictly between 0 and pi/2: {value}")
            }
            ConfigError::InvalidFactor { name, value } => {
                write!(f, "{name} must be positive and finite: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks if two f64 values are within `SMALL_DISTANCE` of each other.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0005));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < SMALL_DISTANCE
}
