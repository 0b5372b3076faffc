//! # Kernel Errors
//!
//! Error types for mesh editing operations. All errors are explicit and
//! carry enough context to identify the offending element.

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during geometry kernel operations.
///
/// ## Example
///
/// ```rust
/// use mesh_kernel::{KernelError, Mesh};
///
/// let mut mesh = Mesh::new("broken");
/// match mesh.add_face(vec![0, 1, 2]) {
///     Err(KernelError::InvalidIndex(msg)) => assert!(msg.contains("vertex 0")),
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// An element references a vertex that does not exist.
    #[error("Index out of bounds: {0}")]
    InvalidIndex(String),

    /// Input geometry cannot support the requested operation.
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Error during boolean operation.
    #[error("Boolean operation '{operation}' failed: {message}")]
    BooleanFailed {
        /// Name of the boolean operation
        operation: String,
        /// Error message
        message: String,
    },

    /// A face could not be split into triangles.
    #[error("Triangulation failed: {0}")]
    TriangulationFailed(String),
}

// =============================================================================
// RESULT TYPE ALIAS
// =============================================================================

/// Result type alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

// =============================================================================
// TESTS
// =============================================================================
