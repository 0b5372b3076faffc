//! # Mesh Operations
//!
//! Free functions behind [`crate::MeshKernel`]. Each one edits a mesh in
//! place or builds a new one, and leaves the mesh valid on success.

pub mod bisect;
pub mod boolean;
pub mod closest;
pub mod extrude;
pub mod merge;
pub mod triangulate;
pub mod weld;

pub use boolean::intersection;
