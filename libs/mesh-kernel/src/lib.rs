//! # Mesh Kernel
//!
//! Polygon mesh model and the geometry kernel used by the ambiguous object
//! pipeline.
//!
//! ## Architecture
//!
//! ```text
//! Mesh (vertex/edge/face arena) → GeometryKernel (in-place edits) → Mesh
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust:
//! - **Boolean Intersection**: BSP trees (csg.js algorithm)
//! - **Triangulation**: Ear clipping via `earcutr` for non-convex faces
//! - **Extrusion**: Region extrusion for faces, edge extrusion for wires
//! - **Bisection**: Plane cut with optional cap fill
//! - **Welding**: Spatial hash merge by distance
//!
//! ## Usage
//!
//! ```rust
//! use glam::DVec3;
//! use mesh_kernel::{GeometryKernel, Mesh, MeshKernel};
//!
//! let mut square = Mesh::from_polygon("square", &[
//!     DVec3::new(-1.0, -1.0, 0.0),
//!     DVec3::new(1.0, -1.0, 0.0),
//!     DVec3::new(1.0, 1.0, 0.0),
//!     DVec3::new(-1.0, 1.0, 0.0),
//! ]);
//! MeshKernel.extrude(&mut square, DVec3::Z).unwrap();
//! assert_eq!(square.face_count(), 6);
//! ```

pub mod error;
pub mod kernel;
pub mod mesh;
pub mod ops;

pub use error::{KernelError, KernelResult};
pub use kernel::{GeometryKernel, MeshKernel, SurfaceHit};
pub use mesh::{Adjacency, Edge, Face, Mesh};
