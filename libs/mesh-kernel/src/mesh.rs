//! # Mesh Data Structure
//!
//! Polygon mesh stored as an arena of vertices, edges and faces addressed by
//! stable `u32` indices, plus a world transform.
//!
//! ## Invariants
//!
//! - Every edge and face index refers to an existing vertex
//! - `edges` is sorted and free of duplicates and self loops
//! - Every face boundary edge is present in `edges`
//! - Edges not used by any face ("wire" edges) are allowed
//!
//! Keeping the edge list sorted makes neighbor enumeration deterministic,
//! which the contour walk relies on when breaking ties.

use crate::error::{KernelError, KernelResult};
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

// =============================================================================
// EDGE
// =============================================================================

/// Undirected edge between two vertices, stored with the smaller index first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Edge([u32; 2]);

impl Edge {
    /// Creates an edge, normalizing the endpoint order.
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self([a, b])
        } else {
            Self([b, a])
        }
    }

    /// Returns both endpoints, smaller index first.
    #[inline]
    pub fn vertices(&self) -> [u32; 2] {
        self.0
    }

    /// Returns true if `vertex` is one of the endpoints.
    #[inline]
    pub fn contains(&self, vertex: u32) -> bool {
        self.0[0] == vertex || self.0[1] == vertex
    }

    /// Returns the endpoint opposite to `vertex`, if `vertex` is an endpoint.
    #[inline]
    pub fn other(&self, vertex: u32) -> Option<u32> {
        if self.0[0] == vertex {
            Some(self.0[1])
        } else if self.0[1] == vertex {
            Some(self.0[0])
        } else {
            None
        }
    }

    /// Returns true if both endpoints are the same vertex.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.0[0] == self.0[1]
    }
}

// =============================================================================
// FACE
// =============================================================================

/// Polygon face given by an ordered loop of vertex indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    vertices: Vec<u32>,
}

impl Face {
    /// Creates a face from an ordered vertex loop.
    pub fn new(vertices: Vec<u32>) -> Self {
        Self { vertices }
    }

    /// Returns the vertex loop.
    #[inline]
    pub fn vertices(&self) -> &[u32] {
        &self.vertices
    }

    /// Returns the number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Returns true if the face has no corners.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Iterates over the boundary as directed `(from, to)` pairs following
    /// the winding, including the closing pair.
    pub fn directed_edges(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Iterates over the boundary as undirected edges.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.directed_edges().map(|(a, b)| Edge::new(a, b))
    }

    /// Returns the face with opposite winding.
    pub fn reversed(&self) -> Face {
        let mut vertices = self.vertices.clone();
        vertices.reverse();
        Face { vertices }
    }

    /// Returns the face with every index shifted by `offset`.
    pub fn shifted(&self, offset: u32) -> Face {
        Face {
            vertices: self.vertices.iter().map(|v| v + offset).collect(),
        }
    }

    /// Computes the unit normal with Newell's method.
    ///
    /// Works for non-convex and slightly non-planar loops. Returns zero for
    /// degenerate faces.
    pub fn normal(&self, positions: &[DVec3]) -> DVec3 {
        let mut normal = DVec3::ZERO;
        for (a, b) in self.directed_edges() {
            let p = positions[a as usize];
            let q = positions[b as usize];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
        }
        normal.normalize_or_zero()
    }

    /// Computes the vertex average.
    pub fn centroid(&self, positions: &[DVec3]) -> DVec3 {
        if self.vertices.is_empty() {
            return DVec3::ZERO;
        }
        let sum: DVec3 = self.vertices.iter().map(|&v| positions[v as usize]).sum();
        sum / self.vertices.len() as f64
    }
}

// =============================================================================
// MESH
// =============================================================================

/// A named polygon mesh with a world transform.
///
/// Vertex coordinates are in object space until [`Mesh::apply_transform`]
/// bakes the transform into them.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::Mesh;
///
/// let mut mesh = Mesh::new("triangle");
/// let a = mesh.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = mesh.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = mesh.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// mesh.add_face(vec![a, b, c]).unwrap();
/// assert_eq!(mesh.edge_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    name: String,
    vertices: Vec<DVec3>,
    edges: Vec<Edge>,
    faces: Vec<Face>,
    transform: DMat4,
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new("")
    }
}

impl Mesh {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Creates an empty mesh with an identity transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            transform: DMat4::IDENTITY,
        }
    }

    /// Creates a single-face mesh from an ordered outline.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use mesh_kernel::Mesh;
    ///
    /// let mesh = Mesh::from_polygon("tri", &[DVec3::ZERO, DVec3::X, DVec3::Y]);
    /// assert_eq!(mesh.face_count(), 1);
    /// assert_eq!(mesh.edge_count(), 3);
    /// ```
    pub fn from_polygon(name: impl Into<String>, points: &[DVec3]) -> Self {
        let mut mesh = Self::new(name);
        mesh.vertices.extend_from_slice(points);
        if points.len() >= 3 {
            let face = Face::new((0..points.len() as u32).collect());
            mesh.rebuild(vec![face], Vec::new());
        }
        mesh
    }

    // =========================================================================
    // QUERY METHODS
    // =========================================================================

    /// Returns the mesh name used in diagnostics.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the mesh.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns the vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns the position of one vertex.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the sorted edge list.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the faces.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the world transform.
    #[inline]
    pub fn transform(&self) -> DMat4 {
        self.transform
    }

    /// Replaces the world transform without touching vertex coordinates.
    pub fn set_transform(&mut self, transform: DMat4) {
        self.transform = transform;
    }

    /// Finds the index of the edge joining `a` and `b`.
    pub fn edge_index(&self, a: u32, b: u32) -> Option<usize> {
        self.edges.binary_search(&Edge::new(a, b)).ok()
    }

    /// Counts, for every edge, how many faces use it.
    pub fn edge_face_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.edges.len()];
        for face in &self.faces {
            for edge in face.edges() {
                if let Ok(i) = self.edges.binary_search(&edge) {
                    counts[i] += 1;
                }
            }
        }
        counts
    }

    /// Builds the vertex → incident edge index.
    pub fn adjacency(&self) -> Adjacency {
        Adjacency::new(self)
    }

    // =========================================================================
    // MEASUREMENT
    // =========================================================================

    /// Computes the object-space axis-aligned bounding box.
    ///
    /// Returns (min, max) corners, or zero corners for an empty mesh.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertices[0];
        let mut max = self.vertices[0];

        for v in &self.vertices[1..] {
            min = min.min(*v);
            max = max.max(*v);
        }

        (min, max)
    }

    /// Computes the world-space bounds of the object-space bounding box by
    /// pushing its eight corners through the world transform.
    pub fn world_bounds(&self) -> (DVec3, DVec3) {
        let (lo, hi) = self.bounding_box();
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for i in 0..8 {
            let corner = DVec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            let world = self.transform.transform_point3(corner);
            min = min.min(world);
            max = max.max(world);
        }
        (min, max)
    }

    /// World-space size of the bounding box.
    pub fn dimensions(&self) -> DVec3 {
        let (min, max) = self.world_bounds();
        max - min
    }

    /// Length of the shortest edge, or `None` for a mesh without edges.
    pub fn shortest_edge_length(&self) -> Option<f64> {
        self.edges
            .iter()
            .map(|e| {
                let [a, b] = e.vertices();
                self.vertex(a).distance_squared(self.vertex(b))
            })
            .reduce(f64::min)
            .map(f64::sqrt)
    }

    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds an edge unless it already exists.
    pub fn add_edge(&mut self, a: u32, b: u32) -> KernelResult<()> {
        self.check_index(a)?;
        self.check_index(b)?;
        let edge = Edge::new(a, b);
        if edge.is_degenerate() {
            return Err(KernelError::DegenerateGeometry(format!(
                "edge from vertex {a} to itself"
            )));
        }
        self.insert_edge(edge);
        Ok(())
    }

    /// Adds a face together with its boundary edges and returns its index.
    pub fn add_face(&mut self, vertices: Vec<u32>) -> KernelResult<usize> {
        for &v in &vertices {
            self.check_index(v)?;
        }
        if vertices.len() < 3 {
            return Err(KernelError::DegenerateGeometry(format!(
                "face needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        let face = Face::new(vertices);
        for edge in face.edges() {
            if !edge.is_degenerate() {
                self.insert_edge(edge);
            }
        }
        self.faces.push(face);
        Ok(self.faces.len() - 1)
    }

    /// Splits face `face` along the chord joining its corners `a` and `b`.
    ///
    /// The half running from `a` to `b` in winding order replaces the face,
    /// the other half is appended, and the chord joins the edge list. Both
    /// halves keep the original winding.
    ///
    /// # Errors
    ///
    /// `InvalidIndex` if the face does not exist or `a` or `b` is not one
    /// of its corners, `DegenerateGeometry` if the corners are equal or
    /// adjacent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use mesh_kernel::Mesh;
    ///
    /// let mut quad = Mesh::from_polygon("quad", &[DVec3::ZERO, DVec3::X, DVec3::ONE, DVec3::Y]);
    /// quad.split_face(0, 0, 2).unwrap();
    /// assert_eq!(quad.face_count(), 2);
    /// assert!(quad.edge_index(0, 2).is_some());
    /// ```
    pub fn split_face(&mut self, face: usize, a: u32, b: u32) -> KernelResult<()> {
        let corners = self
            .faces
            .get(face)
            .ok_or_else(|| {
                KernelError::InvalidIndex(format!(
                    "face {} of mesh '{}' ({} faces)",
                    face,
                    self.name,
                    self.faces.len()
                ))
            })?
            .vertices();
        let corner = |v: u32| {
            corners.iter().position(|&c| c == v).ok_or_else(|| {
                KernelError::InvalidIndex(format!("vertex {v} is not a corner of face {face}"))
            })
        };
        let (i, j) = (corner(a)?, corner(b)?);
        let (i, j) = (i.min(j), i.max(j));
        let n = corners.len();
        if j - i < 2 || j - i > n - 2 {
            return Err(KernelError::DegenerateGeometry(format!(
                "corners {a} and {b} of face {face} are not opposite"
            )));
        }

        let first = corners[i..=j].to_vec();
        let mut second = corners[j..].to_vec();
        second.extend_from_slice(&corners[..=i]);
        self.faces[face] = Face::new(first);
        self.faces.push(Face::new(second));
        self.insert_edge(Edge::new(a, b));
        Ok(())
    }

    fn insert_edge(&mut self, edge: Edge) {
        if let Err(pos) = self.edges.binary_search(&edge) {
            self.edges.insert(pos, edge);
        }
    }

    fn check_index(&self, vertex: u32) -> KernelResult<()> {
        if (vertex as usize) < self.vertices.len() {
            Ok(())
        } else {
            Err(KernelError::InvalidIndex(format!(
                "vertex {} of mesh '{}' ({} vertices)",
                vertex,
                self.name,
                self.vertices.len()
            )))
        }
    }

    /// Replaces faces and edges. Edges are the face boundaries plus `wire`,
    /// sorted and deduplicated.
    pub(crate) fn rebuild(&mut self, faces: Vec<Face>, wire: Vec<Edge>) {
        let mut edges: Vec<Edge> = faces.iter().flat_map(|f| f.edges()).collect();
        edges.extend(wire);
        edges.retain(|e| !e.is_degenerate());
        edges.sort_unstable();
        edges.dedup();
        self.faces = faces;
        self.edges = edges;
    }

    /// Replaces the whole geometry at once.
    pub(crate) fn replace(&mut self, vertices: Vec<DVec3>, faces: Vec<Face>, wire: Vec<Edge>) {
        self.vertices = vertices;
        self.rebuild(faces, wire);
    }

    /// Renumbers vertices: old vertex `i` becomes `new_index[i]` and the new
    /// vertex array is `positions`. Several old vertices may share one new
    /// index; faces and edges collapsing as a result are cleaned up.
    pub(crate) fn reindex(&mut self, new_index: &[u32], positions: Vec<DVec3>) {
        let mut faces = Vec::with_capacity(self.faces.len());
        for face in &self.faces {
            let mut loop_: Vec<u32> = Vec::with_capacity(face.len());
            for &v in face.vertices() {
                let mapped = new_index[v as usize];
                if loop_.last() != Some(&mapped) {
                    loop_.push(mapped);
                }
            }
            while loop_.len() > 1 && loop_.first() == loop_.last() {
                loop_.pop();
            }
            if loop_.len() >= 3 {
                faces.push(Face::new(loop_));
            }
        }
        let wire = self
            .edges
            .iter()
            .map(|e| {
                let [a, b] = e.vertices();
                Edge::new(new_index[a as usize], new_index[b as usize])
            })
            .collect();
        self.vertices = positions;
        self.rebuild(faces, wire);
    }

    // =========================================================================
    // TRANSFORM OPERATIONS
    // =========================================================================

    /// Transforms all vertex positions by a 4x4 matrix.
    ///
    /// Mirroring matrices flip every face so normals keep pointing outward.
    pub fn transform_vertices(&mut self, matrix: &DMat4) {
        for v in &mut self.vertices {
            *v = matrix.transform_point3(*v);
        }
        if matrix.determinant() < 0.0 {
            for face in &mut self.faces {
                face.vertices.reverse();
            }
        }
    }

    /// Bakes the world transform into the vertices and resets it to identity.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::{DMat4, DVec3};
    /// use mesh_kernel::Mesh;
    ///
    /// let mut mesh = Mesh::from_polygon("tri", &[DVec3::ZERO, DVec3::X, DVec3::Y]);
    /// mesh.set_transform(DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0)));
    /// mesh.apply_transform();
    /// assert_eq!(mesh.vertex(0), DVec3::new(0.0, 0.0, 5.0));
    /// assert_eq!(mesh.transform(), DMat4::IDENTITY);
    /// ```
    pub fn apply_transform(&mut self) {
        if self.transform != DMat4::IDENTITY {
            let matrix = self.transform;
            self.transform_vertices(&matrix);
            self.transform = DMat4::IDENTITY;
        }
    }

    // =========================================================================
    // DELETION
    // =========================================================================

    /// Keeps the edges for which `keep` returns true.
    ///
    /// Faces using a removed edge are deleted with it, then vertices left
    /// without any edge are removed. Returns the number of removed edges.
    pub fn retain_edges<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize, &Edge) -> bool,
    {
        let mask: Vec<bool> = self
            .edges
            .iter()
            .enumerate()
            .map(|(i, e)| keep(i, e))
            .collect();
        let removed = mask.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }

        let edges = &self.edges;
        self.faces.retain(|face| {
            face.edges()
                .all(|e| edges.binary_search(&e).map(|i| mask[i]).unwrap_or(false))
        });
        let mut index = 0;
        self.edges.retain(|_| {
            let kept = mask[index];
            index += 1;
            kept
        });
        self.remove_loose_vertices();
        removed
    }

    /// Deletes every face, keeping their edges as wire edges.
    pub fn clear_faces(&mut self) {
        self.faces.clear();
    }

    /// Removes vertices that belong to no edge and no face.
    ///
    /// Returns the number of removed vertices.
    pub fn remove_loose_vertices(&mut self) -> usize {
        let mut used = vec![false; self.vertices.len()];
        for edge in &self.edges {
            for v in edge.vertices() {
                used[v as usize] = true;
            }
        }
        for face in &self.faces {
            for &v in face.vertices() {
                used[v as usize] = true;
            }
        }
        let removed = used.iter().filter(|u| !**u).count();
        if removed == 0 {
            return 0;
        }

        let mut new_index = vec![0u32; self.vertices.len()];
        let mut positions = Vec::with_capacity(self.vertices.len() - removed);
        for (i, &p) in self.vertices.iter().enumerate() {
            if used[i] {
                new_index[i] = positions.len() as u32;
                positions.push(p);
            }
        }
        self.reindex(&new_index, positions);
        removed
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Validates the index and edge list invariants.
    pub fn validate(&self) -> KernelResult<()> {
        for (i, edge) in self.edges.iter().enumerate() {
            for v in edge.vertices() {
                self.check_index(v)?;
            }
            if edge.is_degenerate() {
                return Err(KernelError::DegenerateGeometry(format!("edge {i} is a self loop")));
            }
            if i > 0 && self.edges[i - 1] >= *edge {
                return Err(KernelError::DegenerateGeometry(format!(
                    "edge list is not sorted and unique at edge {i}"
                )));
            }
        }
        for (i, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(KernelError::DegenerateGeometry(format!(
                    "face {} has {} vertices",
                    i,
                    face.len()
                )));
            }
            for &v in face.vertices() {
                self.check_index(v)?;
            }
            if let Some(missing) = face.edges().find(|e| self.edges.binary_search(e).is_err()) {
                return Err(KernelError::InvalidIndex(format!(
                    "face {} uses edge {:?} missing from the edge list",
                    i,
                    missing.vertices()
                )));
            }
        }
        Ok(())
    }
}

// =============================================================================
// ADJACENCY
// =============================================================================

/// Vertex → incident edge lookup, built once per mesh state.
#[derive(Debug, Clone)]
pub struct Adjacency {
    incident: Vec<Vec<usize>>,
}

impl Adjacency {
    /// Builds the lookup for the current edges of `mesh`.
    pub fn new(mesh: &Mesh) -> Self {
        let mut incident = vec![Vec::new(); mesh.vertex_count()];
        for (i, edge) in mesh.edges().iter().enumerate() {
            let [a, b] = edge.vertices();
            incident[a as usize].push(i);
            incident[b as usize].push(i);
        }
        Self { incident }
    }

    /// Indices of the edges touching `vertex`, in edge list order.
    pub fn incident_edges(&self, vertex: u32) -> &[usize] {
        self.incident
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Vertices joined to `vertex` by an edge, in edge list order.
    pub fn neighbors<'a>(&'a self, mesh: &'a Mesh, vertex: u32) -> impl Iterator<Item = u32> + 'a {
        self.incident_edges(vertex)
            .iter()
            .filter_map(move |&e| mesh.edges()[e].other(vertex))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Mesh {
        Mesh::from_polygon(
            "square",
            &[
                DVec3::new(-1.0, -1.0, 0.0),
                DVec3::new(1.0, -1.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(-1.0, 1.0, 0.0),
            ],
        )
    }

    #[test]
    fn test_edge_normalizes_order() {
        assert_eq!(Edge::new(3, 1), Edge::new(1, 3));
        assert_eq!(Edge::new(3, 1).vertices(), [1, 3]);
        assert_eq!(Edge::new(3, 1).other(3), Some(1));
        assert_eq!(Edge::new(3, 1).other(2), None);
    }

    #[test]
    fn test_from_polygon_builds_boundary_edges() {
        let mesh = unit_square();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.edge_count(), 4);
        assert_eq!(mesh.face_count(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_face_normal_ccw_points_up() {
        let mesh = unit_square();
        let n = mesh.faces()[0].normal(mesh.vertices());
        assert!((n - DVec3::Z).length() < 1e-12);
        assert!((mesh.faces()[0].reversed().normal(mesh.vertices()) + DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_add_face_rejects_bad_index() {
        let mut mesh = unit_square();
        assert!(matches!(
            mesh.add_face(vec![0, 1, 9]),
            Err(KernelError::InvalidIndex(_))
        ));
        assert!(matches!(
            mesh.add_face(vec![0, 1]),
            Err(KernelError::DegenerateGeometry(_))
        ));
    }

    #[test]
    fn test_add_edge_deduplicates() {
        let mut mesh = unit_square();
        mesh.add_edge(1, 0).unwrap();
        assert_eq!(mesh.edge_count(), 4);
        mesh.add_edge(0, 2).unwrap();
        assert_eq!(mesh.edge_count(), 5);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_apply_transform_resets_identity() {
        let mut mesh = unit_square();
        mesh.set_transform(DMat4::from_scale_rotation_translation(
            DVec3::splat(2.0),
            glam::DQuat::IDENTITY,
            DVec3::new(1.0, 0.0, 0.0),
        ));
        mesh.apply_transform();
        assert_eq!(mesh.transform(), DMat4::IDENTITY);
        let (min, max) = mesh.bounding_box();
        assert!((min.x - -1.0).abs() < 1e-12);
        assert!((max.x - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_world_bounds_use_transform() {
        let mut mesh = unit_square();
        mesh.set_transform(DMat4::from_translation(DVec3::new(5.0, 0.0, 0.0)));
        let (min, max) = mesh.world_bounds();
        assert!((min.x - 4.0).abs() < 1e-12);
        assert!((max.x - 6.0).abs() < 1e-12);
        assert!((mesh.dimensions().y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_mirror_flips_winding() {
        let mut mesh = unit_square();
        mesh.transform_vertices(&DMat4::from_scale(DVec3::new(-1.0, 1.0, 1.0)));
        let n = mesh.faces()[0].normal(mesh.vertices());
        assert!((n - DVec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_shortest_edge_length() {
        let mesh = Mesh::from_polygon(
            "tri",
            &[DVec3::ZERO, DVec3::new(0.5, 0.0, 0.0), DVec3::new(0.0, 3.0, 0.0)],
        );
        assert!((mesh.shortest_edge_length().unwrap() - 0.5).abs() < 1e-12);
        assert_eq!(Mesh::new("empty").shortest_edge_length(), None);
    }

    #[test]
    fn test_retain_edges_drops_faces_and_loose_vertices() {
        let mut mesh = unit_square();
        // Drop the edge 2-3: face goes away and all vertices stay connected
        let removed = mesh.retain_edges(|_, e| *e != Edge::new(2, 3));
        assert_eq!(removed, 1);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.edge_count(), 3);
        assert_eq!(mesh.vertex_count(), 4);

        // Keep only 1-2: vertices 0 and 3 become loose
        let removed = mesh.retain_edges(|_, e| *e == Edge::new(1, 2));
        assert_eq!(removed, 2);
        assert_eq!(mesh.vertex_count(), 2);
        assert_eq!(mesh.edges(), &[Edge::new(0, 1)]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_split_face_along_diagonal() {
        let mut mesh = unit_square();
        mesh.split_face(0, 2, 0).unwrap();
        assert_eq!(mesh.faces()[0].vertices(), &[0, 1, 2]);
        assert_eq!(mesh.faces()[1].vertices(), &[2, 3, 0]);
        assert_eq!(mesh.edge_count(), 5);
        for face in mesh.faces() {
            assert!((face.normal(mesh.vertices()) - DVec3::Z).length() < 1e-12);
        }
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_split_face_rejects_side_and_missing_corner() {
        let mut mesh = unit_square();
        assert!(matches!(
            mesh.split_face(0, 0, 1),
            Err(KernelError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            mesh.split_face(0, 0, 3),
            Err(KernelError::DegenerateGeometry(_))
        ));
        assert!(matches!(
            mesh.split_face(3, 0, 2),
            Err(KernelError::InvalidIndex(_))
        ));
        mesh.add_vertex(DVec3::ONE);
        assert!(matches!(
            mesh.split_face(0, 0, 4),
            Err(KernelError::InvalidIndex(_))
        ));
        assert_eq!(mesh.face_count(), 1);
    }

    #[test]
    fn test_adjacency_neighbors() {
        let mesh = unit_square();
        let adjacency = mesh.adjacency();
        let mut neighbors: Vec<u32> = adjacency.neighbors(&mesh, 0).collect();
        neighbors.sort_unstable();
        assert_eq!(neighbors, vec![1, 3]);
        assert!(adjacency.incident_edges(42).is_empty());
    }

    #[test]
    fn test_reindex_collapses_faces() {
        let mut mesh = unit_square();
        // Weld vertex 1 onto vertex 0: the quad becomes a triangle
        mesh.reindex(
            &[0, 0, 1, 2],
            vec![DVec3::new(-1.0, -1.0, 0.0), DVec3::new(1.0, 1.0, 0.0), DVec3::new(-1.0, 1.0, 0.0)],
        );
        assert_eq!(mesh.faces()[0].vertices(), &[0, 1, 2]);
        assert_eq!(mesh.edge_count(), 3);
        assert!(mesh.validate().is_ok());
    }
}
