//! # Vertex Welding
//!
//! Spatial hash used to collapse vertices that lie within a tolerance of
//! each other. Cells are one tolerance wide, so every candidate lies in the
//! 27 cells around the query point.

use glam::DVec3;
use std::collections::HashMap;

/// Incremental vertex welder.
///
/// Points are compared against the first point already stored within the
/// tolerance, so the result does not chain: two points farther apart than
/// the tolerance never end up welded through a third.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use mesh_kernel::ops::weld::VertexWelder;
///
/// let mut welder = VertexWelder::new(0.01);
/// let a = welder.weld(DVec3::ZERO);
/// let b = welder.weld(DVec3::new(0.005, 0.0, 0.0));
/// let c = welder.weld(DVec3::X);
/// assert_eq!(a, b);
/// assert_ne!(a, c);
/// assert_eq!(welder.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct VertexWelder {
    tolerance: f64,
    cell: f64,
    cache: HashMap<[i64; 3], Vec<u32>>,
    positions: Vec<DVec3>,
}

impl VertexWelder {
    /// Creates a welder merging points closer than `tolerance`.
    pub fn new(tolerance: f64) -> Self {
        let tolerance = if tolerance.is_finite() {
            tolerance.max(0.0)
        } else {
            0.0
        };
        Self {
            tolerance,
            cell: tolerance.max(f64::EPSILON),
            cache: HashMap::new(),
            positions: Vec::new(),
        }
    }

    fn key(&self, p: DVec3) -> [i64; 3] {
        let q = (p / self.cell).floor();
        [q.x as i64, q.y as i64, q.z as i64]
    }

    /// Returns the index of a stored point within the tolerance of `p`.
    pub fn find(&self, p: DVec3) -> Option<u32> {
        let [x, y, z] = self.key(p);
        let limit = self.tolerance * self.tolerance;
        let mut best: Option<u32> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = [x.saturating_add(dx), y.saturating_add(dy), z.saturating_add(dz)];
                    let Some(indices) = self.cache.get(&key) else {
                        continue;
                    };
                    for &i in indices {
                        if self.positions[i as usize].distance_squared(p) <= limit
                            && best.map_or(true, |b| i < b)
                        {
                            best = Some(i);
                        }
                    }
                }
            }
        }
        best
    }

    /// Stores `p` without looking for a match and returns its index.
    pub fn insert(&mut self, p: DVec3) -> u32 {
        let index = self.positions.len() as u32;
        let key = self.key(p);
        self.cache.entry(key).or_default().push(index);
        self.positions.push(p);
        index
    }

    /// Returns the index of a matching stored point, inserting `p` if
    /// there is none.
    pub fn weld(&mut self, p: DVec3) -> u32 {
        match self.find(p) {
            Some(i) => i,
            None => self.insert(p),
        }
    }

    /// Number of distinct stored points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Consumes the welder and returns the stored points in index order.
    pub fn into_positions(self) -> Vec<DVec3> {
        self.positions
    }
}
