//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane (`None` for an empty node)
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! The node keeps its plane explicitly, so clipping away every coplanar
//! polygon does not erase the partition.

use super::plane::Plane;
use super::polygon::{Polygon, SplitResult};

/// A node in the BSP tree.
#[derive(Debug, Clone, Default)]
pub struct BspNode {
    plane: Option<Plane>,
    polygons: Vec<Polygon>,
    front: Option<Box<BspNode>>,
    back: Option<Box<BspNode>>,
}

impl BspNode {
    /// Builds a tree from polygons.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut node = Self::default();
        node.build(polygons);
        node
    }

    /// Adds polygons to the tree, splitting them by existing planes and
    /// growing new nodes where they fall outside every node.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        if polygons.is_empty() {
            return;
        }
        let plane = *self.plane.get_or_insert(*polygons[0].plane());

        let mut out = SplitResult::default();
        for poly in polygons {
            poly.split(&plane, &mut out);
        }
        self.polygons.append(&mut out.coplanar_front);
        self.polygons.append(&mut out.coplanar_back);

        if !out.front.is_empty() {
            self.front.get_or_insert_with(Default::default).build(out.front);
        }
        if !out.back.is_empty() {
            self.back.get_or_insert_with(Default::default).build(out.back);
        }
    }

    /// Turns solid space into empty space and vice versa.
    pub fn invert(&mut self) {
        for poly in &mut self.polygons {
            poly.flip();
        }
        self.plane = self.plane.map(|p| p.flip());
        if let Some(front) = self.front.as_mut() {
            front.invert();
        }
        if let Some(back) = self.back.as_mut() {
            back.invert();
        }
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// Removes the parts of `polygons` inside the solid of this tree.
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let Some(plane) = self.plane else {
            return polygons;
        };

        let mut out = SplitResult::default();
        for poly in polygons {
            poly.split(&plane, &mut out);
        }
        let mut front = out.front;
        front.append(&mut out.coplanar_front);
        let mut back = out.back;
        back.append(&mut out.coplanar_back);

        let mut result = match &self.front {
            Some(node) => node.clip_polygons(front),
            None => front,
        };
        if let Some(node) = &self.back {
            result.extend(node.clip_polygons(back));
        }
        result
    }

    /// Removes the parts of this tree's polygons inside `other`.
    pub fn clip_to(&mut self, other: &BspNode) {
        self.polygons = other.clip_polygons(std::mem::take(&mut self.polygons));
        if let Some(front) = self.front.as_mut() {
            front.clip_to(other);
        }
        if let Some(back) = self.back.as_mut() {
            back.clip_to(other);
        }
    }

    /// Collects every polygon in the tree.
    pub fn all_polygons(&self) -> Vec<Polygon> {
        let mut result = Vec::new();
        self.collect(&mut result);
        result
    }

    fn collect(&self, result: &mut Vec<Polygon>) {
        result.extend(self.polygons.iter().cloned());
        if let Some(front) = &self.front {
            front.collect(result);
        }
        if let Some(back) = &self.back {
            back.collect(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    fn triangle(z: f64) -> Polygon {
        Polygon::from_vertices(vec![
            DVec3::new(0.0, 0.0, z),
            DVec3::new(1.0, 0.0, z),
            DVec3::new(0.0, 1.0, z),
        ])
        .unwrap()
    }

    #[test]
    fn test_bsp_new_empty() {
        let tree = BspNode::new(vec![]);
        assert!(tree.all_polygons().is_empty());
        assert_eq!(tree.clip_polygons(vec![triangle(0.0)]).len(), 1);
    }

    #[test]
    fn test_bsp_keeps_all_polygons() {
        let tree = BspNode::new(vec![triangle(0.0), triangle(1.0), triangle(-1.0)]);
        assert_eq!(tree.all_polygons().len(), 3);
    }

    #[test]
    fn test_bsp_invert_flips_normals() {
        let mut tree = BspNode::new(vec![triangle(0.0)]);
        tree.invert();
        assert_eq!(tree.all_polygons()[0].plane().normal(), -DVec3::Z);
    }

    #[test]
    fn test_bsp_clip_front_survives() {
        let tree = BspNode::new(vec![triangle(0.0)]);
        assert_eq!(tree.clip_polygons(vec![triangle(1.0)]).len(), 1);
    }

    #[test]
    fn test_bsp_clip_back_removed() {
        let tree = BspNode::new(vec![triangle(0.0)]);
        assert!(tree.clip_polygons(vec![triangle(-1.0)]).is_empty());
    }

    #[test]
    fn test_bsp_plane_survives_clipping() {
        let mut tree = BspNode::new(vec![triangle(0.0)]);
        let other = BspNode::new(vec![triangle(5.0)]);
        tree.clip_to(&other);
        assert!(tree.all_polygons().is_empty());
        // The partition is still there
        assert!(tree.clip_polygons(vec![triangle(-1.0)]).is_empty());
    }
}
