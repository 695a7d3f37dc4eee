/// Geometry store: homogeneous nodes and the edges between them
use std::fmt;

use nalgebra::{Point3, RowVector4, Vector3};

use crate::error::{Error, Result};

/// A node in homogeneous coordinates `(x, y, z, w)`.
///
/// Nodes are rows so that transforms right-multiply them, and `w` is 1
/// whenever no transform is in flight.
pub type Node = RowVector4<f64>;

/// An unordered pair of node indices drawn as one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

/// Node and edge storage for one rigid body.
///
/// Insertion order of nodes is significant: direction derivation reads
/// corners by index. Positions can only be changed from inside the crate,
/// by the transform engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wireframe {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Wireframe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append points, giving each a homogeneous `w` of 1.
    pub fn add_nodes(&mut self, points: &[Point3<f64>]) {
        self.nodes
            .extend(points.iter().map(|p| Node::new(p.x, p.y, p.z, 1.0)));
    }

    /// Append edges. The whole batch is rejected if any index does not name
    /// an existing node.
    pub fn add_edges<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let node_count = self.nodes.len();
        let batch: Vec<Edge> = pairs.into_iter().map(Edge::from).collect();

        if let Some(bad) = batch
            .iter()
            .find(|edge| edge.a >= node_count || edge.b >= node_count)
        {
            return Err(Error::EdgeIndex {
                a: bad.a,
                b: bad.b,
                node_count,
            });
        }

        self.edges.extend(batch);
        Ok(())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Cartesian position of a node, dropping `w`.
    pub fn position(&self, index: usize) -> Option<Point3<f64>> {
        self.nodes.get(index).map(to_point)
    }

    pub fn positions(&self) -> impl Iterator<Item = Point3<f64>> + '_ {
        self.nodes.iter().map(to_point)
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }
}

fn to_point(node: &Node) -> Point3<f64> {
    Point3::new(node[0], node[1], node[2])
}

impl fmt::Display for Wireframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, " --- Nodes --- ")?;
        for (i, node) in self.nodes.iter().enumerate() {
            writeln!(
                f,
                "   {}: ({}, {}, {})",
                i,
                node[0].trunc() as i64,
                node[1].trunc() as i64,
                node[2].trunc() as i64
            )?;
        }

        writeln!(f, " --- Edges --- ")?;
        for (i, edge) in self.edges.iter().enumerate() {
            writeln!(f, "   {}: {} -> {}", i, edge.a, edge.b)?;
        }
        Ok(())
    }
}

/// Corners of an axis-aligned box.
///
/// Index bits select the corner: bit 2 is +x, bit 1 is +y, bit 0 is +z.
/// [`crate::corners::Corner`] names the roles this layout gives each index.
pub fn create_box(center: Point3<f64>, size: Vector3<f64>) -> [Point3<f64>; 8] {
    let half = size / 2.0;

    std::array::from_fn(|i| {
        let sign = |bit: usize| if i & bit != 0 { 1.0 } else { -1.0 };
        center + Vector3::new(sign(4) * half.x, sign(2) * half.y, sign(1) * half.z)
    })
}

/// Corners of an axis-aligned cube with the given side length.
pub fn create_cube(center: Point3<f64>, side: f64) -> [Point3<f64>; 8] {
    create_box(center, Vector3::repeat(side))
}

/// The twelve edges of a box laid out by [`create_box`].
pub fn box_edges() -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = (0..4).map(|n| (n, n + 4)).collect();
    edges.extend((0..8).step_by(2).map(|n| (n, n + 1)));
    edges.extend([0, 1, 4, 5].into_iter().map(|n| (n, n + 2)));
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_add_nodes_appends_unit_w() {
        let mut wireframe = Wireframe::new();
        wireframe.add_nodes(&[Point3::new(1.0, 2.0, 3.0), Point3::new(-4.0, 5.0, 6.5)]);

        assert_eq!(wireframe.node_count(), 2);
        assert_eq!(wireframe.nodes()[1], Node::new(-4.0, 5.0, 6.5, 1.0));
        assert!(wireframe.nodes().iter().all(|n| n[3] == 1.0));
    }

    #[test]
    fn test_add_edges_rejects_whole_batch() {
        let mut wireframe = Wireframe::new();
        wireframe.add_nodes(&create_cube(Point3::origin(), 2.0));
        wireframe.add_edges([(0, 1)]).unwrap();

        let err = wireframe.add_edges([(1, 2), (3, 8)]).unwrap_err();
        assert_eq!(
            err,
            Error::EdgeIndex {
                a: 3,
                b: 8,
                node_count: 8
            }
        );
        assert_eq!(wireframe.edges(), &[Edge::new(0, 1)]);
    }

    #[test]
    fn test_create_cube_layout() {
        let corners = create_cube(Point3::new(500.0, 400.0, 0.0), 100.0);

        assert_eq!(corners[0], Point3::new(450.0, 350.0, -50.0));
        assert_eq!(corners[1], Point3::new(450.0, 350.0, 50.0));
        assert_eq!(corners[2], Point3::new(450.0, 450.0, -50.0));
        assert_eq!(corners[4], Point3::new(550.0, 350.0, -50.0));
        assert_eq!(corners[7], Point3::new(550.0, 450.0, 50.0));
    }

    #[test]
    fn test_box_edges_follow_box_sides() {
        let corners = create_box(Point3::origin(), Vector3::new(4.0, 2.0, 6.0));
        let edges = box_edges();
        assert_eq!(edges.len(), 12);

        for (a, b) in edges {
            let delta = corners[b] - corners[a];
            // Each edge runs along exactly one axis.
            let moved = delta.iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(moved, 1, "edge ({a}, {b})");
        }

        let mut seen = std::collections::HashSet::new();
        for (a, b) in box_edges() {
            assert!(seen.insert((a.min(b), a.max(b))));
        }
    }

    #[test]
    fn test_position_drops_w() {
        let mut wireframe = Wireframe::new();
        wireframe.add_nodes(&[Point3::new(0.5, -0.25, 8.0)]);

        let p = wireframe.position(0).unwrap();
        assert_relative_eq!(p, Point3::new(0.5, -0.25, 8.0));
        assert!(wireframe.position(1).is_none());
    }

    #[test]
    fn test_display_listing() {
        let mut wireframe = Wireframe::new();
        wireframe.add_nodes(&[Point3::new(450.0, 350.0, -50.0), Point3::new(1.9, 0.0, -0.7)]);
        wireframe.add_edges([(0, 1)]).unwrap();

        let listing = wireframe.to_string();
        assert_eq!(
            listing,
            " --- Nodes --- \n   0: (450, 350, -50)\n   1: (1, 0, 0)\n --- Edges --- \n   0: 0 -> 1\n"
        );
    }
}
