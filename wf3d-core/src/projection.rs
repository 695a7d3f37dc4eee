/// Weak-perspective projection and the per-frame render feed
use nalgebra::{Point2, Point3};

use crate::error::{Error, Result};
use crate::geometry::{Edge, Node, Wireframe};

/// Default distance at which the perspective scale reaches zero.
pub const DEFAULT_DEPTH: f64 = 1000.0;

/// Fixed-center weak perspective.
///
/// Offsets from the screen center are scaled by `1 - z / depth`: nodes at
/// `z = 0` land on their own `(x, y)`, nodes with positive `z` shrink
/// towards the center, and nodes beyond `depth` flip through it. Nothing
/// is clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    center_x: f64,
    center_y: f64,
    depth: f64,
}

impl Projection {
    pub fn new(center_x: f64, center_y: f64, depth: f64) -> Result<Self> {
        if !(center_x.is_finite() && center_y.is_finite()) {
            return Err(Error::Precondition(format!(
                "projection center must be finite, got ({center_x}, {center_y})"
            )));
        }
        if !depth.is_finite() || depth == 0.0 {
            return Err(Error::Precondition(format!(
                "projection depth must be finite and non-zero, got {depth}"
            )));
        }

        Ok(Self {
            center_x,
            center_y,
            depth,
        })
    }

    /// Projection centered on a `width` x `height` viewport.
    pub fn centered(width: f64, height: f64, depth: f64) -> Result<Self> {
        Self::new(width / 2.0, height / 2.0, depth)
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.center_x, self.center_y)
    }

    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Screen position of a point.
    pub fn project(&self, point: &Point3<f64>) -> Point2<f64> {
        let scale = 1.0 - point.z / self.depth;
        Point2::new(
            self.center_x + (point.x - self.center_x) * scale,
            self.center_y + (point.y - self.center_y) * scale,
        )
    }

    /// Screen position of a node; `w` is ignored.
    pub fn project_node(&self, node: &Node) -> Point2<f64> {
        self.project(&Point3::new(node[0], node[1], node[2]))
    }

    /// Project every node of a wireframe for one frame.
    pub fn frame<'a>(&self, wireframe: &'a Wireframe) -> Frame<'a> {
        Frame {
            points: wireframe
                .nodes()
                .iter()
                .map(|node| self.project_node(node))
                .collect(),
            edges: wireframe.edges(),
        }
    }
}

/// What a renderer needs to draw one frame: the projected node positions
/// and the edges to connect them with.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    points: Vec<Point2<f64>>,
    edges: &'a [Edge],
}

impl<'a> Frame<'a> {
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    pub fn edges(&self) -> &'a [Edge] {
        self.edges
    }

    /// Each edge with the screen positions of its two ends.
    pub fn segments(&self) -> impl Iterator<Item = (Edge, Point2<f64>, Point2<f64>)> + '_ {
        // Edge indices were checked against the node count when added.
        self.edges
            .iter()
            .map(|edge| (*edge, self.points[edge.a], self.points[edge.b]))
    }
}
