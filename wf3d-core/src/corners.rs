/// Named corner roles of the box and their validation
use nalgebra::{Point3, Vector3};

use crate::error::{Error, Result};
use crate::geometry::Wireframe;

/// Relative slack allowed when checking that corners form a rectangular box.
pub const LAYOUT_TOLERANCE: f64 = 1e-6;

/// The role each node index plays in a box.
///
/// Index bits encode the role: bit 2 set is front, bit 1 set is right,
/// bit 0 set is top. This is the layout [`crate::geometry::create_box`]
/// produces, with front along +x, right along +y and top along +z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    BackLeftBottom = 0,
    BackLeftTop = 1,
    BackRightBottom = 2,
    BackRightTop = 3,
    FrontLeftBottom = 4,
    FrontLeftTop = 5,
    FrontRightBottom = 6,
    FrontRightTop = 7,
}

impl Corner {
    pub const ALL: [Corner; 8] = [
        Corner::BackLeftBottom,
        Corner::BackLeftTop,
        Corner::BackRightBottom,
        Corner::BackRightTop,
        Corner::FrontLeftBottom,
        Corner::FrontLeftTop,
        Corner::FrontRightBottom,
        Corner::FrontRightTop,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn is_front(self) -> bool {
        self.index() & 4 != 0
    }

    pub fn is_right(self) -> bool {
        self.index() & 2 != 0
    }

    pub fn is_top(self) -> bool {
        self.index() & 1 != 0
    }
}

/// Current positions of the eight box corners, by role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCorners {
    pub back_left_bottom: Point3<f64>,
    pub back_left_top: Point3<f64>,
    pub back_right_bottom: Point3<f64>,
    pub back_right_top: Point3<f64>,
    pub front_left_bottom: Point3<f64>,
    pub front_left_top: Point3<f64>,
    pub front_right_bottom: Point3<f64>,
    pub front_right_top: Point3<f64>,
}

impl BoxCorners {
    /// Read the corners of a wireframe by index.
    ///
    /// Only the node count is checked here; see [`BoxCorners::validate`]
    /// for the layout.
    pub fn from_wireframe(wireframe: &Wireframe) -> Result<Self> {
        if wireframe.node_count() != Corner::ALL.len() {
            return Err(Error::Precondition(format!(
                "a box needs exactly {} nodes, got {}",
                Corner::ALL.len(),
                wireframe.node_count()
            )));
        }

        let points: Vec<Point3<f64>> = wireframe.positions().collect();
        let at = |corner: Corner| points[corner.index()];

        Ok(Self {
            back_left_bottom: at(Corner::BackLeftBottom),
            back_left_top: at(Corner::BackLeftTop),
            back_right_bottom: at(Corner::BackRightBottom),
            back_right_top: at(Corner::BackRightTop),
            front_left_bottom: at(Corner::FrontLeftBottom),
            front_left_top: at(Corner::FrontLeftTop),
            front_right_bottom: at(Corner::FrontRightBottom),
            front_right_top: at(Corner::FrontRightTop),
        })
    }

    pub fn get(&self, corner: Corner) -> Point3<f64> {
        match corner {
            Corner::BackLeftBottom => self.back_left_bottom,
            Corner::BackLeftTop => self.back_left_top,
            Corner::BackRightBottom => self.back_right_bottom,
            Corner::BackRightTop => self.back_right_top,
            Corner::FrontLeftBottom => self.front_left_bottom,
            Corner::FrontLeftTop => self.front_left_top,
            Corner::FrontRightBottom => self.front_right_bottom,
            Corner::FrontRightTop => self.front_right_top,
        }
    }

    /// Edge from the back-left-bottom corner towards the front.
    pub fn front_edge(&self) -> Vector3<f64> {
        self.front_left_bottom - self.back_left_bottom
    }

    /// Edge from the back-left-bottom corner towards the right.
    pub fn right_edge(&self) -> Vector3<f64> {
        self.back_right_bottom - self.back_left_bottom
    }

    /// Edge from the back-left-bottom corner towards the top.
    pub fn top_edge(&self) -> Vector3<f64> {
        self.back_left_top - self.back_left_bottom
    }

    /// Length of the longest box edge.
    pub fn scale(&self) -> f64 {
        self.front_edge()
            .norm()
            .max(self.right_edge().norm())
            .max(self.top_edge().norm())
    }

    pub fn center(&self) -> Point3<f64> {
        let sum = Corner::ALL
            .iter()
            .fold(Vector3::zeros(), |acc, &corner| acc + self.get(corner).coords);
        Point3::from(sum / Corner::ALL.len() as f64)
    }

    /// Check that the corners form a right-handed rectangular box in the
    /// index layout of [`Corner`].
    ///
    /// Handedness matters: the face normals negate their cross products,
    /// which only points them outward when `right × top` runs along front.
    pub fn validate(&self) -> Result<()> {
        let finite = Corner::ALL
            .iter()
            .all(|&corner| self.get(corner).coords.iter().all(|c| c.is_finite()));
        if !finite {
            return Err(Error::Precondition(
                "box corners must have finite coordinates".to_string(),
            ));
        }

        let edges = [
            ("front", self.front_edge()),
            ("right", self.right_edge()),
            ("top", self.top_edge()),
        ];
        let scale = self.scale();
        for (name, edge) in &edges {
            if edge.norm() <= scale * LAYOUT_TOLERANCE {
                return Err(Error::Precondition(format!("{name} edge of the box has collapsed")));
            }
        }

        for i in 0..edges.len() {
            for j in i + 1..edges.len() {
                let (a_name, a) = &edges[i];
                let (b_name, b) = &edges[j];
                if a.dot(b).abs() > a.norm() * b.norm() * LAYOUT_TOLERANCE {
                    return Err(Error::Precondition(format!(
                        "{a_name} and {b_name} edges of the box are not perpendicular"
                    )));
                }
            }
        }

        for corner in Corner::ALL {
            let mut expected = self.back_left_bottom;
            if corner.is_front() {
                expected += self.front_edge();
            }
            if corner.is_right() {
                expected += self.right_edge();
            }
            if corner.is_top() {
                expected += self.top_edge();
            }

            if (self.get(corner) - expected).norm() > scale * LAYOUT_TOLERANCE {
                return Err(Error::Precondition(format!(
                    "node {} is not where the {:?} corner belongs",
                    corner.index(),
                    corner
                )));
            }
        }

        if self.right_edge().cross(&self.top_edge()).dot(&self.front_edge()) <= 0.0 {
            return Err(Error::Precondition(
                "box corners are left-handed; face normals would point inward".to_string(),
            ));
        }

        Ok(())
    }
}
