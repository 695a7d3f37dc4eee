/// Transform engine: translation matrices and arbitrary-axis rotation
use nalgebra::{Matrix4, Point3, Vector3};

use crate::error::{Error, Result};
use crate::geometry::Wireframe;

/// How far an axis length may drift from 1 before it is rejected.
pub const UNIT_TOLERANCE: f64 = 1e-9;

/// Transform builder for node rows
pub struct Transform;

impl Transform {
    /// Create a translation matrix.
    ///
    /// Nodes are row vectors, so the offset sits in the bottom row and a
    /// node `n` moves to `n * M`.
    pub fn translation_matrix(dx: f64, dy: f64, dz: f64) -> Matrix4<f64> {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            dx,  dy,  dz,  1.0,
        );
        matrix
    }

    /// Rotate `point` by `theta` radians about the line through `pivot`
    /// along the unit vector `axis`, right-handed.
    ///
    /// Closed form of the rotation about a line that need not pass through
    /// the origin; each output coordinate is computed independently from
    /// the input point.
    pub fn rotate_point(
        point: &Point3<f64>,
        pivot: &Point3<f64>,
        axis: &Vector3<f64>,
        theta: f64,
    ) -> Point3<f64> {
        let (a, b, c) = (pivot.x, pivot.y, pivot.z);
        let (u, v, w) = (axis.x, axis.y, axis.z);
        let (x, y, z) = (point.x, point.y, point.z);
        let (sin, cos) = theta.sin_cos();
        let versine = 1.0 - cos;
        let dot = u * x + v * y + w * z;

        Point3::new(
            (a * (v * v + w * w) - u * (b * v + c * w - dot)) * versine
                + x * cos
                + (-c * v + b * w - w * y + v * z) * sin,
            (b * (u * u + w * w) - v * (a * u + c * w - dot)) * versine
                + y * cos
                + (c * u - a * w + w * x - u * z) * sin,
            (c * (u * u + v * v) - w * (a * u + b * v - dot)) * versine
                + z * cos
                + (-b * u + a * v - v * x + u * y) * sin,
        )
    }

    /// Check that `axis` is a finite unit vector.
    pub fn check_unit_axis(axis: &Vector3<f64>) -> Result<()> {
        let norm = axis.norm();
        if !norm.is_finite() || (norm - 1.0).abs() > UNIT_TOLERANCE {
            return Err(Error::Precondition(format!(
                "rotation axis must be a unit vector, got length {norm}"
            )));
        }
        Ok(())
    }
}

impl Wireframe {
    /// Right-multiply every node row by `matrix`.
    pub fn apply(&mut self, matrix: &Matrix4<f64>) {
        for node in self.nodes_mut() {
            *node = *node * matrix;
        }
    }

    /// Rotate every node about the line through `pivot` along `axis`.
    ///
    /// Arguments are checked before any node moves, so an error leaves the
    /// wireframe as it was. `w` is never touched.
    pub fn rotate_about_axis(
        &mut self,
        pivot: &Point3<f64>,
        axis: &Vector3<f64>,
        theta: f64,
    ) -> Result<()> {
        Transform::check_unit_axis(axis)?;
        if !theta.is_finite() {
            return Err(Error::Precondition(format!(
                "rotation angle must be finite, got {theta}"
            )));
        }
        if !pivot.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::Precondition(format!(
                "rotation pivot must be finite, got {pivot}"
            )));
        }

        for node in self.nodes_mut() {
            let rotated =
                Transform::rotate_point(&Point3::new(node[0], node[1], node[2]), pivot, axis, theta);
            node[0] = rotated.x;
            node[1] = rotated.y;
            node[2] = rotated.z;
        }
        Ok(())
    }
}
