/// Local direction and spin axes derived from current corner positions
use nalgebra::{Point3, Unit, Vector3};
use tracing::trace;

use crate::command::{Direction, Spin};
use crate::corners::{BoxCorners, Corner};
use crate::error::{Error, Result};

/// A vector shorter than this fraction of the box size counts as zero.
const DEGENERATE_RATIO: f64 = 1e-12;

/// A line to spin about: it passes through `pivot` along `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAxis {
    pub pivot: Point3<f64>,
    pub axis: Unit<Vector3<f64>>,
}

impl BoxCorners {
    /// Outward unit normal of the face a direction moves towards.
    ///
    /// Each normal is the negated cross product of two edges leaving one
    /// corner of that face. The corner triples are fixed by the layout of
    /// [`Corner`]; with it every negation points out of the box.
    pub fn direction(&self, direction: Direction) -> Result<Unit<Vector3<f64>>> {
        use Corner::*;

        let (origin, p, q) = match direction {
            Direction::Forward => (FrontLeftBottom, FrontLeftTop, FrontRightBottom),
            Direction::Backward => (BackLeftBottom, BackRightBottom, BackLeftTop),
            Direction::Left => (BackLeftBottom, BackLeftTop, FrontLeftBottom),
            Direction::Right => (BackRightBottom, FrontRightBottom, BackRightTop),
            Direction::Up => (BackLeftTop, BackRightTop, FrontLeftTop),
            Direction::Down => (BackLeftBottom, FrontLeftBottom, BackRightBottom),
        };

        let o = self.get(origin);
        let cross = (self.get(p) - o).cross(&(self.get(q) - o));
        let scale = self.scale();
        let normal = unit(-cross, scale * scale, || format!("{direction:?} face normal"))?;

        trace!(?direction, normal = ?normal.into_inner(), "resolved direction");
        Ok(normal)
    }

    /// Line through the box center that a spin turns about.
    ///
    /// The pivot is the midpoint of a face diagonal leaving the
    /// back-left-bottom corner, and the axis is the box edge from that
    /// corner perpendicular to the face. Yaw turns about the top edge,
    /// pitch about the right edge and roll about the front edge.
    pub fn spin_axis(&self, spin: Spin) -> Result<SpinAxis> {
        let (diagonal_end, axis_end) = match spin {
            Spin::Yaw => (Corner::FrontRightBottom, Corner::BackLeftTop),
            Spin::Pitch => (Corner::FrontLeftTop, Corner::BackRightBottom),
            Spin::Roll => (Corner::BackRightTop, Corner::FrontLeftBottom),
        };

        let origin = self.back_left_bottom;
        let pivot = nalgebra::center(&origin, &self.get(diagonal_end));
        if !pivot.coords.iter().all(|c| c.is_finite()) {
            return Err(Error::DegenerateGeometry(format!(
                "{spin:?} pivot is not finite"
            )));
        }
        let axis = unit(self.get(axis_end) - origin, self.scale(), || {
            format!("{spin:?} axis")
        })?;

        trace!(?spin, %pivot, axis = ?axis.into_inner(), "resolved spin axis");
        Ok(SpinAxis { pivot, axis })
    }
}

/// Normalize `v`, failing when it is not finite or is negligible relative
/// to `scale`.
fn unit<F>(v: Vector3<f64>, scale: f64, what: F) -> Result<Unit<Vector3<f64>>>
where
    F: FnOnce() -> String,
{
    if !v.iter().all(|c| c.is_finite()) {
        return Err(Error::DegenerateGeometry(format!("{} is not finite", what())));
    }

    let min_norm = if scale.is_finite() { scale * DEGENERATE_RATIO } else { 0.0 };
    Unit::try_new(v, min_norm)
        .ok_or_else(|| Error::DegenerateGeometry(format!("{} has zero length", what())))
}
