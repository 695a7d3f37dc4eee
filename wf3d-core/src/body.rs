/// A rigid box that moves and spins along its own axes
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::axes::SpinAxis;
use crate::command::{Command, Direction, Spin};
use crate::corners::BoxCorners;
use crate::error::{Error, Result};
use crate::geometry::{box_edges, create_box, Wireframe};
use crate::transform::Transform;

/// Exclusive owner of a box wireframe.
///
/// The corner layout is validated on construction and again after every
/// command, before the moved nodes replace the current ones. Nodes only move
/// through [`RigidBox::apply_command`] and friends, and every direction is
/// read off the current corners.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBox {
    wireframe: Wireframe,
}

impl RigidBox {
    /// Take ownership of a wireframe whose eight nodes follow the
    /// [`crate::corners::Corner`] layout.
    pub fn new(wireframe: Wireframe) -> Result<Self> {
        BoxCorners::from_wireframe(&wireframe)?.validate()?;
        Ok(Self { wireframe })
    }

    /// An axis-aligned box with the standard twelve edges.
    pub fn cuboid(center: Point3<f64>, size: Vector3<f64>) -> Result<Self> {
        let mut wireframe = Wireframe::new();
        wireframe.add_nodes(&create_box(center, size));
        wireframe.add_edges(box_edges())?;
        Self::new(wireframe)
    }

    pub fn cube(center: Point3<f64>, side: f64) -> Result<Self> {
        Self::cuboid(center, Vector3::repeat(side))
    }

    pub fn wireframe(&self) -> &Wireframe {
        &self.wireframe
    }

    pub fn corners(&self) -> Result<BoxCorners> {
        BoxCorners::from_wireframe(&self.wireframe)
    }

    pub fn apply_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Translate {
                direction,
                distance,
            } => self.translate(direction, distance),
            Command::Rotate { spin, angle } => self.rotate(spin, angle),
        }
    }

    /// Move every node `distance` units along the current `direction`.
    pub fn translate(&mut self, direction: Direction, distance: f64) -> Result<()> {
        if !distance.is_finite() {
            return Err(Error::Precondition(format!(
                "translation distance must be finite, got {distance}"
            )));
        }

        let offset = self.corners()?.direction(direction)?.into_inner() * distance;
        let mut moved = self.wireframe.clone();
        moved.apply(&Transform::translation_matrix(offset.x, offset.y, offset.z));
        self.commit(moved)?;

        debug!(?direction, distance, "translated");
        Ok(())
    }

    /// Turn every node `angle` radians about the current `spin` axis.
    pub fn rotate(&mut self, spin: Spin, angle: f64) -> Result<()> {
        if !angle.is_finite() {
            return Err(Error::Precondition(format!(
                "rotation angle must be finite, got {angle}"
            )));
        }

        let SpinAxis { pivot, axis } = self.corners()?.spin_axis(spin)?;
        let mut moved = self.wireframe.clone();
        moved.rotate_about_axis(&pivot, &axis, angle)?;
        self.commit(moved)?;

        debug!(?spin, angle, "rotated");
        Ok(())
    }

    /// Replace the nodes only if the moved box still has a valid layout.
    fn commit(&mut self, moved: Wireframe) -> Result<()> {
        BoxCorners::from_wireframe(&moved)?.validate()?;
        self.wireframe = moved;
        Ok(())
    }
}
