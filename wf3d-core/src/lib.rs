/// WF3D Core Library - Rigid box geometry, local-axis motion and projection
///
/// This library holds everything the viewers share: the node and edge
/// store, the transform engine, the directions a box derives from its own
/// corners, the weak-perspective projection and the key table that turns
/// input into commands.

pub mod axes;
pub mod bindings;
pub mod body;
pub mod command;
pub mod corners;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod transform;

// Re-export commonly used types
pub use axes::SpinAxis;
pub use bindings::{parse_bindings, parse_command};
pub use body::RigidBox;
pub use command::{Command, Direction, Key, KeyMap, Spin};
pub use corners::{BoxCorners, Corner};
pub use error::{Error, Result};
pub use geometry::{box_edges, create_box, create_cube, Edge, Node, Wireframe};
pub use projection::{Frame, Projection, DEFAULT_DEPTH};
pub use transform::Transform;
