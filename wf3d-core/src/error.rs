/// Error types for geometry, transforms and key bindings
use thiserror::Error;

/// Errors raised while building, moving or configuring a wireframe.
///
/// Every variant is a deterministic local failure: the operation that
/// produced it leaves the wireframe untouched.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A cross product or edge used to derive a direction has zero length.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Node count, corner layout or an argument violates a precondition.
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// An edge refers to a node that does not exist.
    #[error("edge ({a}, {b}) references a node outside 0..{node_count}")]
    EdgeIndex {
        a: usize,
        b: usize,
        node_count: usize,
    },

    /// A key binding line could not be parsed.
    #[error("binding line {line}: {message}")]
    Binding { line: usize, message: String },
}

/// Result type for wf3d operations.
pub type Result<T> = std::result::Result<T, Error>;
