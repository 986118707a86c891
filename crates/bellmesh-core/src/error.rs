//! Error types for bellmesh-core.

use thiserror::Error;

use crate::NodeId;

/// Result type for bellmesh-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or driving a mesh.
///
/// The routing step itself never fails; these only guard construction and
/// lookups so that malformed input is rejected before it reaches the sweep.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Two coordinate vectors of different length were combined.
    #[error("dimension mismatch: expected {expected} coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A position was empty or contained a non-finite coordinate.
    #[error("invalid position: {0}")]
    InvalidPosition(String),

    /// A routing parameter is out of its allowed range.
    #[error("invalid routing parameter `{name}`: {reason}")]
    InvalidParams { name: &'static str, reason: String },

    /// No node with this id exists in the network.
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
}
