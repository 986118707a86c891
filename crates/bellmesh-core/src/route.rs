//! Following best-neighbor links toward a gateway.
//!
//! Each node only knows its own next hop, and with smoothed costs the
//! chain can momentarily point in a circle, so traversal has to detect
//! loops rather than assume a tree.

use crate::node::NodeId;

/// Outcome of walking best-neighbor links from a node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Route {
    /// The walk ended at a gateway. `path` starts at the origin node and
    /// ends at the gateway.
    Reached { path: Vec<NodeId> },
    /// The walk ended at a node without a next hop.
    NoRoute { path: Vec<NodeId> },
    /// The walk revisited a node. `path` stops just before the repeat.
    Loop { path: Vec<NodeId> },
}

impl Route {
    /// Visited nodes, origin first.
    pub fn path(&self) -> &[NodeId] {
        match self {
            Route::Reached { path } | Route::NoRoute { path } | Route::Loop { path } => path,
        }
    }

    /// Hop count to the gateway, if one was reached.
    pub fn hops(&self) -> Option<usize> {
        match self {
            Route::Reached { path } => Some(path.len() - 1),
            _ => None,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Route::Reached { .. })
    }
}
