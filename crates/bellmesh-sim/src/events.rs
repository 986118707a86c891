//! Routing events and snapshots for a renderer.

use bellmesh_core::{NodeId, NodeView, Position, Role};
use serde::{Deserialize, Serialize};

/// Events that occur while the mesh routes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MeshEvent {
    /// A node was placed in the mesh
    NodeJoined {
        node: NodeId,
        role: Role,
        position: Position,
        tick: u64,
    },

    /// A node picked a new next hop
    RouteSelected {
        node: NodeId,
        next_hop: NodeId,
        cost: f64,
        tick: u64,
    },

    /// A node no longer admits any neighbor
    RouteLost { node: NodeId, cost: f64, tick: u64 },

    /// A full sweep finished
    SweepCompleted {
        tick: u64,
        routed: usize,
        unrouted: usize,
        route_changes: usize,
        max_cost_delta: f64,
    },
}

impl MeshEvent {
    /// Get the tick this event belongs to.
    pub fn tick(&self) -> u64 {
        match self {
            MeshEvent::NodeJoined { tick, .. } => *tick,
            MeshEvent::RouteSelected { tick, .. } => *tick,
            MeshEvent::RouteLost { tick, .. } => *tick,
            MeshEvent::SweepCompleted { tick, .. } => *tick,
        }
    }
}

/// A best-route edge, drawn from a node to its next hop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteEdge {
    pub from: NodeId,
    pub to: NodeId,
    /// Candidate cost through `to`
    pub cost: f64,
}

/// The routing state of the whole mesh at one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshSnapshot {
    pub tick: u64,
    pub nodes: Vec<NodeView>,
    pub routes: Vec<RouteEdge>,
    /// Largest admitted candidate cost anywhere, never below 1. Used to
    /// scale edge shading.
    pub max_link_cost: f64,
    pub routed_count: usize,
}

impl MeshSnapshot {
    /// Build a snapshot from node views.
    pub fn from_views(tick: u64, nodes: Vec<NodeView>) -> Self {
        let routes: Vec<_> = nodes
            .iter()
            .filter(|n| n.role == Role::Regular)
            .filter_map(|n| {
                Some(RouteEdge {
                    from: n.id,
                    to: n.best_neighbor?,
                    cost: n.best_cost()?,
                })
            })
            .collect();

        let max_link_cost = nodes
            .iter()
            .flat_map(|n| n.neighbor_costs.iter().map(|e| e.cost))
            .filter(|c| c.is_finite())
            .fold(1.0, f64::max);

        MeshSnapshot {
            tick,
            routed_count: routes.len(),
            nodes,
            routes,
            max_link_cost,
        }
    }

    /// Edge shade in [0, 1] for a link cost: 0 for the cheapest, 1 for
    /// `max_link_cost`.
    pub fn shade(&self, cost: f64) -> f64 {
        (cost / self.max_link_cost).clamp(0.0, 1.0)
    }
}
