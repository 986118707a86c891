//! Cost update and best-route selection.
//!
//! Given a freshly built neighbor table:
//!
//! 1. Floor: `max(min(own cost, neighbors' advertised costs), inf_limit)`.
//! 2. If any neighbor was admitted, the cheapest candidate becomes the best
//!    neighbor and its candidate cost overwrites the floor.
//! 3. Otherwise the floor stands and the node has no route.
//!
//! The floor therefore only decides the cost of isolated nodes. A node that
//! loses every neighbor keeps its cost (clamped to the floor) instead of
//! spiking, and has no next hop until something is admitted again.

use crate::discovery::NeighborTable;
use crate::node::{MeshNode, NodeId};
use crate::params::{RecoveryPolicy, RoutingParams};

/// Result of one node step, ready to be applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CostUpdate {
    /// New advertised cost.
    pub cost: f64,
    /// Chosen next hop, `None` when no neighbor was admitted.
    pub best_neighbor: Option<NodeId>,
    /// The neighbor table the decision was made from.
    pub neighbors: NeighborTable,
}

/// Compute the cost update for `node` from its neighbor table.
///
/// `all` is the node set the table was discovered against; it is used to
/// read the neighbors' advertised costs for the floor.
pub fn update_cost(
    node: &MeshNode,
    neighbors: NeighborTable,
    all: &[MeshNode],
    params: &RoutingParams,
) -> CostUpdate {
    let prior = node.cost();

    let lowest = neighbors
        .ids()
        .filter_map(|id| lookup(all, id))
        .map(MeshNode::cost)
        .fold(prior, f64::min);
    let floor = lowest.max(node.role().floor());

    let Some(best) = neighbors.best() else {
        return CostUpdate {
            cost: floor,
            best_neighbor: None,
            neighbors,
        };
    };

    let cost = match params.recovery {
        RecoveryPolicy::Faithful => best.cost,
        RecoveryPolicy::PenalizeRegression { penalty } if best.cost > prior => {
            (1.0 - params.alpha) * penalty + params.alpha * best.cost
        }
        RecoveryPolicy::PenalizeRegression { .. } => best.cost,
    };

    CostUpdate {
        cost,
        best_neighbor: Some(best.id),
        neighbors,
    }
}

/// Resolve `id` in `all`, using the arena index first.
pub(crate) fn lookup(all: &[MeshNode], id: NodeId) -> Option<&MeshNode> {
    match all.get(id.index()) {
        Some(n) if n.id() == id => Some(n),
        _ => all.iter().find(|n| n.id() == id),
    }
}
