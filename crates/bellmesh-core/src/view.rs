//! Read-only node snapshots for renderers and diagnostics.

use crate::discovery::NeighborEntry;
use crate::geometry::Position;
use crate::node::{MeshNode, NodeId, Role};

/// Owned snapshot of one node's routing state.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeView {
    pub id: NodeId,
    pub role: Role,
    pub position: Position,
    pub cost: f64,
    pub best_neighbor: Option<NodeId>,
    /// Candidate costs from the node's last step, in enumeration order.
    pub neighbor_costs: Vec<NeighborEntry>,
}

impl NodeView {
    /// Candidate cost of the chosen next hop.
    pub fn best_cost(&self) -> Option<f64> {
        let best = self.best_neighbor?;
        self.neighbor_costs.iter().find(|e| e.id == best).map(|e| e.cost)
    }
}

impl From<&MeshNode> for NodeView {
    fn from(node: &MeshNode) -> Self {
        Self {
            id: node.id(),
            role: node.role(),
            position: node.position().clone(),
            cost: node.cost(),
            best_neighbor: node.best_neighbor(),
            neighbor_costs: node.neighbors().iter().copied().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::RoutingParams;

    #[test]
    fn view_mirrors_node() {
        let params = RoutingParams::default();
        let all = vec![
            MeshNode::new(NodeId(0), Role::Gateway, Position::planar(0.0, 0.0)),
            MeshNode::new(NodeId(1), Role::Regular, Position::planar(10.0, 0.0)),
        ];
        let mut node = all[1].clone();
        node.step(&all, &params);

        let view = NodeView::from(&node);
        assert_eq!(view.id, NodeId(1));
        assert_eq!(view.role, Role::Regular);
        assert_eq!(view.position, Position::planar(10.0, 0.0));
        assert_eq!(view.cost, node.cost());
        assert_eq!(view.best_neighbor, Some(NodeId(0)));
        assert_eq!(view.neighbor_costs.len(), 1);
        assert_eq!(view.best_cost(), Some(node.cost()));
    }

    #[test]
    fn unrouted_view_has_no_best_cost() {
        let node = MeshNode::new(NodeId(3), Role::Regular, Position::planar(0.0, 0.0));
        let view = NodeView::from(&node);
        assert_eq!(view.best_neighbor, None);
        assert_eq!(view.best_cost(), None);
    }
}
