//! Mesh participants.

use crate::discovery::{discover, NeighborTable};
use crate::geometry::Position;
use crate::params::{
    RoutingParams, GATEWAY_COST, GATEWAY_FLOOR, INITIAL_REGULAR_COST, REGULAR_FLOOR,
};
use crate::update::{update_cost, CostUpdate};

/// Unique node identifier.
///
/// Ids are handed out by [`Network`](crate::Network) in insertion order and
/// double as the node's index in the arena. Nodes are never removed, so an
/// id is never reused within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub u64);

impl NodeId {
    /// Arena index of this node.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Role of a node in the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Uplink anchor; cost pinned at zero, never steps.
    Gateway,
    /// Ordinary participant routing toward some gateway.
    Regular,
}

impl Role {
    /// Cost a node of this role is created with.
    pub const fn initial_cost(self) -> f64 {
        match self {
            Role::Gateway => GATEWAY_COST,
            Role::Regular => INITIAL_REGULAR_COST,
        }
    }

    /// Lower bound on cost when no neighbor is admitted (`inf_limit`).
    pub const fn floor(self) -> f64 {
        match self {
            Role::Gateway => GATEWAY_FLOOR,
            Role::Regular => REGULAR_FLOOR,
        }
    }

    /// Whether this is a gateway.
    pub const fn is_gateway(self) -> bool {
        matches!(self, Role::Gateway)
    }
}

/// A single mesh participant.
///
/// Position and role are fixed at creation. Cost, the neighbor table and
/// the best neighbor change only through [`MeshNode::apply`], and the
/// neighbor table is always replaced whole, never patched.
#[derive(Debug, Clone)]
pub struct MeshNode {
    id: NodeId,
    role: Role,
    position: Position,
    cost: f64,
    neighbors: NeighborTable,
    best_neighbor: Option<NodeId>,
}

impl MeshNode {
    /// Create a node with the initial cost for its role.
    pub fn new(id: NodeId, role: Role, position: Position) -> Self {
        Self {
            id,
            role,
            position,
            cost: role.initial_cost(),
            neighbors: NeighborTable::default(),
            best_neighbor: None,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Current advertised cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Neighbor table built during this node's last step.
    pub fn neighbors(&self) -> &NeighborTable {
        &self.neighbors
    }

    /// Chosen next hop from the last step, if any neighbor qualified.
    pub fn best_neighbor(&self) -> Option<NodeId> {
        self.best_neighbor
    }

    pub fn is_gateway(&self) -> bool {
        self.role.is_gateway()
    }

    /// Compute this node's next state against `all` without mutating
    /// anything: discovery followed by the cost update.
    ///
    /// Returns `None` for gateways, which never step.
    pub fn plan_step(&self, all: &[MeshNode], params: &RoutingParams) -> Option<CostUpdate> {
        if self.is_gateway() {
            return None;
        }
        let table = discover(self, all, params);
        Some(update_cost(self, table, all, params))
    }

    /// Install the result of [`MeshNode::plan_step`].
    ///
    /// Returns `true` when the best neighbor changed.
    pub fn apply(&mut self, update: CostUpdate) -> bool {
        debug_assert!(!self.is_gateway(), "gateways never take updates");
        let changed = self.best_neighbor != update.best_neighbor;
        self.cost = update.cost;
        self.best_neighbor = update.best_neighbor;
        self.neighbors = update.neighbors;
        changed
    }

    /// Advance this node by one step against `all`, the full node set.
    ///
    /// `all` may contain a (possibly stale) copy of this node; it is skipped
    /// by id. No-op for gateways.
    pub fn step(&mut self, all: &[MeshNode], params: &RoutingParams) -> bool {
        match self.plan_step(all, params) {
            Some(update) => self.apply(update),
            None => false,
        }
    }
}
