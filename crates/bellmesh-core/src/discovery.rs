//! Neighbor discovery.
//!
//! Every step a node rebuilds its neighbor table from scratch by scanning
//! the whole node set. A candidate is admitted only if BOTH its raw
//! distance and its candidate cost are within `max_connect_distance`.
//! The two tests share a threshold but compare different quantities, so
//! either can reject on its own.

use crate::cost::candidate_cost_at;
use crate::geometry::distance;
use crate::node::{MeshNode, NodeId};
use crate::params::RoutingParams;

/// One admitted neighbor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborEntry {
    /// The neighbor, also its index in the node arena.
    pub id: NodeId,
    /// Candidate cost of routing through it this step.
    pub cost: f64,
}

/// Neighbors admitted during one step, in node-set enumeration order.
///
/// Serves as both the neighbor cost map and the neighbor reference map:
/// the id resolves to the node through the owning
/// [`Network`](crate::Network).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NeighborTable {
    entries: Vec<NeighborEntry>,
}

impl NeighborTable {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Candidate cost recorded for `id`, if it was admitted.
    pub fn get(&self, id: NodeId) -> Option<f64> {
        self.entries.iter().find(|e| e.id == id).map(|e| e.cost)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NeighborEntry> {
        self.entries.iter()
    }

    /// Admitted neighbor ids, in enumeration order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.entries.iter().map(|e| e.id)
    }

    /// Entries sorted by ascending candidate cost.
    ///
    /// The sort is stable, so equal costs keep enumeration order.
    pub fn ranked(&self) -> Vec<NeighborEntry> {
        let mut ranked = self.entries.clone();
        ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        ranked
    }

    /// Cheapest entry. Ties go to the entry enumerated first, which is the
    /// lowest node id.
    pub fn best(&self) -> Option<NeighborEntry> {
        self.entries
            .iter()
            .copied()
            .reduce(|best, e| if e.cost < best.cost { e } else { best })
    }

    /// Most expensive admitted candidate cost.
    pub fn max_cost(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.cost).reduce(f64::max)
    }

    fn push(&mut self, id: NodeId, cost: f64) {
        self.entries.push(NeighborEntry { id, cost });
    }
}

impl<'a> IntoIterator for &'a NeighborTable {
    type Item = &'a NeighborEntry;
    type IntoIter = std::slice::Iter<'a, NeighborEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Whether a candidate at `distance` with `cost` passes both admission tests.
#[inline]
pub fn admits(distance: f64, cost: f64, params: &RoutingParams) -> bool {
    cost <= params.max_connect_distance && distance <= params.max_connect_distance
}

/// Build `node`'s neighbor table against the full node set.
///
/// `node` itself is skipped by id. Reads only; nothing is mutated. An empty
/// node set yields an empty table.
pub fn discover(node: &MeshNode, all: &[MeshNode], params: &RoutingParams) -> NeighborTable {
    let mut table = NeighborTable::default();

    for other in all {
        if other.id() == node.id() {
            continue;
        }

        let d = distance(node.position(), other.position());
        let cost = candidate_cost_at(node.cost(), other.cost(), d, params);

        if admits(d, cost, params) {
            table.push(other.id(), cost);
        }
    }

    table
}
