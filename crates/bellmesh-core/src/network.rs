//! The node arena and the sweep that drives it.
//!
//! A sweep is one iteration: every regular node runs discovery and the
//! cost update exactly once. Under [`UpdateDiscipline::GaussSeidel`] nodes
//! step in id order and read each other's live state, so a node late in
//! the order already sees costs updated earlier in the same sweep. The
//! numeric trajectory depends on that order, so steps are never reordered
//! or interleaved. [`UpdateDiscipline::Jacobi`] instead plans every node
//! against the pre-sweep state and applies all plans at the end.

use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::geometry::Position;
use crate::node::{MeshNode, NodeId, Role};
use crate::params::{RoutingParams, UpdateDiscipline};
use crate::route::Route;
use crate::update::CostUpdate;
use crate::view::NodeView;

/// Summary of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepReport {
    /// Tick number of the sweep just completed (first sweep is 1).
    pub tick: u64,
    /// Regular nodes holding a next hop after the sweep.
    pub routed: usize,
    /// Regular nodes without a next hop after the sweep.
    pub unrouted: usize,
    /// Regular nodes whose next hop changed during the sweep.
    pub route_changes: usize,
    /// Largest absolute cost change of any node during the sweep.
    pub max_cost_delta: f64,
}

impl SweepReport {
    /// No route changed and no cost moved by more than `epsilon`.
    pub fn is_settled(&self, epsilon: f64) -> bool {
        self.route_changes == 0 && self.max_cost_delta <= epsilon
    }
}

/// Owns every node of a mesh and advances them.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<MeshNode>,
    params: RoutingParams,
    discipline: UpdateDiscipline,
    tick: u64,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Empty network with default parameters.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            params: RoutingParams::default(),
            discipline: UpdateDiscipline::default(),
            tick: 0,
        }
    }

    /// Empty network with the given parameters.
    pub fn with_params(params: RoutingParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            ..Self::new()
        })
    }

    /// Set the sweep discipline.
    #[must_use]
    pub fn with_discipline(mut self, discipline: UpdateDiscipline) -> Self {
        self.discipline = discipline;
        self
    }

    pub fn params(&self) -> &RoutingParams {
        &self.params
    }

    pub fn discipline(&self) -> UpdateDiscipline {
        self.discipline
    }

    /// Number of completed sweeps.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of gateways.
    pub fn gateway_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_gateway()).count()
    }

    /// Add a node and return its id.
    ///
    /// Every node must share the dimension of the first one added.
    pub fn add_node(&mut self, role: Role, position: impl Into<Position>) -> Result<NodeId> {
        let position: Position = position.into();
        position.validate()?;
        if let Some(first) = self.nodes.first() {
            let expected = first.position().dimension();
            if position.dimension() != expected {
                return Err(Error::DimensionMismatch {
                    expected,
                    actual: position.dimension(),
                });
            }
        }

        let id = NodeId(self.nodes.len() as u64);
        self.nodes.push(MeshNode::new(id, role, position));
        Ok(id)
    }

    /// Add a gateway.
    pub fn add_gateway(&mut self, position: impl Into<Position>) -> Result<NodeId> {
        self.add_node(Role::Gateway, position)
    }

    /// Add a regular node.
    pub fn add_regular(&mut self, position: impl Into<Position>) -> Result<NodeId> {
        self.add_node(Role::Regular, position)
    }

    pub fn node(&self, id: NodeId) -> Option<&MeshNode> {
        self.nodes.get(id.index())
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[MeshNode] {
        &self.nodes
    }

    /// Snapshot of one node.
    pub fn inspect(&self, id: NodeId) -> Option<NodeView> {
        self.node(id).map(NodeView::from)
    }

    /// Snapshots of every node in id order.
    pub fn views(&self) -> Vec<NodeView> {
        self.nodes.iter().map(NodeView::from).collect()
    }

    /// Advance a single node against the live node set.
    ///
    /// Returns whether its next hop changed. Gateways are a no-op.
    pub fn step(&mut self, id: NodeId) -> Result<bool> {
        let index = self.index_of(id)?;
        Ok(self.step_index(index).is_some_and(|(changed, _)| changed))
    }

    /// Run one full sweep using the configured discipline.
    pub fn sweep(&mut self) -> SweepReport {
        if self.tick == 0 && !self.nodes.is_empty() && self.gateway_count() == 0 {
            warn!("mesh has no gateway; regular nodes will never acquire a route");
        }

        let mut report = SweepReport::default();
        match self.discipline {
            UpdateDiscipline::GaussSeidel => {
                for index in 0..self.nodes.len() {
                    if let Some((changed, delta)) = self.step_index(index) {
                        record(&mut report, changed, delta);
                    }
                }
            }
            UpdateDiscipline::Jacobi => {
                let plans: Vec<(usize, CostUpdate)> = self
                    .nodes
                    .iter()
                    .enumerate()
                    .filter_map(|(i, n)| n.plan_step(&self.nodes, &self.params).map(|u| (i, u)))
                    .collect();
                for (index, update) in plans {
                    let (changed, delta) = self.apply_at(index, update);
                    record(&mut report, changed, delta);
                }
            }
        }

        self.tick += 1;
        report.tick = self.tick;
        for node in self.nodes.iter().filter(|n| !n.is_gateway()) {
            if node.best_neighbor().is_some() {
                report.routed += 1;
            } else {
                report.unrouted += 1;
            }
        }

        debug!(
            tick = report.tick,
            routed = report.routed,
            unrouted = report.unrouted,
            route_changes = report.route_changes,
            max_cost_delta = report.max_cost_delta,
            "sweep complete"
        );
        report
    }

    /// Run `ticks` sweeps and return the last report.
    pub fn run(&mut self, ticks: u64) -> Option<SweepReport> {
        (0..ticks).map(|_| self.sweep()).last()
    }

    /// Follow best-neighbor links from `id` until a gateway, a dead end,
    /// or a repeat.
    pub fn route_to_gateway(&self, id: NodeId) -> Result<Route> {
        let mut current = self.node(id).ok_or(Error::UnknownNode(id))?;
        let mut visited = vec![false; self.nodes.len()];
        let mut path = Vec::new();

        loop {
            visited[current.id().index()] = true;
            path.push(current.id());

            if current.is_gateway() {
                return Ok(Route::Reached { path });
            }
            let Some(next) = current.best_neighbor().and_then(|n| self.node(n)) else {
                return Ok(Route::NoRoute { path });
            };
            if visited[next.id().index()] {
                return Ok(Route::Loop { path });
            }
            current = next;
        }
    }

    fn index_of(&self, id: NodeId) -> Result<usize> {
        if id.index() < self.nodes.len() {
            Ok(id.index())
        } else {
            Err(Error::UnknownNode(id))
        }
    }

    fn step_index(&mut self, index: usize) -> Option<(bool, f64)> {
        let update = self.nodes[index].plan_step(&self.nodes, &self.params)?;
        Some(self.apply_at(index, update))
    }

    fn apply_at(&mut self, index: usize, update: CostUpdate) -> (bool, f64) {
        let node = &mut self.nodes[index];
        let before = node.cost();
        let changed = node.apply(update);
        if changed {
            trace!(
                node = %node.id(),
                next_hop = ?node.best_neighbor(),
                cost = node.cost(),
                "best route changed"
            );
        }
        (changed, (node.cost() - before).abs())
    }
}

fn record(report: &mut SweepReport, changed: bool, delta: f64) {
    if changed {
        report.route_changes += 1;
    }
    report.max_cost_delta = report.max_cost_delta.max(delta);
}
