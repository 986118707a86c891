//! Mesh routing simulation with event recording.

use bellmesh_core::{Network, NodeId, Position, Role, Route, SweepReport};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::events::{MeshEvent, MeshSnapshot};
use crate::layout;

/// How many regular nodes currently reach a gateway by following next hops.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Reachability {
    pub reached: usize,
    pub no_route: usize,
    pub looped: usize,
    /// Mean hop count over nodes that reach a gateway
    pub mean_hops: f64,
}

/// Drives a mesh tick by tick and records what changes.
///
/// Events accumulate until [`Simulation::take_events`] drains them. Long
/// runs should drain periodically.
pub struct Simulation {
    config: SimulationConfig,
    network: Network,
    events: Vec<MeshEvent>,
}

impl Simulation {
    /// Lay out a random mesh from the configuration.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let placements = layout::generate(&config.layout, &mut rng)?;

        let mut sim = Self::empty(config)?;
        for (role, position) in placements {
            sim.add_node(role, position)?;
        }

        info!(
            nodes = sim.network.len(),
            gateways = sim.network.gateway_count(),
            seed = sim.config.seed,
            "mesh laid out"
        );
        Ok(sim)
    }

    /// A simulation with no nodes, for hand-built meshes.
    pub fn empty(config: SimulationConfig) -> Result<Self> {
        let network = Network::with_params(config.params)?.with_discipline(config.discipline);
        Ok(Self {
            config,
            network,
            events: Vec::new(),
        })
    }

    /// Place a node.
    pub fn add_node(&mut self, role: Role, position: impl Into<Position>) -> Result<NodeId> {
        let position = position.into();
        let node = self.network.add_node(role, position.clone())?;
        self.events.push(MeshEvent::NodeJoined {
            node,
            role,
            position,
            tick: self.network.tick(),
        });
        Ok(node)
    }

    /// Run one sweep and record route changes.
    pub fn advance(&mut self) -> SweepReport {
        let before: Vec<Option<NodeId>> = self
            .network
            .nodes()
            .iter()
            .map(|n| n.best_neighbor())
            .collect();

        let report = self.network.sweep();

        for (node, previous) in self.network.nodes().iter().zip(before) {
            match (previous, node.best_neighbor()) {
                (old, Some(next)) if old != Some(next) => {
                    self.events.push(MeshEvent::RouteSelected {
                        node: node.id(),
                        next_hop: next,
                        cost: node.cost(),
                        tick: report.tick,
                    });
                }
                (Some(_), None) => {
                    self.events.push(MeshEvent::RouteLost {
                        node: node.id(),
                        cost: node.cost(),
                        tick: report.tick,
                    });
                }
                _ => {}
            }
        }

        self.events.push(MeshEvent::SweepCompleted {
            tick: report.tick,
            routed: report.routed,
            unrouted: report.unrouted,
            route_changes: report.route_changes,
            max_cost_delta: report.max_cost_delta,
        });
        report
    }

    /// Run `ticks` sweeps and return the last report.
    pub fn run(&mut self, ticks: u64) -> Option<SweepReport> {
        (0..ticks).map(|_| self.advance()).last()
    }

    /// Sweep until routes stop changing and costs move by at most the
    /// configured epsilon. Returns the tick that settled, or `None` if
    /// `max_ticks` ran out first.
    pub fn run_until_converged(&mut self, max_ticks: u64) -> Option<u64> {
        for _ in 0..max_ticks {
            let report = self.advance();
            if report.is_settled(self.config.convergence_epsilon) {
                info!(tick = report.tick, routed = report.routed, "mesh converged");
                return Some(report.tick);
            }
        }
        warn!(max_ticks, "mesh did not converge");
        None
    }

    /// Walk next hops from `node` toward a gateway.
    pub fn route(&self, node: NodeId) -> Result<Route> {
        Ok(self.network.route_to_gateway(node)?)
    }

    /// Route outcome for every regular node.
    pub fn reachability(&self) -> Result<Reachability> {
        let mut stats = Reachability::default();
        let mut total_hops = 0usize;

        for node in self.network.nodes().iter().filter(|n| !n.is_gateway()) {
            match self.network.route_to_gateway(node.id())? {
                Route::Reached { path } => {
                    stats.reached += 1;
                    total_hops += path.len() - 1;
                }
                Route::NoRoute { .. } => stats.no_route += 1,
                Route::Loop { .. } => stats.looped += 1,
            }
        }

        if stats.reached > 0 {
            stats.mean_hops = total_hops as f64 / stats.reached as f64;
        }
        Ok(stats)
    }

    /// Get a snapshot of the mesh at the current tick.
    pub fn snapshot(&self) -> MeshSnapshot {
        MeshSnapshot::from_views(self.network.tick(), self.network.views())
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Get all recorded events.
    pub fn events(&self) -> &[MeshEvent] {
        &self.events
    }

    /// Remove and return every event recorded since the last drain.
    pub fn take_events(&mut self) -> Vec<MeshEvent> {
        std::mem::take(&mut self.events)
    }

    /// Get the number of events recorded.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Get the number of nodes in the mesh.
    pub fn node_count(&self) -> usize {
        self.network.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutConfig;

    fn small_config() -> SimulationConfig {
        SimulationConfig::default().with_layout(LayoutConfig::new(420.0, 420.0))
    }

    #[test]
    fn simulation_lays_out_nodes() {
        let sim = Simulation::new(small_config()).unwrap();
        assert_eq!(sim.node_count(), 36);
        assert_eq!(sim.network().gateway_count(), 1);

        let joins = sim
            .events()
            .iter()
            .filter(|e| matches!(e, MeshEvent::NodeJoined { .. }))
            .count();
        assert_eq!(joins, 36);
    }

    #[test]
    fn advance_records_route_selection() {
        let mut sim = Simulation::empty(SimulationConfig::default()).unwrap();
        let gw = sim.add_node(Role::Gateway, (0.0, 0.0)).unwrap();
        let node = sim.add_node(Role::Regular, (10.0, 0.0)).unwrap();

        let report = sim.advance();
        assert_eq!(report.tick, 1);

        let selected: Vec<_> = sim
            .events()
            .iter()
            .filter_map(|e| match e {
                MeshEvent::RouteSelected { node, next_hop, .. } => Some((*node, *next_hop)),
                _ => None,
            })
            .collect();
        assert_eq!(selected, vec![(node, gw)]);
        assert!(matches!(
            sim.events().last(),
            Some(MeshEvent::SweepCompleted { tick: 1, routed: 1, .. })
        ));

        // A stable route is not re-announced.
        let before = sim.event_count();
        sim.advance();
        assert_eq!(sim.event_count(), before + 1);
    }

    #[test]
    fn take_events_drains_the_log() {
        let mut sim = Simulation::empty(SimulationConfig::default()).unwrap();
        sim.add_node(Role::Gateway, (0.0, 0.0)).unwrap();
        sim.add_node(Role::Regular, (10.0, 0.0)).unwrap();
        sim.run(3);

        let drained = sim.take_events();
        assert_eq!(drained.len(), 2 + 1 + 3);
        assert_eq!(sim.event_count(), 0);

        sim.advance();
        assert_eq!(sim.events().len(), 1);
        assert!(matches!(
            sim.events()[0],
            MeshEvent::SweepCompleted { tick: 4, .. }
        ));
    }

    #[test]
    fn same_seed_same_trajectory() {
        let mut a = Simulation::new(small_config()).unwrap();
        let mut b = Simulation::new(small_config()).unwrap();
        a.run(40);
        b.run(40);
        assert_eq!(a.events(), b.events());
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn converges_on_grid() {
        let mut sim = Simulation::empty(SimulationConfig::default()).unwrap();
        sim.add_node(Role::Gateway, (0.0, 0.0)).unwrap();
        for i in 0..5 {
            for j in 0..5 {
                if i + j > 0 {
                    // Jitter so no two paths tie exactly.
                    let x = i as f64 * 60.0 + ((j * 7) % 5) as f64;
                    let y = j as f64 * 60.0 + ((i * 3) % 4) as f64;
                    sim.add_node(Role::Regular, (x, y)).unwrap();
                }
            }
        }

        let tick = sim.run_until_converged(5_000).unwrap();
        assert_eq!(sim.network().tick(), tick);

        let stats = sim.reachability().unwrap();
        assert_eq!(stats.reached, 24);
        assert!(stats.mean_hops >= 1.0);
    }

    #[test]
    fn reachability_counts_every_regular_node() {
        let mut sim = Simulation::new(small_config()).unwrap();
        sim.run(200);
        let stats = sim.reachability().unwrap();
        assert_eq!(stats.reached + stats.no_route + stats.looped, 35);
    }
}
