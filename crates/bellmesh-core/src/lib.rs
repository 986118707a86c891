//! Bellmesh Core
//!
//! Decentralized, distance-vector style cost propagation for a
//! self-organizing wireless mesh.
//!
//! # Model
//!
//! A mesh is a fixed set of stationary nodes. A few are gateways (uplinks)
//! and advertise cost 0 forever. Every other node repeatedly:
//!
//! 1. **Discovers** neighbors: every node within `max_connect_distance`
//!    whose candidate cost is also within that threshold.
//! 2. **Updates** its cost to the cheapest candidate and records that
//!    neighbor as its next hop. With no neighbor, the cost holds at the
//!    role's floor instead.
//!
//! The candidate cost through neighbor `o` at distance `d` is
//!
//! ```text
//! alpha * cost + (1 - alpha) * ((o.cost + 1) + (d / meters_decay)^2 - gain)
//! ```
//!
//! which is a one-hop Bellman-Ford relaxation smoothed against the node's
//! previous cost.
//!
//! # Sweeps
//!
//! [`Network::sweep`] runs one iteration over all nodes. The reference
//! discipline is Gauss-Seidel: nodes step in id order against live state.
//! A Jacobi discipline is available as a deliberately different trajectory.
//!
//! ```
//! use bellmesh_core::Network;
//!
//! let mut net = Network::new();
//! let gw = net.add_gateway((0.0, 0.0)).unwrap();
//! let node = net.add_regular((10.0, 0.0)).unwrap();
//!
//! net.sweep();
//! assert_eq!(net.node(node).unwrap().best_neighbor(), Some(gw));
//! ```

mod cost;
mod discovery;
mod error;
mod geometry;
mod network;
mod node;
mod params;
mod route;
mod update;
mod view;

pub use cost::{candidate_cost, candidate_cost_at};
pub use discovery::{admits, discover, NeighborEntry, NeighborTable};
pub use error::{Error, Result};
pub use geometry::{distance, try_distance, Position};
pub use network::{Network, SweepReport};
pub use node::{MeshNode, NodeId, Role};
pub use params::{
    RecoveryPolicy, RoutingParams, UpdateDiscipline, GATEWAY_COST, GATEWAY_FLOOR,
    INITIAL_REGULAR_COST, REGRESSION_PENALTY, REGULAR_FLOOR,
};
pub use route::Route;
pub use update::{update_cost, CostUpdate};
pub use view::NodeView;
