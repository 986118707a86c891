//! Bellmesh Simulation
//!
//! The driver side of a bellmesh run: lays out a random mesh, sweeps it
//! tick by tick, and records what a renderer needs to draw it.
//!
//! # Architecture
//!
//! - **Layout**: seeded random placement, density tied to surface size
//! - **Simulation**: owns the [`Network`](bellmesh_core::Network), records
//!   route changes into an event timeline
//! - **Snapshot**: node views plus best-route edges and shading scale
//!
//! # Usage
//!
//! ```
//! use bellmesh_sim::{LayoutConfig, Simulation, SimulationConfig};
//!
//! let config = SimulationConfig::default().with_layout(LayoutConfig::new(350.0, 350.0));
//! let mut sim = Simulation::new(config).unwrap();
//! sim.run(50);
//!
//! let snapshot = sim.snapshot();
//! assert_eq!(snapshot.nodes.len(), 25);
//! ```

mod config;
mod error;
mod events;
mod layout;
mod simulation;

pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use events::{MeshEvent, MeshSnapshot, RouteEdge};
pub use layout::{generate as generate_layout, LayoutConfig, MAX_LAYOUT_NODES};
pub use simulation::{Reachability, Simulation};
