//! Candidate route cost.
//!
//! The estimate of "what my cost would become if I routed through `other`":
//!
//! ```text
//! candidate = alpha * self.cost
//!           + (1 - alpha) * ((other.cost + 1) + (d / meters_decay)^2 - gain)
//! ```
//!
//! `other.cost + 1` is the one-hop distance-vector increment, the squared
//! distance term makes far links expensive, and `gain` rewards any link at
//! all. `alpha` keeps the node close to its previous cost so a single
//! candidate cannot swing it far in one step.

use crate::geometry::distance;
use crate::node::MeshNode;
use crate::params::RoutingParams;

/// Smoothed cost of routing from `node` through `other`. Pure.
#[inline]
pub fn candidate_cost(node: &MeshNode, other: &MeshNode, params: &RoutingParams) -> f64 {
    let d = distance(node.position(), other.position());
    candidate_cost_at(node.cost(), other.cost(), d, params)
}

/// [`candidate_cost`] from precomputed costs and distance.
#[inline]
pub fn candidate_cost_at(
    own_cost: f64,
    other_cost: f64,
    distance: f64,
    params: &RoutingParams,
) -> f64 {
    let scaled = distance / params.meters_decay;
    let through = (other_cost + 1.0) + scaled * scaled - params.gain;
    params.alpha * own_cost + (1.0 - params.alpha) * through
}
