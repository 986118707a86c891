//! Routing constants.
//!
//! The cost recurrence has four tuning knobs. The defaults reproduce the
//! reference mesh behaviour; every one of them is overridable.

use crate::error::{Error, Result};

/// Cost advertised by a gateway, for its whole lifetime.
pub const GATEWAY_COST: f64 = 0.0;

/// Cost a regular node starts with before it has heard from anyone.
pub const INITIAL_REGULAR_COST: f64 = 100.0;

/// Lowest cost a gateway may hold.
pub const GATEWAY_FLOOR: f64 = 0.0;

/// Lowest cost a regular node falls back to when it has no neighbors.
pub const REGULAR_FLOOR: f64 = 1.0;

/// Penalty target used by [`RecoveryPolicy::PenalizeRegression`] by default.
pub const REGRESSION_PENALTY: f64 = 100.0;

/// What happens when a node's best candidate cost is worse than its cost
/// at the start of the step.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecoveryPolicy {
    /// Take the best candidate cost as is. This is the reference trajectory.
    #[default]
    Faithful,
    /// Blend a rising cost toward `penalty`:
    /// `cost = (1 - alpha) * penalty + alpha * best`.
    PenalizeRegression { penalty: f64 },
}

impl RecoveryPolicy {
    /// Penalize regressions toward [`REGRESSION_PENALTY`].
    pub const fn penalize() -> Self {
        Self::PenalizeRegression {
            penalty: REGRESSION_PENALTY,
        }
    }
}

/// How one sweep orders reads and writes across nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateDiscipline {
    /// Step nodes in id order, each reading the live (possibly already
    /// updated this sweep) cost of the others. Reference trajectory.
    #[default]
    GaussSeidel,
    /// Plan every node against the state at the start of the sweep, then
    /// apply all plans at once. Order-independent but numerically a
    /// different trajectory from [`UpdateDiscipline::GaussSeidel`].
    Jacobi,
}

/// Parameters of the cost recurrence.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingParams {
    /// Exponential smoothing weight on the node's own prior cost, in [0, 1].
    pub alpha: f64,
    /// Distance scale of the squared distance penalty. Larger values make
    /// far links cheaper.
    pub meters_decay: f64,
    /// Constant reward subtracted for making any connection.
    pub gain: f64,
    /// Admission threshold, applied both to the raw distance and to the
    /// candidate cost.
    pub max_connect_distance: f64,
    /// Behaviour when the selected cost rises.
    pub recovery: RecoveryPolicy,
}

impl Default for RoutingParams {
    fn default() -> Self {
        Self {
            alpha: 0.95,
            meters_decay: 60.0,
            gain: 1.0,
            max_connect_distance: 150.0,
            recovery: RecoveryPolicy::Faithful,
        }
    }
}

impl RoutingParams {
    /// Set the smoothing weight.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the distance penalty scale.
    #[must_use]
    pub fn with_meters_decay(mut self, meters_decay: f64) -> Self {
        self.meters_decay = meters_decay;
        self
    }

    /// Set the per-connection gain.
    #[must_use]
    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = gain;
        self
    }

    /// Set the admission threshold.
    #[must_use]
    pub fn with_max_connect_distance(mut self, max_connect_distance: f64) -> Self {
        self.max_connect_distance = max_connect_distance;
        self
    }

    /// Set the recovery policy.
    #[must_use]
    pub fn with_recovery(mut self, recovery: RecoveryPolicy) -> Self {
        self.recovery = recovery;
        self
    }

    /// Check every parameter is finite and in range.
    pub fn validate(&self) -> Result<()> {
        check_finite("alpha", self.alpha)?;
        check_finite("meters_decay", self.meters_decay)?;
        check_finite("gain", self.gain)?;
        check_finite("max_connect_distance", self.max_connect_distance)?;

        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(invalid("alpha", format!("{} is outside [0, 1]", self.alpha)));
        }
        if self.meters_decay <= 0.0 {
            return Err(invalid(
                "meters_decay",
                format!("{} must be positive", self.meters_decay),
            ));
        }
        if self.max_connect_distance < 0.0 {
            return Err(invalid(
                "max_connect_distance",
                format!("{} must not be negative", self.max_connect_distance),
            ));
        }
        if let RecoveryPolicy::PenalizeRegression { penalty } = self.recovery {
            check_finite("recovery.penalty", penalty)?;
        }
        Ok(())
    }
}

fn check_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(invalid(name, format!("{} is not finite", value)))
    }
}

fn invalid(name: &'static str, reason: String) -> Error {
    Error::InvalidParams { name, reason }
}
