//! Simulation configuration.

use std::str::FromStr;

use bellmesh_core::{RecoveryPolicy, RoutingParams, UpdateDiscipline};

use crate::error::{Error, Result};
use crate::layout::LayoutConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Seed for the layout RNG
    pub seed: u64,
    /// Surface and density of the random layout
    pub layout: LayoutConfig,
    /// Routing constants
    pub params: RoutingParams,
    /// Sweep ordering
    pub discipline: UpdateDiscipline,
    /// Max cost change still counted as settled
    pub convergence_epsilon: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            layout: LayoutConfig::default(),
            params: RoutingParams::default(),
            discipline: UpdateDiscipline::GaussSeidel,
            convergence_epsilon: 1e-6,
        }
    }
}

impl SimulationConfig {
    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the routing parameters.
    #[must_use]
    pub fn with_params(mut self, params: RoutingParams) -> Self {
        self.params = params;
        self
    }

    /// Set the sweep discipline.
    #[must_use]
    pub fn with_discipline(mut self, discipline: UpdateDiscipline) -> Self {
        self.discipline = discipline;
        self
    }

    /// Create config from `BELLMESH_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    ///
    /// Recognized keys: `BELLMESH_SEED`, `BELLMESH_WIDTH`, `BELLMESH_HEIGHT`,
    /// `BELLMESH_SPACING`, `BELLMESH_GATEWAYS`, `BELLMESH_ALPHA`,
    /// `BELLMESH_METERS_DECAY`, `BELLMESH_GAIN`, `BELLMESH_MAX_CONNECT`,
    /// `BELLMESH_PENALIZE`, `BELLMESH_JACOBI`, `BELLMESH_EPSILON`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let layout = LayoutConfig {
            width: parse_or(&get, "BELLMESH_WIDTH", defaults.layout.width)?,
            height: parse_or(&get, "BELLMESH_HEIGHT", defaults.layout.height)?,
            spacing: parse_or(&get, "BELLMESH_SPACING", defaults.layout.spacing)?,
            gateways: parse_or(&get, "BELLMESH_GATEWAYS", defaults.layout.gateways)?,
        };
        layout.validate()?;

        let recovery = if parse_flag(&get, "BELLMESH_PENALIZE")? {
            RecoveryPolicy::penalize()
        } else {
            RecoveryPolicy::Faithful
        };
        let params = RoutingParams {
            alpha: parse_or(&get, "BELLMESH_ALPHA", defaults.params.alpha)?,
            meters_decay: parse_or(&get, "BELLMESH_METERS_DECAY", defaults.params.meters_decay)?,
            gain: parse_or(&get, "BELLMESH_GAIN", defaults.params.gain)?,
            max_connect_distance: parse_or(
                &get,
                "BELLMESH_MAX_CONNECT",
                defaults.params.max_connect_distance,
            )?,
            recovery,
        };
        params.validate()?;

        let discipline = if parse_flag(&get, "BELLMESH_JACOBI")? {
            UpdateDiscipline::Jacobi
        } else {
            UpdateDiscipline::GaussSeidel
        };

        Ok(Self {
            seed: parse_or(&get, "BELLMESH_SEED", defaults.seed)?,
            layout,
            params,
            discipline,
            convergence_epsilon: parse_or(&get, "BELLMESH_EPSILON", defaults.convergence_epsilon)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("invalid {} {:?}: {}", key, raw, e))),
        None => Ok(default),
    }
}

fn parse_flag<G>(get: &G, key: &str) -> Result<bool>
where
    G: Fn(&str) -> Option<String>,
{
    match get(key).as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some(other) => Err(Error::Config(format!(
            "invalid {} {:?}: expected a boolean",
            key, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = SimulationConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = SimulationConfig::from_lookup(lookup(&[
            ("BELLMESH_SEED", "7"),
            ("BELLMESH_WIDTH", "700"),
            ("BELLMESH_HEIGHT", " 350 "),
            ("BELLMESH_GATEWAYS", "3"),
            ("BELLMESH_ALPHA", "0.9"),
            ("BELLMESH_PENALIZE", "yes"),
            ("BELLMESH_JACOBI", "1"),
        ]))
        .unwrap();

        assert_eq!(config.seed, 7);
        assert_eq!(config.layout.width, 700.0);
        assert_eq!(config.layout.height, 350.0);
        assert_eq!(config.layout.gateways, 3);
        assert_eq!(config.params.alpha, 0.9);
        assert_eq!(config.params.recovery, RecoveryPolicy::penalize());
        assert_eq!(config.discipline, UpdateDiscipline::Jacobi);
    }

    #[test]
    fn blank_values_fall_back() {
        let config = SimulationConfig::from_lookup(lookup(&[("BELLMESH_SEED", "  ")])).unwrap();
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn malformed_number_rejected() {
        let err = SimulationConfig::from_lookup(lookup(&[("BELLMESH_SEED", "abc")])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("BELLMESH_SEED")));
    }

    #[test]
    fn malformed_flag_rejected() {
        assert!(SimulationConfig::from_lookup(lookup(&[("BELLMESH_JACOBI", "maybe")])).is_err());
    }

    #[test]
    fn out_of_range_params_rejected() {
        let err = SimulationConfig::from_lookup(lookup(&[("BELLMESH_ALPHA", "2")])).unwrap_err();
        assert!(matches!(err, Error::Core(_)));
    }

    #[test]
    fn bad_layout_rejected() {
        assert!(SimulationConfig::from_lookup(lookup(&[("BELLMESH_SPACING", "0")])).is_err());
    }

    #[test]
    fn oversized_layout_rejected() {
        let err = SimulationConfig::from_lookup(lookup(&[
            ("BELLMESH_WIDTH", "1e300"),
            ("BELLMESH_HEIGHT", "1e300"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
