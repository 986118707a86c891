//! Random node layouts.
//!
//! Node density follows the size of the surface: one node per
//! `spacing x spacing` cell (rounded up), scattered uniformly. The first
//! `gateways` nodes are gateways.

use bellmesh_core::{Position, Role};
use rand::Rng;

use crate::error::{Error, Result};

/// Largest layout [`generate`] will place.
pub const MAX_LAYOUT_NODES: usize = 1_000_000;

/// Surface size and density of a generated layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    pub width: f64,
    pub height: f64,
    /// Side of the area each node accounts for
    pub spacing: f64,
    /// How many of the generated nodes are gateways
    pub gateways: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            spacing: 70.0,
            gateways: 1,
        }
    }
}

impl LayoutConfig {
    /// Layout of the given size with default density and one gateway.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Number of nodes this layout places.
    pub fn node_count(&self) -> usize {
        ((self.width / self.spacing) * (self.height / self.spacing)).ceil() as usize
    }

    /// Reject non-positive dimensions and surfaces denser than
    /// [`MAX_LAYOUT_NODES`].
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("spacing", self.spacing),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "layout {} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        let cells = (self.width / self.spacing) * (self.height / self.spacing);
        if !cells.is_finite() || cells > MAX_LAYOUT_NODES as f64 {
            return Err(Error::Config(format!(
                "layout of {}x{} at spacing {} exceeds {} nodes",
                self.width, self.height, self.spacing, MAX_LAYOUT_NODES
            )));
        }
        Ok(())
    }
}

/// Generate roles and positions for a layout.
pub fn generate<R: Rng + ?Sized>(
    config: &LayoutConfig,
    rng: &mut R,
) -> Result<Vec<(Role, Position)>> {
    config.validate()?;

    let count = config.node_count();
    let nodes = (0..count)
        .map(|index| {
            let role = if index < config.gateways {
                Role::Gateway
            } else {
                Role::Regular
            };
            let x = rng.gen::<f64>() * config.width;
            let y = rng.gen::<f64>() * config.height;
            (role, Position::planar(x, y))
        })
        .collect();

    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn default_surface_density() {
        // 1280/70 * 720/70 = 188.08
        assert_eq!(LayoutConfig::default().node_count(), 189);
        assert_eq!(LayoutConfig::new(700.0, 700.0).node_count(), 100);
    }

    #[test]
    fn first_nodes_are_gateways() {
        let config = LayoutConfig {
            gateways: 2,
            ..LayoutConfig::new(350.0, 350.0)
        };
        let nodes = generate(&config, &mut StdRng::seed_from_u64(1)).unwrap();

        assert_eq!(nodes.len(), 25);
        assert_eq!(nodes[0].0, Role::Gateway);
        assert_eq!(nodes[1].0, Role::Gateway);
        assert!(nodes[2..].iter().all(|(role, _)| *role == Role::Regular));
    }

    #[test]
    fn same_seed_same_layout() {
        let config = LayoutConfig::default();
        let a = generate(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = generate(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        let c = generate(&config, &mut StdRng::seed_from_u64(10)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn rejects_degenerate_surface() {
        let config = LayoutConfig::new(0.0, 100.0);
        assert!(generate(&config, &mut StdRng::seed_from_u64(0)).is_err());
    }

    #[test]
    fn rejects_oversized_surface() {
        let huge = LayoutConfig::new(1e300, 1e300);
        assert!(matches!(huge.validate(), Err(Error::Config(_))));
        assert!(generate(&huge, &mut StdRng::seed_from_u64(0)).is_err());

        // 7000 x 7000 at spacing 7 is exactly the limit.
        let edge = LayoutConfig { spacing: 7.0, ..LayoutConfig::new(7000.0, 7000.0) };
        assert_eq!(edge.node_count(), MAX_LAYOUT_NODES);
        assert!(edge.validate().is_ok());

        let over = LayoutConfig { spacing: 7.0, ..LayoutConfig::new(7007.0, 7000.0) };
        assert!(over.validate().is_err());
    }

    proptest! {
        #[test]
        fn positions_stay_on_surface(
            seed in any::<u64>(),
            w in 10.0..2000.0f64,
            h in 10.0..2000.0f64,
        ) {
            let config = LayoutConfig { spacing: 100.0, ..LayoutConfig::new(w, h) };
            let nodes = generate(&config, &mut StdRng::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(nodes.len(), config.node_count());
            for (_, p) in &nodes {
                let c = p.coords();
                prop_assert!(c[0] >= 0.0 && c[0] < w);
                prop_assert!(c[1] >= 0.0 && c[1] < h);
            }
        }
    }
}
