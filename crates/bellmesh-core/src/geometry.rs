//! Node positions and Euclidean distance.
//!
//! Nodes are stationary points in an N-dimensional space. The mesh in
//! practice is planar (x, y), but nothing in the routing math depends on
//! that, so a position is an arbitrary-length coordinate vector.

use crate::error::{Error, Result};

/// A fixed position in N-dimensional space.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Position {
    coords: Vec<f64>,
}

impl Position {
    /// Create a position from raw coordinates without validation.
    pub fn new(coords: impl Into<Vec<f64>>) -> Self {
        Self {
            coords: coords.into(),
        }
    }

    /// Create a position, rejecting empty or non-finite coordinates.
    pub fn try_new(coords: impl Into<Vec<f64>>) -> Result<Self> {
        let position = Self::new(coords);
        position.validate()?;
        Ok(position)
    }

    /// Check the position has at least one axis and only finite values.
    pub fn validate(&self) -> Result<()> {
        if self.coords.is_empty() {
            return Err(Error::InvalidPosition("no coordinates".into()));
        }
        if let Some((axis, value)) = self.coords.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(Error::InvalidPosition(format!(
                "axis {} is not finite ({})",
                axis, value
            )));
        }
        Ok(())
    }

    /// Create a planar position.
    pub fn planar(x: f64, y: f64) -> Self {
        Self { coords: vec![x, y] }
    }

    /// Number of axes.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    /// Raw coordinates.
    #[inline]
    pub fn coords(&self) -> &[f64] {
        &self.coords
    }

    /// Euclidean distance to another position of the same dimension.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ. Use [`try_distance`] when the
    /// positions come from unchecked input.
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        distance(self, other)
    }
}

impl From<Vec<f64>> for Position {
    fn from(coords: Vec<f64>) -> Self {
        Self { coords }
    }
}

impl<const N: usize> From<[f64; N]> for Position {
    fn from(coords: [f64; N]) -> Self {
        Self {
            coords: coords.to_vec(),
        }
    }
}

impl From<(f64, f64)> for Position {
    fn from((x, y): (f64, f64)) -> Self {
        Self::planar(x, y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, ")")
    }
}

/// Euclidean distance: square root of the summed squared axis differences.
///
/// # Panics
///
/// Panics if `a` and `b` have different dimensions. Mixing dimensions is a
/// construction bug, and [`Network`](crate::Network) refuses such nodes up
/// front, so this never fires on a network built through its API.
pub fn distance(a: &Position, b: &Position) -> f64 {
    assert_eq!(
        a.dimension(),
        b.dimension(),
        "distance between positions of different dimension"
    );
    squared_distance(a.coords(), b.coords()).sqrt()
}

/// Checked variant of [`distance`].
pub fn try_distance(a: &Position, b: &Position) -> Result<f64> {
    if a.dimension() != b.dimension() {
        return Err(Error::DimensionMismatch {
            expected: a.dimension(),
            actual: b.dimension(),
        });
    }
    Ok(squared_distance(a.coords(), b.coords()).sqrt())
}

#[inline]
fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}
