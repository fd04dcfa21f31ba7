//! Edge weights, risk models, and the dense weight matrix.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Derived cost of flying one straight edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeWeight {
    /// Euclidean length.
    pub distance: f64,
    /// Risk score assigned by the graph's [`RiskModel`].
    pub risk: f64,
    /// Battery consumed (1 unit per unit of distance).
    pub battery_cost: f64,
}

/// Maps an edge length to a risk score.
///
/// Only the role of risk as a second minimization objective matters to the
/// solvers; the exact formula is up to the caller.
pub trait RiskModel: fmt::Debug + Send + Sync {
    /// Risk of flying a straight edge of the given length.
    fn risk(&self, distance: f64) -> f64;
}

/// Risk growing linearly with distance plus a fixed per-leg term.
///
/// # Examples
///
/// ```
/// use u_droneroute::graph::{AffineRisk, RiskModel};
///
/// let model = AffineRisk::default();
/// assert!((model.risk(10.0) - 1.0).abs() < 1e-12); // 0.05 * 10 + 0.5
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineRisk {
    /// Risk per unit distance.
    pub per_distance: f64,
    /// Risk added for every leg.
    pub per_leg: f64,
}

impl AffineRisk {
    /// Creates an affine risk model.
    pub fn new(per_distance: f64, per_leg: f64) -> Self {
        Self {
            per_distance,
            per_leg,
        }
    }
}

impl Default for AffineRisk {
    fn default() -> Self {
        Self::new(0.05, 0.5)
    }
}

impl RiskModel for AffineRisk {
    fn risk(&self, distance: f64) -> f64 {
        self.per_distance * distance + self.per_leg
    }
}

/// A dense n×n matrix of edge weights stored in row-major order.
///
/// A `None` cell marks an obstructed pair; the diagonal is always `None`.
///
/// # Examples
///
/// ```
/// use u_droneroute::graph::{EdgeWeight, WeightMatrix};
///
/// let mut m = WeightMatrix::new(2);
/// let w = EdgeWeight { distance: 1.0, risk: 0.55, battery_cost: 1.0 };
/// m.set_symmetric(0, 1, w);
/// assert_eq!(m.get(1, 0), Some(&w));
/// assert!(m.is_feasible(0, 1));
/// assert!(!m.is_feasible(0, 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    data: Vec<Option<EdgeWeight>>,
    size: usize,
}

impl WeightMatrix {
    /// Creates a matrix of the given size with every pair infeasible.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![None; size * size],
            size,
        }
    }

    /// Returns the weight from `from` to `to`, or `None` if obstructed.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> Option<&EdgeWeight> {
        self.data[from * self.size + to].as_ref()
    }

    /// Returns `true` if the pair has a weight.
    pub fn is_feasible(&self, from: usize, to: usize) -> bool {
        self.get(from, to).is_some()
    }

    /// Stores `weight` for both directions of the pair.
    pub fn set_symmetric(&mut self, a: usize, b: usize, weight: EdgeWeight) {
        self.data[a * self.size + b] = Some(weight);
        self.data[b * self.size + a] = Some(weight);
    }

    /// Number of nodes covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of unordered feasible pairs.
    pub fn feasible_pairs(&self) -> usize {
        (0..self.size)
            .flat_map(|i| ((i + 1)..self.size).map(move |j| (i, j)))
            .filter(|&(i, j)| self.is_feasible(i, j))
            .count()
    }

    /// Returns `true` if every cell equals its transpose.
    pub fn is_symmetric(&self) -> bool {
        (0..self.size).all(|i| (0..i).all(|j| self.get(i, j) == self.get(j, i)))
    }
}
