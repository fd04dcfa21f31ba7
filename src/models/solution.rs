//! Evaluated route type.

use serde::{Deserialize, Serialize};

/// A closed route together with its three objective values.
///
/// Produced only by [`evaluate`](crate::evaluation::evaluate); the objectives
/// are recomputed from the node sequence, never patched in place.
///
/// # Examples
///
/// ```
/// use u_droneroute::models::EvaluatedRoute;
///
/// let r = EvaluatedRoute::new(vec![0, 2, 1, 0], 12.0, 3.1, 1);
/// assert_eq!(r.start(), Some(0));
/// assert_eq!(r.num_stops(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedRoute {
    /// Node indices, first and last equal to the start node.
    pub route: Vec<usize>,
    /// Sum of edge lengths.
    pub total_distance: f64,
    /// Sum of edge risks.
    pub total_risk: f64,
    /// Number of recharges performed en route.
    pub recharge_count: usize,
}

impl EvaluatedRoute {
    /// Creates an evaluated route.
    pub fn new(
        route: Vec<usize>,
        total_distance: f64,
        total_risk: f64,
        recharge_count: usize,
    ) -> Self {
        Self {
            route,
            total_distance,
            total_risk,
            recharge_count,
        }
    }

    /// The start (and end) node.
    pub fn start(&self) -> Option<usize> {
        self.route.first().copied()
    }

    /// Number of visited nodes excluding the start.
    pub fn num_stops(&self) -> usize {
        self.route.len().saturating_sub(2)
    }

    /// The route with the inner sequence reversed.
    ///
    /// Useful when comparing undirected tours.
    pub fn reversed_route(&self) -> Vec<usize> {
        self.route.iter().rev().copied().collect()
    }
}
