//! Three-objective Pareto dominance.

use crate::models::EvaluatedRoute;

/// Tolerance for comparing continuous objectives.
pub const OBJECTIVE_TOLERANCE: f64 = 1e-9;

/// The three minimized objectives of a route.
pub trait Objectives {
    /// Total distance.
    fn distance(&self) -> f64;
    /// Total risk.
    fn risk(&self) -> f64;
    /// Number of recharges.
    fn recharges(&self) -> usize;
}

impl Objectives for EvaluatedRoute {
    fn distance(&self) -> f64 {
        self.total_distance
    }

    fn risk(&self) -> f64 {
        self.total_risk
    }

    fn recharges(&self) -> usize {
        self.recharge_count
    }
}

/// Returns `true` if `a` Pareto-dominates `b`.
///
/// `a` must be no worse than `b` on distance and risk (within
/// [`OBJECTIVE_TOLERANCE`]) and on recharges, and strictly better on at least
/// one of them. Differences inside the tolerance count as ties.
///
/// # Examples
///
/// ```
/// use u_droneroute::models::EvaluatedRoute;
/// use u_droneroute::pareto::dominates;
///
/// let a = EvaluatedRoute::new(vec![0, 1, 0], 10.0, 2.0, 0);
/// let b = EvaluatedRoute::new(vec![0, 1, 0], 12.0, 2.0, 0);
/// assert!(dominates(&a, &b));
/// assert!(!dominates(&b, &a));
/// assert!(!dominates(&a, &a));
/// ```
pub fn dominates<T: Objectives + ?Sized>(a: &T, b: &T) -> bool {
    let no_worse = a.distance() <= b.distance() + OBJECTIVE_TOLERANCE
        && a.risk() <= b.risk() + OBJECTIVE_TOLERANCE
        && a.recharges() <= b.recharges();
    let strictly_better = a.distance() < b.distance() - OBJECTIVE_TOLERANCE
        || a.risk() < b.risk() - OBJECTIVE_TOLERANCE
        || a.recharges() < b.recharges();
    no_worse && strictly_better
}
