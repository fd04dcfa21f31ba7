//! Pareto dominance over (distance, risk, recharges) and front maintenance.
//!
//! - [`dominates`] — strict three-objective dominance with tolerance
//! - [`ParetoFront`] / [`pareto_front`] — order-preserving incremental front
//! - [`dedup_by_route`] — removes repeated node sequences after merging

mod dominance;
mod front;

pub use dominance::{dominates, Objectives, OBJECTIVE_TOLERANCE};
pub use front::{dedup_by_route, pareto_front, ParetoFront};
