//! Route graph: nodes, obstacles, edge weights, and feasibility.
//!
//! Provides the per-instance [`RouteGraph`] and the dense [`WeightMatrix`]
//! derived from it.

mod route_graph;
mod weights;

pub use route_graph::RouteGraph;
pub use weights::{AffineRisk, EdgeWeight, RiskModel, WeightMatrix};
