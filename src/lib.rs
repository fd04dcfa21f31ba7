//! # u-droneroute
//!
//! Battery-aware multi-objective routing for a single drone over a fixed set
//! of nodes, with polygonal no-fly zones. Every solver returns a Pareto front
//! of closed tours trading off total distance, cumulative risk, and the
//! number of recharge stops.
//!
//! ## Modules
//!
//! - [`geometry`] — Points, polygons, orientation and intersection predicates
//! - [`models`] — Domain types (Node, NodeKind, EvaluatedRoute)
//! - [`graph`] — Route graph with memoized obstacle checks and edge weights
//! - [`evaluation`] — Battery and recharge simulation along a route
//! - [`pareto`] — Three-objective dominance and front maintenance
//! - [`exact`] — Exhaustive enumeration with a wall-clock limit
//! - [`constructive`] — Greedy and randomized nearest-feasible construction
//! - [`local_search`] — Obstacle-aware 2-opt
//! - [`ga`] — Pareto genetic algorithm (order crossover, swap mutation)
//! - [`solver`] — Strategy selection and the `solve` entry point
//! - [`error`] — Crate error type

pub mod constructive;
pub mod error;
pub mod evaluation;
pub mod exact;
pub mod ga;
pub mod geometry;
pub mod graph;
pub mod local_search;
pub mod models;
pub mod pareto;
pub mod solver;

pub use error::{Error, Result};
