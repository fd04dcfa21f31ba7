//! Pareto genetic algorithm over tour permutations.
//!
//! - [`Chromosome`] — feasible gene order with its evaluated route
//! - [`order_crossover`], [`tournament`] — operators
//! - [`MetaheuristicSolver`] — generational loop with Pareto survival

mod chromosome;
mod operators;
mod solver;

pub use chromosome::{closed_route, Chromosome};
pub use operators::{order_crossover, order_crossover_at, tournament};
pub use solver::{GaConfig, MetaheuristicSolver};
