//! Constructive heuristics for building initial tours.
//!
//! - [`nearest_feasible_route`] — greedy cheapest feasible successor, O(n²)
//! - [`randomized_feasible_route`] — uniform pick among the best three

mod nearest_feasible;

pub use nearest_feasible::{nearest_feasible_route, randomized_feasible_route, RANDOMIZED_TOP_K};
