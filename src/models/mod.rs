//! Domain model types for drone routing.
//!
//! Nodes carry a category and a charger flag; evaluated routes carry the
//! three objectives the Pareto engine compares.

mod node;
mod solution;

pub use node::{Node, NodeKind};
pub use solution::EvaluatedRoute;
