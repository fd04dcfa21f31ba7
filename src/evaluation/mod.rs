//! Route feasibility checking and objective evaluation.

mod evaluator;

pub use evaluator::{evaluate, route_feasible, Evaluation, Infeasibility, RouteEvaluator};
