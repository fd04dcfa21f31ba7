//! Exact anytime solver.
//!
//! - [`ExactSolver`] — explicit-stack enumeration of all tours with a
//!   wall-clock cutoff

mod branch_and_bound;

pub use branch_and_bound::{ExactConfig, ExactOutcome, ExactSolver};
