//! Local search for closed tours.
//!
//! - [`two_opt_improve`] — obstacle-aware 2-opt edge reversal
//! - [`route_distance`] — summed edge length of a route

mod two_opt;

pub use two_opt::{route_distance, two_opt_improve};
