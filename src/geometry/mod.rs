//! Planar geometry kernel for no-fly feasibility.
//!
//! - [`Point`], [`Polygon`] — value types
//! - [`orientation`], [`segments_intersect`] — segment classification
//! - [`point_in_polygon`], [`segment_intersects_polygon`] — obstacle tests

mod predicates;
mod shapes;

pub use predicates::{
    on_segment, orientation, point_in_polygon, segment_intersects_polygon, segments_intersect,
    Orientation, DIVISION_GUARD, EPSILON,
};
pub use shapes::{Point, Polygon};
