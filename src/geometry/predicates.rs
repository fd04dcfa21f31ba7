//! Orientation, intersection, and containment predicates.
//!
//! All predicates are pure. Near-degenerate configurations are classified
//! with fixed tolerances rather than exact arithmetic:
//!
//! - [`EPSILON`] (1e-9) decides collinearity and bounding-box containment.
//! - [`DIVISION_GUARD`] (1e-12) keeps the ray-cast intersection finite for
//!   horizontal polygon edges.

use super::{Point, Polygon};

/// Tolerance for orientation and on-segment classification.
pub const EPSILON: f64 = 1e-9;

/// Added to the ray-cast denominator to avoid division by zero.
pub const DIVISION_GUARD: f64 = 1e-12;

/// Turn direction of an ordered point triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The three points lie on one line (within [`EPSILON`]).
    Collinear,
    /// `p → q → r` turns right.
    Clockwise,
    /// `p → q → r` turns left.
    CounterClockwise,
}

/// Classifies the turn `p → q → r`.
///
/// # Examples
///
/// ```
/// use u_droneroute::geometry::{orientation, Orientation, Point};
///
/// let p = Point::new(0.0, 0.0);
/// let q = Point::new(1.0, 0.0);
/// assert_eq!(orientation(p, q, Point::new(1.0, 1.0)), Orientation::CounterClockwise);
/// assert_eq!(orientation(p, q, Point::new(1.0, -1.0)), Orientation::Clockwise);
/// assert_eq!(orientation(p, q, Point::new(2.0, 0.0)), Orientation::Collinear);
/// ```
pub fn orientation(p: Point, q: Point, r: Point) -> Orientation {
    let val = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
    if val.abs() < EPSILON {
        Orientation::Collinear
    } else if val > 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::CounterClockwise
    }
}

/// Returns `true` if `q` lies inside the bounding box of segment `p–r`,
/// expanded by [`EPSILON`].
///
/// Only meaningful when `p`, `q`, `r` are already known to be collinear.
pub fn on_segment(p: Point, q: Point, r: Point) -> bool {
    p.x.min(r.x) - EPSILON <= q.x
        && q.x <= p.x.max(r.x) + EPSILON
        && p.y.min(r.y) - EPSILON <= q.y
        && q.y <= p.y.max(r.y) + EPSILON
}

/// Returns `true` if segments `p1–q1` and `p2–q2` cross, touch, or overlap.
///
/// # Examples
///
/// ```
/// use u_droneroute::geometry::{segments_intersect, Point};
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(2.0, 2.0);
/// // proper crossing
/// assert!(segments_intersect(a, b, Point::new(0.0, 2.0), Point::new(2.0, 0.0)));
/// // touching at an endpoint
/// assert!(segments_intersect(a, b, b, Point::new(3.0, 0.0)));
/// // disjoint
/// assert!(!segments_intersect(a, b, Point::new(3.0, 0.0), Point::new(4.0, 0.0)));
/// ```
pub fn segments_intersect(p1: Point, q1: Point, p2: Point, q2: Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, p2, q1))
        || (o2 == Orientation::Collinear && on_segment(p1, q2, q1))
        || (o3 == Orientation::Collinear && on_segment(p2, p1, q2))
        || (o4 == Orientation::Collinear && on_segment(p2, q1, q2))
}

/// Ray-casting parity test.
///
/// Casts a horizontal ray towards +x and counts the polygon edges whose
/// y-span straddles `pt` (half-open, so shared vertices count once) and whose
/// crossing lies strictly to the right of `pt`. The result is unspecified for
/// points exactly on the boundary.
pub fn point_in_polygon(pt: Point, polygon: &Polygon) -> bool {
    let mut inside = false;
    for (a, b) in polygon.edges() {
        if (a.y > pt.y) == (b.y > pt.y) {
            continue;
        }
        let x_int = (b.x - a.x) * (pt.y - a.y) / (b.y - a.y + DIVISION_GUARD) + a.x;
        if pt.x < x_int {
            inside = !inside;
        }
    }
    inside
}

/// Returns `true` if segment `p–q` enters, touches, or starts/ends inside
/// the polygon.
///
/// # Examples
///
/// ```
/// use u_droneroute::geometry::{segment_intersects_polygon, Point, Polygon};
///
/// let zone = Polygon::rectangle(1.0, -1.0, 2.0, 1.0);
/// assert!(segment_intersects_polygon(Point::new(0.0, 0.0), Point::new(3.0, 0.0), &zone));
/// assert!(!segment_intersects_polygon(Point::new(0.0, 2.0), Point::new(3.0, 2.0), &zone));
/// ```
pub fn segment_intersects_polygon(p: Point, q: Point, polygon: &Polygon) -> bool {
    if point_in_polygon(p, polygon) || point_in_polygon(q, polygon) {
        return true;
    }
    polygon.edges().any(|(a, b)| segments_intersect(p, q, a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn unit_square() -> Polygon {
        Polygon::rectangle(0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn test_orientation_tolerance_boundary() {
        let p = pt(0.0, 0.0);
        let q = pt(1.0, 0.0);
        // cross value magnitude equals the y-offset of r here
        assert_eq!(orientation(p, q, pt(2.0, 5e-10)), Orientation::Collinear);
        assert_eq!(
            orientation(p, q, pt(2.0, 2e-9)),
            Orientation::CounterClockwise
        );
        assert_eq!(orientation(p, q, pt(2.0, -2e-9)), Orientation::Clockwise);
    }

    #[test]
    fn test_orientation_reversal_flips() {
        let (p, q, r) = (pt(0.0, 0.0), pt(3.0, 1.0), pt(1.0, 4.0));
        assert_eq!(orientation(p, q, r), Orientation::CounterClockwise);
        assert_eq!(orientation(r, q, p), Orientation::Clockwise);
    }

    #[test]
    fn test_on_segment_tolerance() {
        let p = pt(0.0, 0.0);
        let r = pt(1.0, 0.0);
        assert!(on_segment(p, pt(0.5, 0.0), r));
        assert!(on_segment(p, pt(1.0 + 5e-10, 0.0), r));
        assert!(!on_segment(p, pt(1.0 + 1e-8, 0.0), r));
    }

    #[test]
    fn test_segments_collinear_overlap() {
        let (a, b) = (pt(0.0, 0.0), pt(2.0, 0.0));
        assert!(segments_intersect(a, b, pt(1.0, 0.0), pt(3.0, 0.0)));
    }

    #[test]
    fn test_segments_collinear_disjoint() {
        let (a, b) = (pt(0.0, 0.0), pt(1.0, 0.0));
        assert!(!segments_intersect(a, b, pt(2.0, 0.0), pt(3.0, 0.0)));
    }

    #[test]
    fn test_segments_t_junction() {
        // endpoint of the second segment lies on the first
        let (a, b) = (pt(0.0, 0.0), pt(2.0, 0.0));
        assert!(segments_intersect(a, b, pt(1.0, 0.0), pt(1.0, 1.0)));
    }

    #[test]
    fn test_segments_parallel() {
        let (a, b) = (pt(0.0, 0.0), pt(2.0, 0.0));
        assert!(!segments_intersect(a, b, pt(0.0, 1.0), pt(2.0, 1.0)));
    }

    #[test]
    fn test_segments_near_miss_beyond_tolerance() {
        let (a, b) = (pt(0.0, 0.0), pt(1.0, 0.0));
        let (c, d) = (pt(1.0 + 1e-6, -1.0), pt(1.0 + 1e-6, 1.0));
        assert!(!segments_intersect(a, b, c, d));
    }

    #[test]
    fn test_point_in_polygon_square() {
        let sq = unit_square();
        assert!(point_in_polygon(pt(0.5, 0.5), &sq));
        assert!(!point_in_polygon(pt(1.5, 0.5), &sq));
        assert!(!point_in_polygon(pt(-0.5, 0.5), &sq));
        assert!(!point_in_polygon(pt(0.5, 2.0), &sq));
    }

    #[test]
    fn test_point_in_polygon_concave() {
        // U-shape opening upwards
        let u = Polygon::new(vec![
            pt(0.0, 0.0),
            pt(3.0, 0.0),
            pt(3.0, 3.0),
            pt(2.0, 3.0),
            pt(2.0, 1.0),
            pt(1.0, 1.0),
            pt(1.0, 3.0),
            pt(0.0, 3.0),
        ])
        .expect("valid");
        assert!(point_in_polygon(pt(0.5, 2.0), &u));
        assert!(point_in_polygon(pt(2.5, 2.0), &u));
        assert!(!point_in_polygon(pt(1.5, 2.0), &u));
        assert!(point_in_polygon(pt(1.5, 0.5), &u));
    }

    #[test]
    fn test_point_in_polygon_vertex_ray() {
        // ray from (−1, 1) passes exactly through vertex (0, 1) of the diamond
        let corners = vec![pt(1.0, 0.0), pt(2.0, 1.0), pt(1.0, 2.0), pt(0.0, 1.0)];
        let diamond = Polygon::new(corners).expect("valid");
        assert!(!point_in_polygon(pt(-1.0, 1.0), &diamond));
        assert!(point_in_polygon(pt(1.0, 1.0), &diamond));
    }

    #[test]
    fn test_segment_inside_convex_polygon() {
        let sq = Polygon::rectangle(0.0, 0.0, 10.0, 10.0);
        assert!(segment_intersects_polygon(pt(2.0, 2.0), pt(8.0, 7.0), &sq));
    }

    #[test]
    fn test_segment_outside_extent() {
        let sq = unit_square();
        assert!(!segment_intersects_polygon(pt(5.0, 5.0), pt(8.0, 9.0), &sq));
    }

    #[test]
    fn test_segment_crossing_through() {
        let sq = unit_square();
        assert!(segment_intersects_polygon(pt(-1.0, 0.5), pt(2.0, 0.5), &sq));
    }

    #[test]
    fn test_segment_grazing_corner() {
        let sq = unit_square();
        // passes exactly through corner (1, 1)
        assert!(segment_intersects_polygon(pt(0.0, 2.0), pt(2.0, 0.0), &sq));
    }

    #[test]
    fn test_segment_one_endpoint_inside() {
        let sq = unit_square();
        assert!(segment_intersects_polygon(pt(0.5, 0.5), pt(5.0, 5.0), &sq));
    }
}
