//! Obstacle-aware 2-opt improvement of a closed tour.
//!
//! # Algorithm
//!
//! For positions `1 ≤ i < k ≤ len−2` of a closed route, let `a = r[i−1]`,
//! `b = r[i]`, `c = r[k]`, `d = r[k+1]`. Reversing `r[i..=k]` replaces edges
//! a–b and c–d by a–c and b–d:
//!
//! ```text
//! delta = d(a, c) + d(b, d) - d(a, b) - d(c, d)
//! ```
//!
//! A move is accepted only if both new edges are unobstructed and
//! `delta < -1e-9`. The first improving move is applied and the sweep starts
//! over; the search stops after a sweep without improvement or after
//! `max_iterations` sweeps. Only distance is optimized; battery feasibility
//! is left to the evaluator.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use crate::graph::RouteGraph;

/// Minimum distance gain for a move to count as an improvement.
const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Applies bounded 2-opt to a closed route.
///
/// Returns the improved route and its total distance. Routes with fewer than
/// four entries are returned unchanged.
///
/// # Examples
///
/// ```
/// use u_droneroute::graph::RouteGraph;
/// use u_droneroute::models::Node;
/// use u_droneroute::local_search::two_opt_improve;
///
/// let nodes = vec![
///     Node::hub(0, 0.0, 0.0),
///     Node::delivery(1, 1.0, 0.0),
///     Node::delivery(2, 1.0, 1.0),
///     Node::delivery(3, 0.0, 1.0),
/// ];
/// let graph = RouteGraph::new(nodes, vec![], 100.0).unwrap();
///
/// // crossing tour 0→2→1→3→0
/// let (improved, dist) = two_opt_improve(&[0, 2, 1, 3, 0], &graph, 30);
/// assert!((dist - 4.0).abs() < 1e-10);
/// assert_eq!(improved.first(), Some(&0));
/// assert_eq!(improved.last(), Some(&0));
/// ```
pub fn two_opt_improve(
    route: &[usize],
    graph: &RouteGraph,
    max_iterations: usize,
) -> (Vec<usize>, f64) {
    let mut current = route.to_vec();
    let len = current.len();

    if len >= 4 {
        for _ in 0..max_iterations {
            match find_improving_move(&current, graph) {
                Some((i, k)) => current[i..=k].reverse(),
                None => break,
            }
        }
    }

    let dist = route_distance(&current, graph);
    (current, dist)
}

/// Scans candidates in order and returns the first improving feasible move.
fn find_improving_move(route: &[usize], graph: &RouteGraph) -> Option<(usize, usize)> {
    let len = route.len();
    for i in 1..len - 2 {
        for k in (i + 1)..len - 1 {
            let (a, b, c, d) = (route[i - 1], route[i], route[k], route[k + 1]);
            if !graph.edge_feasible(a, c) || !graph.edge_feasible(b, d) {
                continue;
            }
            if two_opt_delta(graph, a, b, c, d) < -IMPROVEMENT_EPSILON {
                return Some((i, k));
            }
        }
    }
    None
}

/// Distance change from replacing a–b, c–d with a–c, b–d.
fn two_opt_delta(graph: &RouteGraph, a: usize, b: usize, c: usize, d: usize) -> f64 {
    let old_cost = graph.weight(a, b).distance + graph.weight(c, d).distance;
    let new_cost = graph.weight(a, c).distance + graph.weight(b, d).distance;
    new_cost - old_cost
}

/// Sum of edge lengths along a route, ignoring feasibility.
pub fn route_distance(route: &[usize], graph: &RouteGraph) -> f64 {
    route
        .windows(2)
        .map(|pair| graph.weight(pair[0], pair[1]).distance)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::models::Node;

    fn square(polygons: Vec<Polygon>) -> RouteGraph {
        let nodes = vec![
            Node::hub(0, 0.0, 0.0),
            Node::delivery(1, 1.0, 0.0),
            Node::delivery(2, 1.0, 1.0),
            Node::delivery(3, 0.0, 1.0),
        ];
        RouteGraph::new(nodes, polygons, 100.0).expect("valid")
    }

    #[test]
    fn test_2opt_already_optimal() {
        let g = square(vec![]);
        let (improved, dist) = two_opt_improve(&[0, 1, 2, 3, 0], &g, 30);
        assert_eq!(improved, vec![0, 1, 2, 3, 0]);
        assert!((dist - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_uncrosses() {
        let g = square(vec![]);
        // 0→1→3→2→0 crosses itself; the only improving move is (i=2, k=3)
        let (improved, dist) = two_opt_improve(&[0, 1, 3, 2, 0], &g, 30);
        assert_eq!(improved, vec![0, 1, 2, 3, 0]);
        assert!((dist - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_2opt_removes_blocked_diagonals() {
        // a small box at the centre blocks both diagonals
        let blocker = Polygon::rectangle(0.4, 0.4, 0.6, 0.6);
        let g = square(vec![blocker]);
        assert!(!g.edge_feasible(0, 2));
        assert!(!g.edge_feasible(1, 3));
        // the new edges 0-1 and 2-3 are both clear
        let (improved, _) = two_opt_improve(&[0, 2, 1, 3, 0], &g, 30);
        assert_eq!(improved, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_2opt_never_introduces_blocked_edge() {
        // wall across side 1-2 makes the uncrossing move illegal
        let wall = Polygon::rectangle(0.9, 0.4, 1.1, 0.6);
        let g = square(vec![wall]);
        assert!(!g.edge_feasible(1, 2));
        assert!(g.edge_feasible(1, 3));
        let (improved, _) = two_opt_improve(&[0, 1, 3, 2, 0], &g, 30);
        assert_eq!(improved, vec![0, 1, 3, 2, 0]);
    }

    #[test]
    fn test_2opt_zero_iterations() {
        let g = square(vec![]);
        let (improved, _) = two_opt_improve(&[0, 1, 3, 2, 0], &g, 0);
        assert_eq!(improved, vec![0, 1, 3, 2, 0]);
    }

    #[test]
    fn test_2opt_short_routes() {
        let g = square(vec![]);
        let (improved, dist) = two_opt_improve(&[0, 1, 0], &g, 30);
        assert_eq!(improved, vec![0, 1, 0]);
        assert!((dist - 2.0).abs() < 1e-10);
        let (improved, dist) = two_opt_improve(&[], &g, 30);
        assert!(improved.is_empty());
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn test_2opt_does_not_worsen() {
        let nodes = vec![
            Node::hub(0, 5.0, 5.0),
            Node::delivery(1, 0.0, 0.0),
            Node::delivery(2, 10.0, 0.0),
            Node::delivery(3, 0.0, 10.0),
            Node::delivery(4, 10.0, 10.0),
        ];
        let g = RouteGraph::new(nodes, vec![], 100.0).expect("valid");
        let initial = [0, 1, 4, 2, 3, 0];
        let initial_dist = route_distance(&initial, &g);
        let (_, improved_dist) = two_opt_improve(&initial, &g, 30);
        assert!(improved_dist < initial_dist);
    }

    #[test]
    fn test_route_distance() {
        let g = square(vec![]);
        assert!((route_distance(&[0, 1, 2, 3, 0], &g) - 4.0).abs() < 1e-10);
    }
}
