//! Nearest-feasible-successor constructive heuristic.
//!
//! Builds a tour greedily: starting from the start node, always move to the
//! unvisited node reachable by an unobstructed edge with the lowest
//! `distance + risk`. The randomized variant picks uniformly among the best
//! three candidates instead, which diversifies multi-start runs.
//!
//! There is no backtracking: if some step has no feasible successor the
//! construction fails. The closing edge back to the start is appended
//! without a feasibility check; evaluation rejects the tour if needed.
//!
//! # Complexity
//!
//! O(n² log n) with the candidate sort, O(n²) feasibility lookups.

use rand::Rng;

use crate::graph::RouteGraph;

/// Number of best-scored candidates the randomized variant draws from.
pub const RANDOMIZED_TOP_K: usize = 3;

#[derive(Debug, Clone, Copy)]
struct Candidate {
    node: usize,
    score: f64,
}

/// Constructs a closed tour by always taking the cheapest feasible successor.
///
/// Ties are broken by node index. Returns `None` if the construction reaches
/// a node with no feasible unvisited successor, or if `start` is out of
/// range.
///
/// # Examples
///
/// ```
/// use u_droneroute::graph::RouteGraph;
/// use u_droneroute::models::Node;
/// use u_droneroute::constructive::nearest_feasible_route;
///
/// let nodes = vec![
///     Node::hub(0, 0.0, 0.0),
///     Node::delivery(1, 10.0, 0.0),
///     Node::delivery(2, 1.0, 0.0),
/// ];
/// let graph = RouteGraph::new(nodes, vec![], 100.0).unwrap();
///
/// assert_eq!(nearest_feasible_route(&graph, 0), Some(vec![0, 2, 1, 0]));
/// ```
pub fn nearest_feasible_route(graph: &RouteGraph, start: usize) -> Option<Vec<usize>> {
    construct(graph, start, |_| 0)
}

/// Randomized variant of [`nearest_feasible_route`].
///
/// At each step, draws uniformly among the [`RANDOMIZED_TOP_K`] best
/// candidates (fewer if fewer exist). No random number is consumed when only
/// one candidate is available.
pub fn randomized_feasible_route<R: Rng>(
    graph: &RouteGraph,
    start: usize,
    rng: &mut R,
) -> Option<Vec<usize>> {
    construct(graph, start, |candidates| {
        if candidates.len() > 1 {
            rng.random_range(0..candidates.len().min(RANDOMIZED_TOP_K))
        } else {
            0
        }
    })
}

fn construct<F>(graph: &RouteGraph, start: usize, mut pick: F) -> Option<Vec<usize>>
where
    F: FnMut(&[Candidate]) -> usize,
{
    let n = graph.len();
    if start >= n {
        return None;
    }

    let mut visited = vec![false; n];
    visited[start] = true;
    let mut route = Vec::with_capacity(n + 1);
    route.push(start);
    let mut candidates = Vec::with_capacity(n);

    while route.len() < n {
        let current = route[route.len() - 1];
        candidates.clear();
        for v in 0..n {
            if visited[v] || !graph.edge_feasible(current, v) {
                continue;
            }
            let w = graph.weight(current, v);
            candidates.push(Candidate {
                node: v,
                score: w.distance + w.risk,
            });
        }
        if candidates.is_empty() {
            return None;
        }

        // stable: equal scores keep index order
        candidates.sort_by(|a, b| a.score.total_cmp(&b.score));
        let next = candidates[pick(&candidates)].node;

        visited[next] = true;
        route.push(next);
    }

    route.push(start);
    Some(route)
}
