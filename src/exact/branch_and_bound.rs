//! Exhaustive depth-first tour enumeration with a wall-clock deadline.
//!
//! # Algorithm
//!
//! Enumerates every permutation of the non-start nodes as an explicit stack
//! of frames. Each frame stores a cursor: the next candidate node to try at
//! that depth. A node is pushed only if the edge from the current tail is
//! unobstructed and it is not yet on the path. When the path holds every
//! node, the closing edge back to the start is appended and the cycle is
//! evaluated; feasible cycles are folded into the running Pareto front at
//! once, so the front is valid whenever the search stops.
//!
//! The deadline is checked before a frame is expanded. When it passes, the
//! remaining frames are dropped and the front found so far is returned.
//! Edge feasibility is queried lazily from the graph's cache, so the
//! deadline also bounds the obstacle geometry work.
//!
//! # Complexity
//!
//! O(n!) cycles in the worst case. Only practical for small instances
//! (roughly a dozen nodes) or with a tight time limit.

use std::time::{Duration, Instant};

use crate::evaluation::RouteEvaluator;
use crate::graph::RouteGraph;
use crate::models::EvaluatedRoute;
use crate::pareto::ParetoFront;

/// Configuration for the exact solver.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_droneroute::exact::ExactConfig;
///
/// let config = ExactConfig::default().with_time_limit(Duration::from_secs(5));
/// assert_eq!(config.time_limit, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExactConfig {
    /// Wall-clock budget for the whole search.
    pub time_limit: Duration,
}

impl Default for ExactConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(30),
        }
    }
}

impl ExactConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }
}

/// Result of an exact search.
#[derive(Debug, Clone)]
pub struct ExactOutcome {
    /// Non-dominated feasible cycles found.
    pub front: Vec<EvaluatedRoute>,
    /// `true` if the deadline cut the enumeration short.
    pub timed_out: bool,
    /// Number of complete cycles that were evaluated.
    pub cycles_evaluated: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
}

/// Exhaustive branch-and-bound solver.
///
/// # Examples
///
/// ```
/// use u_droneroute::exact::{ExactConfig, ExactSolver};
/// use u_droneroute::graph::RouteGraph;
/// use u_droneroute::models::Node;
///
/// let nodes = vec![
///     Node::hub(0, 0.0, 0.0),
///     Node::delivery(1, 1.0, 0.0),
///     Node::delivery(2, 1.0, 1.0),
///     Node::delivery(3, 0.0, 1.0),
/// ];
/// let graph = RouteGraph::new(nodes, vec![], 100.0).unwrap();
///
/// let outcome = ExactSolver::new(ExactConfig::default()).solve(&graph, 0);
/// assert!(!outcome.timed_out);
/// assert!((outcome.front[0].total_distance - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExactSolver {
    config: ExactConfig,
}

impl ExactSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: ExactConfig) -> Self {
        Self { config }
    }

    /// Enumerates all tours starting and ending at `start`.
    ///
    /// Returns an empty front if `start` is not a node of the graph.
    pub fn solve(&self, graph: &RouteGraph, start: usize) -> ExactOutcome {
        let started = Instant::now();
        let deadline = started + self.config.time_limit;
        let n = graph.len();

        let mut front = ParetoFront::new();
        let mut cycles_evaluated = 0;
        let mut timed_out = false;

        if start < n {
            let evaluator = RouteEvaluator::new(graph);

            let mut visited = vec![false; n];
            visited[start] = true;
            let mut path = Vec::with_capacity(n + 1);
            path.push(start);
            // cursor per depth: next candidate to try
            let mut cursors = vec![0usize];

            while let Some(&cursor) = cursors.last() {
                if Instant::now() >= deadline {
                    timed_out = true;
                    break;
                }

                let next = if path.len() == n {
                    path.push(start);
                    cycles_evaluated += 1;
                    if let Some(route) = evaluator.evaluate(&path).into_route() {
                        front.insert(route);
                    }
                    path.pop();
                    None
                } else {
                    let tail = path[path.len() - 1];
                    let open = |v: usize| !visited[v] && graph.edge_feasible(tail, v);
                    (cursor..n).find(|&v| open(v))
                };

                match next {
                    Some(v) => {
                        if let Some(top) = cursors.last_mut() {
                            *top = v + 1;
                        }
                        visited[v] = true;
                        path.push(v);
                        cursors.push(0);
                    }
                    None => {
                        cursors.pop();
                        if path.len() > 1 {
                            if let Some(v) = path.pop() {
                                visited[v] = false;
                            }
                        }
                    }
                }
            }
        }

        let elapsed = started.elapsed();
        log::debug!(
            "exact search: {} cycles evaluated, front size {}, timed out: {}, {:?}",
            cycles_evaluated,
            front.len(),
            timed_out,
            elapsed
        );

        ExactOutcome {
            front: front.into_vec(),
            timed_out,
            cycles_evaluated,
            elapsed,
        }
    }
}
