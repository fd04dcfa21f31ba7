//! Multi-start construct-and-refine heuristic.
//!
//! One deterministic nearest-feasible tour plus `seeds − 1` randomized ones,
//! each refined by obstacle-aware 2-opt, evaluated, and reduced to their
//! Pareto front.

use std::time::Instant;

use rand::Rng;

use crate::constructive::{nearest_feasible_route, randomized_feasible_route};
use crate::evaluation::RouteEvaluator;
use crate::graph::RouteGraph;
use crate::local_search::two_opt_improve;
use crate::models::EvaluatedRoute;
use crate::pareto::ParetoFront;

/// Configuration for the multi-start heuristic.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoHeuristicConfig {
    /// Total number of constructions, the first one deterministic.
    pub seeds: usize,
    /// Sweep cap for 2-opt refinement.
    pub two_opt_iterations: usize,
}

impl Default for GeoHeuristicConfig {
    fn default() -> Self {
        Self {
            seeds: 5,
            two_opt_iterations: 30,
        }
    }
}

impl GeoHeuristicConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of constructions.
    pub fn with_seeds(mut self, seeds: usize) -> Self {
        self.seeds = seeds;
        self
    }

    /// Sets the 2-opt sweep cap.
    pub fn with_two_opt_iterations(mut self, iterations: usize) -> Self {
        self.two_opt_iterations = iterations;
        self
    }
}

/// Greedy construction plus 2-opt, repeated from several starts.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_droneroute::graph::RouteGraph;
/// use u_droneroute::models::Node;
/// use u_droneroute::solver::{GeoHeuristicConfig, GeoHeuristicSolver};
///
/// let nodes = vec![
///     Node::hub(0, 0.0, 0.0),
///     Node::delivery(1, 1.0, 0.0),
///     Node::delivery(2, 1.0, 1.0),
///     Node::delivery(3, 0.0, 1.0),
/// ];
/// let graph = RouteGraph::new(nodes, vec![], 100.0).unwrap();
///
/// let solver = GeoHeuristicSolver::new(GeoHeuristicConfig::default());
/// let front = solver.solve(&graph, 0, &mut StdRng::seed_from_u64(1));
/// assert!((front[0].total_distance - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GeoHeuristicSolver {
    config: GeoHeuristicConfig,
}

impl GeoHeuristicSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: GeoHeuristicConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GeoHeuristicConfig {
        &self.config
    }

    /// Runs all constructions from `start` and returns the Pareto front of
    /// the feasible results.
    pub fn solve<R: Rng>(
        &self,
        graph: &RouteGraph,
        start: usize,
        rng: &mut R,
    ) -> Vec<EvaluatedRoute> {
        let started = Instant::now();
        let evaluator = RouteEvaluator::new(graph);
        let mut front = ParetoFront::new();
        let mut constructed = 0;

        let base = nearest_feasible_route(graph, start);
        let randomized = (1..self.config.seeds)
            .map(|_| randomized_feasible_route(graph, start, rng))
            .collect::<Vec<_>>();

        for route in std::iter::once(base).chain(randomized).flatten() {
            constructed += 1;
            let (refined, _) = two_opt_improve(&route, graph, self.config.two_opt_iterations);
            match evaluator.evaluate(&refined).into_route() {
                Some(evaluated) => {
                    front.insert(evaluated);
                }
                None => log::trace!("geo heuristic: refined tour {:?} infeasible", refined),
            }
        }

        log::debug!(
            "geo heuristic: {} of {} constructions succeeded, front size {}, {:?}",
            constructed,
            self.config.seeds.max(1),
            front.len(),
            started.elapsed()
        );
        front.into_vec()
    }
}
