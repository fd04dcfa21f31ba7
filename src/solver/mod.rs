//! Strategy selection and the single solve entry point.
//!
//! - [`Strategy`] — which solver to run, parseable from its name
//! - [`SolveOptions`] — start node and every solver's knobs in one place
//! - [`solve`] / [`solve_replicated`] — run a strategy once or several times
//! - [`GeoHeuristicSolver`] — multi-start construct-and-refine heuristic

mod geo_heuristic;

pub use geo_heuristic::{GeoHeuristicConfig, GeoHeuristicSolver};

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exact::{ExactConfig, ExactSolver};
use crate::ga::{GaConfig, MetaheuristicSolver};
use crate::graph::RouteGraph;
use crate::models::EvaluatedRoute;
use crate::pareto::{dedup_by_route, pareto_front};

/// Solver strategy.
///
/// # Examples
///
/// ```
/// use u_droneroute::solver::Strategy;
///
/// let s: Strategy = "exact_bb".parse().unwrap();
/// assert_eq!(s, Strategy::ExactBb);
/// assert_eq!(s.to_string(), "exact_bb");
/// assert!("simulated_annealing".parse::<Strategy>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Exhaustive enumeration with a time limit.
    ExactBb,
    /// Greedy construction plus 2-opt, multi-start.
    #[default]
    GeoHeuristic,
    /// Pareto genetic algorithm.
    Metaheuristic,
}

impl Strategy {
    /// Every strategy, in a fixed order.
    pub const ALL: [Strategy; 3] = [
        Strategy::ExactBb,
        Strategy::GeoHeuristic,
        Strategy::Metaheuristic,
    ];

    /// The strategy's name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::ExactBb => "exact_bb",
            Strategy::GeoHeuristic => "geo_heuristic",
            Strategy::Metaheuristic => "metaheuristic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| Error::UnknownStrategy(s.to_string()))
    }
}

/// Options for [`solve`].
///
/// Only the fields relevant to the chosen strategy are read: `time_limit`
/// for the exact solver, `seeds` for the heuristic, and the population
/// fields for the metaheuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolveOptions {
    /// Solver to run.
    pub strategy: Strategy,
    /// Index of the node every route starts and ends at.
    pub start: usize,
    /// Wall-clock budget of the exact solver.
    pub time_limit: Duration,
    /// Number of heuristic constructions.
    pub seeds: usize,
    /// Metaheuristic population size.
    pub population_size: usize,
    /// Metaheuristic generation count.
    pub generations: usize,
    /// Metaheuristic mutation probability, clamped to `[0, 1]` when used.
    pub mutation_rate: f64,
}

impl Default for SolveOptions {
    fn default() -> Self {
        let ga = GaConfig::default();
        let heuristic = GeoHeuristicConfig::default();
        Self {
            strategy: Strategy::default(),
            start: 0,
            time_limit: ExactConfig::default().time_limit,
            seeds: heuristic.seeds,
            population_size: ga.population_size(),
            generations: ga.generations(),
            mutation_rate: ga.mutation_rate(),
        }
    }
}

impl SolveOptions {
    /// Creates options for `strategy` with default values otherwise.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// Sets the start node.
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = start;
        self
    }

    /// Sets the exact solver's time limit.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Sets the number of heuristic constructions.
    pub fn with_seeds(mut self, seeds: usize) -> Self {
        self.seeds = seeds;
        self
    }

    /// Sets the metaheuristic population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the metaheuristic generation count.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the metaheuristic mutation probability.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Checks the options against a graph.
    ///
    /// The population size is only checked for [`Strategy::Metaheuristic`].
    pub fn validate(&self, graph: &RouteGraph) -> Result<()> {
        if self.start >= graph.len() {
            return Err(Error::InvalidStart {
                start: self.start,
                nodes: graph.len(),
            });
        }
        if self.strategy == Strategy::Metaheuristic && self.population_size == 0 {
            return Err(Error::InvalidConfig("population size must be at least 1".into()));
        }
        Ok(())
    }

    fn exact_config(&self) -> ExactConfig {
        ExactConfig::new().with_time_limit(self.time_limit)
    }

    fn heuristic_config(&self) -> GeoHeuristicConfig {
        GeoHeuristicConfig::new().with_seeds(self.seeds)
    }

    fn ga_config(&self) -> GaConfig {
        GaConfig::new()
            .with_population_size(self.population_size)
            .with_generations(self.generations)
            .with_mutation_rate(self.mutation_rate)
    }
}

/// Outcome of one [`solve`] call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveResult {
    /// Non-dominated feasible routes; empty if none was found.
    pub front: Vec<EvaluatedRoute>,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// `true` if the exact solver hit its time limit.
    pub timed_out: bool,
}

/// Outcome of [`solve_replicated`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicatedResult {
    /// Merged non-dominated routes, each node sequence once.
    pub front: Vec<EvaluatedRoute>,
    /// Wall-clock time of each replica, in run order.
    pub elapsed: Vec<Duration>,
    /// `true` if any replica hit the time limit.
    pub timed_out: bool,
}

/// Runs the chosen strategy once.
///
/// Fails only on invalid options; an instance without feasible routes gives
/// an empty front.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_droneroute::graph::RouteGraph;
/// use u_droneroute::models::Node;
/// use u_droneroute::solver::{solve, SolveOptions, Strategy};
///
/// let nodes = vec![
///     Node::hub(0, 0.0, 0.0),
///     Node::delivery(1, 1.0, 0.0),
///     Node::delivery(2, 1.0, 1.0),
///     Node::delivery(3, 0.0, 1.0),
/// ];
/// let graph = RouteGraph::new(nodes, vec![], 100.0).unwrap();
///
/// let options = SolveOptions::new(Strategy::ExactBb);
/// let result = solve(&graph, &options, &mut StdRng::seed_from_u64(0)).unwrap();
/// assert!(!result.timed_out);
/// assert_eq!(result.front.len(), 2); // the perimeter, both directions
/// ```
pub fn solve<R: Rng>(
    graph: &RouteGraph,
    options: &SolveOptions,
    rng: &mut R,
) -> Result<SolveResult> {
    options.validate(graph)?;
    let started = Instant::now();

    let (front, timed_out) = match options.strategy {
        Strategy::ExactBb => {
            let outcome = ExactSolver::new(options.exact_config()).solve(graph, options.start);
            (outcome.front, outcome.timed_out)
        }
        Strategy::GeoHeuristic => {
            let solver = GeoHeuristicSolver::new(options.heuristic_config());
            (solver.solve(graph, options.start, rng), false)
        }
        Strategy::Metaheuristic => {
            let solver = MetaheuristicSolver::new(options.ga_config());
            (solver.solve(graph, options.start, rng), false)
        }
    };

    let elapsed = started.elapsed();
    log::debug!(
        "{}: front size {}, {:?}{}",
        options.strategy,
        front.len(),
        elapsed,
        if timed_out { " (timed out)" } else { "" }
    );

    Ok(SolveResult {
        front,
        elapsed,
        timed_out,
    })
}

/// Runs the chosen strategy `replicas` times and merges the fronts.
///
/// The merged front is reduced with [`pareto_front`], then repeated node
/// sequences are dropped with [`dedup_by_route`].
pub fn solve_replicated<R: Rng>(
    graph: &RouteGraph,
    options: &SolveOptions,
    replicas: usize,
    rng: &mut R,
) -> Result<ReplicatedResult> {
    if replicas == 0 {
        return Err(Error::InvalidConfig("replicas must be at least 1".into()));
    }

    let mut pooled = Vec::new();
    let mut elapsed = Vec::with_capacity(replicas);
    let mut timed_out = false;
    for _ in 0..replicas {
        let result = solve(graph, options, rng)?;
        pooled.extend(result.front);
        elapsed.push(result.elapsed);
        timed_out |= result.timed_out;
    }

    let front = dedup_by_route(pareto_front(pooled));
    log::debug!(
        "{} x{}: merged front size {}",
        options.strategy,
        replicas,
        front.len()
    );

    Ok(ReplicatedResult {
        front,
        elapsed,
        timed_out,
    })
}
