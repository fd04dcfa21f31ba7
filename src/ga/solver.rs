//! Generational genetic algorithm over tour permutations.
//!
//! # Algorithm
//!
//! 1. Seed the population with the greedy nearest-feasible tour, then with
//!    random shuffles of the non-start nodes, keeping only feasible ones.
//! 2. Each generation, build offspring by Pareto binary tournament, order
//!    crossover and swap mutation. Only feasible children are kept.
//! 3. The next population is the Pareto front of parents and offspring,
//!    keeping one member per gene order, padded with offspring that did not
//!    make the front if it is smaller than the target size.
//! 4. After the last generation, return the Pareto front of the population.
//!
//! Both the seeding loop and each generation's offspring loop stop after
//! `population_size × max(100, 50n)` attempts.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use u_metaheur::ga::operators::swap_mutation;

use crate::constructive::nearest_feasible_route;
use crate::evaluation::RouteEvaluator;
use crate::graph::RouteGraph;
use crate::models::EvaluatedRoute;
use crate::pareto::pareto_front;

use super::chromosome::Chromosome;
use super::operators::{order_crossover, tournament};

/// Configuration for the genetic algorithm.
///
/// # Examples
///
/// ```
/// use u_droneroute::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_generations(200)
///     .with_mutation_rate(1.5);
/// assert_eq!(config.population_size(), 50);
/// assert_eq!(config.generations(), 200);
/// assert_eq!(config.mutation_rate(), 1.0); // clamped
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GaConfig {
    population_size: usize,
    generations: usize,
    mutation_rate: f64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            generations: 120,
            mutation_rate: 0.2,
        }
    }
}

impl GaConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    /// Sets the mutation probability, clamped to `[0, 1]`. NaN becomes 0.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = if rate.is_nan() {
            0.0
        } else {
            rate.clamp(0.0, 1.0)
        };
        self
    }

    /// Target population size.
    pub fn population_size(&self) -> usize {
        self.population_size
    }

    /// Number of generations.
    pub fn generations(&self) -> usize {
        self.generations
    }

    /// Probability of mutating a child.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    fn max_attempts(&self, node_count: usize) -> usize {
        let per_slot = node_count.saturating_mul(50).max(100);
        self.population_size.saturating_mul(per_slot)
    }
}

/// Pareto genetic algorithm solver.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_droneroute::ga::{GaConfig, MetaheuristicSolver};
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
/// let solver = MetaheuristicSolver::new(GaConfig::default().with_generations(20));
/// let front = solver.solve(&graph, 0, &mut StdRng::seed_from_u64(42));
/// assert!(!front.is_empty());
/// assert!((front[0].total_distance - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetaheuristicSolver {
    config: GaConfig,
}

impl MetaheuristicSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Evolves tours from `start` and returns the final Pareto front.
    ///
    /// Returns an empty front if `start` is out of range or no feasible
    /// tour was found while seeding.
    pub fn solve<R: Rng>(
        &self,
        graph: &RouteGraph,
        start: usize,
        rng: &mut R,
    ) -> Vec<EvaluatedRoute> {
        let n = graph.len();
        if start >= n {
            return Vec::new();
        }

        let evaluator = RouteEvaluator::new(graph);
        let pop_size = self.config.population_size;
        let max_attempts = self.config.max_attempts(n);

        let mut population = self.seed(graph, start, &evaluator, rng);
        if population.is_empty() {
            log::debug!("metaheuristic: no feasible individual after seeding");
            return Vec::new();
        }

        let mut generations_run = 0;
        for _ in 0..self.config.generations {
            let mut offspring: Vec<Chromosome> = Vec::with_capacity(pop_size);
            let mut attempts = 0;
            while offspring.len() < pop_size && attempts < max_attempts {
                attempts += 1;
                let Some(p1) = tournament(&population, rng) else {
                    break;
                };
                let Some(p2) = tournament(&population, rng) else {
                    break;
                };
                let mut genes = order_crossover(p1.genes(), p2.genes(), rng);
                self.mutate(&mut genes, rng);
                if let Some(child) = Chromosome::evaluate(genes, start, &evaluator) {
                    offspring.push(child);
                }
            }

            if offspring.is_empty() {
                log::trace!("metaheuristic: no feasible offspring, stopping early");
                break;
            }
            generations_run += 1;

            population = survivors(population, offspring, pop_size);
        }

        let front: Vec<EvaluatedRoute> = pareto_front(population)
            .into_iter()
            .map(Chromosome::into_route)
            .collect();
        log::debug!(
            "metaheuristic: {} generations, front size {}",
            generations_run,
            front.len()
        );
        front
    }

    fn mutate<R: Rng>(&self, genes: &mut Vec<usize>, rng: &mut R) {
        if rng.random_bool(self.config.mutation_rate) && genes.len() >= 2 {
            swap_mutation(genes, rng);
        }
    }

    fn seed<R: Rng>(
        &self,
        graph: &RouteGraph,
        start: usize,
        evaluator: &RouteEvaluator<'_>,
        rng: &mut R,
    ) -> Vec<Chromosome> {
        let n = graph.len();
        let pop_size = self.config.population_size;
        let mut population = Vec::with_capacity(pop_size);

        if let Some(route) = nearest_feasible_route(graph, start) {
            let genes = route[1..route.len() - 1].to_vec();
            if let Some(greedy) = Chromosome::evaluate(genes, start, evaluator) {
                population.push(greedy);
            }
        }

        let inner: Vec<usize> = (0..n).filter(|&v| v != start).collect();
        let max_attempts = self.config.max_attempts(n);
        let mut attempts = 0;
        while population.len() < pop_size && attempts < max_attempts {
            attempts += 1;
            let mut genes = inner.clone();
            genes.shuffle(rng);
            if let Some(individual) = Chromosome::evaluate(genes, start, evaluator) {
                population.push(individual);
            }
        }

        log::trace!(
            "metaheuristic: seeded {} of {} after {} attempts",
            population.len(),
            pop_size,
            attempts
        );
        population
    }
}

/// Builds the next population from the current one and its offspring.
///
/// Keeps the Pareto front of both, one member per gene order. If that is
/// smaller than `pop_size`, offspring whose gene order is not yet present
/// are taken from the end of `offspring` until the target is reached.
fn survivors(
    population: Vec<Chromosome>,
    mut offspring: Vec<Chromosome>,
    pop_size: usize,
) -> Vec<Chromosome> {
    let merged = pareto_front(population.into_iter().chain(offspring.iter().cloned()));
    let mut seen: HashSet<Vec<usize>> = HashSet::with_capacity(merged.len());
    let mut next: Vec<Chromosome> = merged
        .into_iter()
        .filter(|c| seen.insert(c.genes().to_vec()))
        .collect();

    while next.len() < pop_size {
        let Some(child) = offspring.pop() else {
            break;
        };
        if seen.insert(child.genes().to_vec()) {
            next.push(child);
        }
    }
    next
}
