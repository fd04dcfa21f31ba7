//! Permutation chromosome for tour search.
//!
//! A chromosome holds the visiting order of every node except the start. The
//! closed route is `[start] ++ genes ++ [start]`. Only feasible chromosomes
//! enter a population, so each one carries its evaluated objectives.

use crate::evaluation::RouteEvaluator;
use crate::models::EvaluatedRoute;
use crate::pareto::Objectives;

/// A feasible individual: gene order plus its evaluated route.
///
/// # Examples
///
/// ```
/// use u_droneroute::evaluation::RouteEvaluator;
/// use u_droneroute::ga::Chromosome;
/// use u_droneroute::graph::RouteGraph;
/// use u_droneroute::models::Node;
///
/// let nodes = vec![
///     Node::hub(0, 0.0, 0.0),
///     Node::delivery(1, 3.0, 0.0),
///     Node::delivery(2, 3.0, 4.0),
/// ];
/// let graph = RouteGraph::new(nodes, vec![], 100.0).unwrap();
/// let evaluator = RouteEvaluator::new(&graph);
///
/// let c = Chromosome::evaluate(vec![1, 2], 0, &evaluator).unwrap();
/// assert_eq!(c.route().route, vec![0, 1, 2, 0]);
/// assert!((c.route().total_distance - 12.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Chromosome {
    genes: Vec<usize>,
    route: EvaluatedRoute,
}

impl Chromosome {
    /// Evaluates a gene order as a closed tour from `start`.
    ///
    /// Returns `None` if the tour is infeasible.
    pub fn evaluate(
        genes: Vec<usize>,
        start: usize,
        evaluator: &RouteEvaluator<'_>,
    ) -> Option<Self> {
        let path = closed_route(&genes, start);
        let route = evaluator.evaluate(&path).into_route()?;
        Some(Self { genes, route })
    }

    /// Returns the gene order.
    pub fn genes(&self) -> &[usize] {
        &self.genes
    }

    /// Returns the evaluated route.
    pub fn route(&self) -> &EvaluatedRoute {
        &self.route
    }

    /// Consumes the chromosome and returns its evaluated route.
    pub fn into_route(self) -> EvaluatedRoute {
        self.route
    }
}

impl Objectives for Chromosome {
    fn distance(&self) -> f64 {
        self.route.total_distance
    }

    fn risk(&self) -> f64 {
        self.route.total_risk
    }

    fn recharges(&self) -> usize {
        self.route.recharge_count
    }
}

/// Builds `[start] ++ genes ++ [start]`.
pub fn closed_route(genes: &[usize], start: usize) -> Vec<usize> {
    let mut path = Vec::with_capacity(genes.len() + 2);
    path.push(start);
    path.extend_from_slice(genes);
    path.push(start);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use crate::graph::RouteGraph;
    use crate::models::Node;

    fn triangle(polygons: Vec<Polygon>) -> RouteGraph {
        let nodes = vec![
            Node::hub(0, 0.0, 0.0),
            Node::delivery(1, 3.0, 0.0),
            Node::delivery(2, 3.0, 4.0),
        ];
        RouteGraph::new(nodes, polygons, 100.0).expect("valid")
    }

    #[test]
    fn test_closed_route() {
        assert_eq!(closed_route(&[2, 1], 0), vec![0, 2, 1, 0]);
        assert_eq!(closed_route(&[], 3), vec![3, 3]);
    }

    #[test]
    fn test_evaluate_feasible() {
        let g = triangle(vec![]);
        let ev = RouteEvaluator::new(&g);
        let c = Chromosome::evaluate(vec![2, 1], 0, &ev).expect("feasible");
        assert_eq!(c.genes(), &[2, 1]);
        assert_eq!(c.route().route, vec![0, 2, 1, 0]);
        assert!((c.distance() - 12.0).abs() < 1e-10);
        assert_eq!(c.recharges(), 0);
        assert_eq!(c.risk(), c.route().total_risk);
    }

    #[test]
    fn test_evaluate_blocked() {
        // wall across the 1-2 leg
        let wall = Polygon::rectangle(2.0, 1.0, 4.0, 2.0);
        let g = triangle(vec![wall]);
        let ev = RouteEvaluator::new(&g);
        assert!(Chromosome::evaluate(vec![1, 2], 0, &ev).is_none());
    }

    #[test]
    fn test_into_route() {
        let g = triangle(vec![]);
        let ev = RouteEvaluator::new(&g);
        let c = Chromosome::evaluate(vec![1, 2], 0, &ev).expect("feasible");
        let route = c.clone().into_route();
        assert_eq!(&route, c.route());
    }
}
