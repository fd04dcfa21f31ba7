//! Battery-aware route evaluator.

use crate::graph::RouteGraph;
use crate::models::{EvaluatedRoute, Node};

/// Slack allowed when comparing an edge's battery cost against capacity.
const BATTERY_TOLERANCE: f64 = 1e-9;

/// Why a route cannot be flown.
#[derive(Debug, Clone, PartialEq)]
pub enum Infeasibility {
    /// Fewer than two entries; there is no edge to fly.
    RouteTooShort {
        /// Number of entries in the route.
        len: usize,
    },
    /// The straight edge crosses a no-fly polygon.
    ObstructedEdge {
        /// Tail of the edge.
        from: usize,
        /// Head of the edge.
        to: usize,
    },
    /// The edge costs more than a full battery.
    EdgeExceedsCapacity {
        /// Tail of the edge.
        from: usize,
        /// Head of the edge.
        to: usize,
        /// Battery cost of the edge.
        cost: f64,
    },
    /// The next edge needs a recharge at a node that cannot provide one.
    NoChargerAvailable {
        /// Node where the recharge would be needed.
        at: usize,
        /// Battery left on arrival.
        remaining: f64,
        /// Battery cost of the next edge.
        needed: f64,
    },
}

/// Outcome of evaluating a route.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The route can be flown; carries its objectives.
    Feasible(EvaluatedRoute),
    /// The route breaks a constraint.
    Infeasible(Infeasibility),
}

impl Evaluation {
    /// `true` for [`Evaluation::Feasible`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Evaluation::Feasible(_))
    }

    /// The evaluated route, if feasible.
    pub fn into_route(self) -> Option<EvaluatedRoute> {
        match self {
            Evaluation::Feasible(r) => Some(r),
            Evaluation::Infeasible(_) => None,
        }
    }

    /// The failure reason, if infeasible.
    pub fn infeasibility(&self) -> Option<&Infeasibility> {
        match self {
            Evaluation::Feasible(_) => None,
            Evaluation::Infeasible(reason) => Some(reason),
        }
    }
}

/// Battery state while walking a route.
///
/// Recharging is lazy: it happens only when the next edge cannot be paid
/// from the current level.
#[derive(Debug, Clone)]
struct Battery {
    capacity: f64,
    level: f64,
    recharges: usize,
}

impl Battery {
    fn full(capacity: f64) -> Self {
        Self {
            capacity,
            level: capacity,
            recharges: 0,
        }
    }

    /// Flies edge `from → to` of the given cost, recharging at `from` if
    /// needed.
    fn fly(&mut self, from: usize, node: &Node, to: usize, cost: f64) -> Result<(), Infeasibility> {
        if cost > self.capacity + BATTERY_TOLERANCE {
            return Err(Infeasibility::EdgeExceedsCapacity { from, to, cost });
        }
        if self.level < cost {
            if !node.can_recharge() {
                return Err(Infeasibility::NoChargerAvailable {
                    at: from,
                    remaining: self.level,
                    needed: cost,
                });
            }
            self.level = self.capacity;
            self.recharges += 1;
        }
        self.level -= cost;
        Ok(())
    }
}

/// Evaluates node sequences against a [`RouteGraph`].
///
/// The evaluator checks, edge by edge, that the edge is unobstructed, that a
/// full battery could pay for it, and that any recharge it forces happens at
/// a hub or charger. Objectives are accumulated only on the full evaluation
/// path.
///
/// # Examples
///
/// ```
/// use u_droneroute::graph::RouteGraph;
/// use u_droneroute::models::Node;
/// use u_droneroute::evaluation::RouteEvaluator;
///
/// let nodes = vec![
///     Node::hub(0, 0.0, 0.0),
///     Node::delivery(1, 3.0, 0.0),
///     Node::delivery(2, 3.0, 4.0),
/// ];
/// let graph = RouteGraph::new(nodes, vec![], 100.0).unwrap();
/// let evaluator = RouteEvaluator::new(&graph);
///
/// let result = evaluator.evaluate(&[0, 1, 2, 0]).into_route().unwrap();
/// assert!((result.total_distance - 12.0).abs() < 1e-10);
/// assert_eq!(result.recharge_count, 0);
/// ```
pub struct RouteEvaluator<'a> {
    graph: &'a RouteGraph,
}

impl<'a> RouteEvaluator<'a> {
    /// Creates an evaluator for the given graph.
    pub fn new(graph: &'a RouteGraph) -> Self {
        Self { graph }
    }

    /// Fully evaluates a route: feasibility, battery, and objectives.
    pub fn evaluate(&self, route: &[usize]) -> Evaluation {
        if route.len() < 2 {
            return Evaluation::Infeasible(Infeasibility::RouteTooShort { len: route.len() });
        }

        let mut battery = Battery::full(self.graph.battery_capacity());
        let mut total_distance = 0.0;
        let mut total_risk = 0.0;

        for pair in route.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            if !self.graph.edge_feasible(u, v) {
                log::trace!("edge {}->{} obstructed", u, v);
                return Evaluation::Infeasible(Infeasibility::ObstructedEdge { from: u, to: v });
            }
            let w = self.graph.weight(u, v);
            if let Err(reason) = battery.fly(u, self.graph.node(u), v, w.battery_cost) {
                log::trace!("route infeasible: {:?}", reason);
                return Evaluation::Infeasible(reason);
            }
            total_distance += w.distance;
            total_risk += w.risk;
        }

        Evaluation::Feasible(EvaluatedRoute::new(
            route.to_vec(),
            total_distance,
            total_risk,
            battery.recharges,
        ))
    }

    /// Checks feasibility only, returning the recharge count.
    ///
    /// Applies the same rules as [`evaluate`](Self::evaluate) without
    /// accumulating distance or risk.
    pub fn route_feasible(&self, route: &[usize]) -> Option<usize> {
        if route.len() < 2 {
            return None;
        }
        self.walk(route).ok()
    }

    /// Checks whether an open route prefix can be flown so far.
    ///
    /// A prefix with a single node (or none) is trivially flyable.
    pub fn partial_route_feasible(&self, prefix: &[usize]) -> bool {
        self.walk(prefix).is_ok()
    }

    fn walk(&self, route: &[usize]) -> Result<usize, Infeasibility> {
        let mut battery = Battery::full(self.graph.battery_capacity());
        for pair in route.windows(2) {
            let (u, v) = (pair[0], pair[1]);
            if !self.graph.edge_feasible(u, v) {
                return Err(Infeasibility::ObstructedEdge { from: u, to: v });
            }
            let cost = self.graph.weight(u, v).battery_cost;
            battery.fly(u, self.graph.node(u), v, cost)?;
        }
        Ok(battery.recharges)
    }
}

/// Evaluates `route` on `graph`.
///
/// Shorthand for `RouteEvaluator::new(graph).evaluate(route)`.
pub fn evaluate(route: &[usize], graph: &RouteGraph) -> Evaluation {
    RouteEvaluator::new(graph).evaluate(route)
}

/// Feasibility-only check; see [`RouteEvaluator::route_feasible`].
pub fn route_feasible(route: &[usize], graph: &RouteGraph) -> Option<usize> {
    RouteEvaluator::new(graph).route_feasible(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;

    /// Hub at origin, deliveries on a line at x = 3, 6, 9, optional charger
    /// flag on node 2.
    fn line(capacity: f64, charger_at_2: bool) -> RouteGraph {
        let nodes = vec![
            Node::hub(0, 0.0, 0.0),
            Node::delivery(1, 3.0, 0.0),
            Node::delivery(2, 6.0, 0.0).with_charger(charger_at_2),
            Node::delivery(3, 9.0, 0.0),
        ];
        RouteGraph::new(nodes, vec![], capacity).expect("valid")
    }

    #[test]
    fn test_evaluate_simple_tour() {
        let g = line(100.0, false);
        let r = evaluate(&[0, 1, 2, 3, 0], &g).into_route().expect("feasible");
        assert!((r.total_distance - 18.0).abs() < 1e-10);
        // 4 legs: 0.05 * 18 + 4 * 0.5
        assert!((r.total_risk - 2.9).abs() < 1e-10);
        assert_eq!(r.recharge_count, 0);
        assert_eq!(r.route, vec![0, 1, 2, 3, 0]);
    }

    #[test]
    fn test_route_too_short() {
        let g = line(100.0, false);
        assert_eq!(
            evaluate(&[0], &g),
            Evaluation::Infeasible(Infeasibility::RouteTooShort { len: 1 })
        );
        assert!(route_feasible(&[], &g).is_none());
    }

    #[test]
    fn test_edge_exceeds_capacity() {
        // longest leg 9 → 0 costs 9 > 8
        let g = line(8.0, true);
        let eval = evaluate(&[0, 1, 2, 3, 0], &g);
        assert!(!eval.is_ok());
        assert!(matches!(
            eval.infeasibility(),
            Some(Infeasibility::EdgeExceedsCapacity { from: 3, to: 0, .. })
        ));
    }

    #[test]
    fn test_capacity_at_tolerance_boundary() {
        // a single 9.0 leg against capacity 9.0 - 5e-10 still fits
        let g = line(9.0 - 5e-10, true);
        assert!(!matches!(
            evaluate(&[0, 3, 0], &g).infeasibility(),
            Some(Infeasibility::EdgeExceedsCapacity { .. })
        ));
        let g = line(9.0 - 1e-8, true);
        assert!(matches!(
            evaluate(&[0, 3, 0], &g).infeasibility(),
            Some(Infeasibility::EdgeExceedsCapacity { .. })
        ));
    }

    #[test]
    fn test_recharge_at_charger() {
        // capacity 10: three legs of 3 leave 1, then 3→0 needs 9 at a
        // plain delivery node
        let g = line(10.0, true);
        let eval = evaluate(&[0, 1, 2, 3, 0], &g);
        assert_eq!(
            eval.infeasibility(),
            Some(&Infeasibility::NoChargerAvailable {
                at: 3,
                remaining: 1.0,
                needed: 9.0
            })
        );
    }

    #[test]
    fn test_recharge_counts() {
        // capacity 12: 0→1 (3), 1→3 (6), 3→2 (3) leaves 0, so 2→0 (6)
        // forces a recharge at charger 2
        let g = line(12.0, true);
        let r = evaluate(&[0, 1, 3, 2, 0], &g).into_route().expect("feasible");
        assert_eq!(r.recharge_count, 1);
        assert!((r.total_distance - 18.0).abs() < 1e-10);
    }

    #[test]
    fn test_no_recharge_without_charger() {
        let g = line(12.0, false);
        assert!(!evaluate(&[0, 1, 3, 2, 0], &g).is_ok());
        assert!(route_feasible(&[0, 1, 3, 2, 0], &g).is_none());
    }

    #[test]
    fn test_hub_recharges() {
        // the battery runs dry on returning to the hub mid-walk
        let g = line(6.0, false);
        let evaluator = RouteEvaluator::new(&g);
        assert_eq!(evaluator.route_feasible(&[0, 1, 0, 1, 0]), Some(1));
    }

    #[test]
    fn test_obstructed_edge() {
        let nodes = vec![Node::hub(0, 0.0, 0.0), Node::delivery(1, 4.0, 0.0)];
        let wall = Polygon::rectangle(1.0, -1.0, 2.0, 1.0);
        let g = RouteGraph::new(nodes, vec![wall], 100.0).expect("valid");
        assert_eq!(
            evaluate(&[0, 1, 0], &g),
            Evaluation::Infeasible(Infeasibility::ObstructedEdge { from: 0, to: 1 })
        );
    }

    #[test]
    fn test_route_feasible_matches_evaluate() {
        let g = line(12.0, true);
        let route = [0, 1, 3, 2, 0];
        let full = evaluate(&route, &g).into_route().expect("feasible");
        assert_eq!(route_feasible(&route, &g), Some(full.recharge_count));
    }

    #[test]
    fn test_partial_route_feasible() {
        let g = line(8.0, false);
        let evaluator = RouteEvaluator::new(&g);
        assert!(evaluator.partial_route_feasible(&[0]));
        assert!(evaluator.partial_route_feasible(&[0, 1, 2]));
        // 0→1→2 leaves 2, 2→3 needs 3 at a non-charger
        assert!(!evaluator.partial_route_feasible(&[0, 1, 2, 3]));
    }
}
