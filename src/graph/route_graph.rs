//! Route graph with lazily memoized edge feasibility.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::geometry::{segment_intersects_polygon, Point, Polygon};
use crate::models::Node;

use super::weights::{AffineRisk, EdgeWeight, RiskModel, WeightMatrix};

/// Nodes, no-fly polygons, and battery capacity of one routing instance.
///
/// Edge feasibility is computed on first request and cached for the pair in
/// both directions. The cache lives behind a [`RefCell`], so a graph can be
/// moved to another thread but not shared between threads; clone it to give
/// each parallel run its own cache.
///
/// # Examples
///
/// ```
/// use u_droneroute::geometry::Polygon;
/// use u_droneroute::graph::RouteGraph;
/// use u_droneroute::models::Node;
///
/// let nodes = vec![
///     Node::hub(0, 0.0, 0.0),
///     Node::delivery(1, 4.0, 0.0),
///     Node::delivery(2, 0.0, 4.0),
/// ];
/// let wall = Polygon::rectangle(1.0, -1.0, 2.0, 1.0);
/// let graph = RouteGraph::new(nodes, vec![wall], 100.0).unwrap();
///
/// assert!(!graph.edge_feasible(0, 1)); // crosses the wall
/// assert!(graph.edge_feasible(0, 2));
/// assert!((graph.weight(0, 2).distance - 4.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct RouteGraph {
    nodes: Vec<Node>,
    polygons: Vec<Polygon>,
    battery_capacity: f64,
    risk_model: Arc<dyn RiskModel>,
    feasibility: RefCell<HashMap<(usize, usize), bool>>,
}

impl RouteGraph {
    /// Creates a graph using the default [`AffineRisk`] model.
    ///
    /// Returns an error if the battery capacity is not positive and finite.
    pub fn new(nodes: Vec<Node>, polygons: Vec<Polygon>, battery_capacity: f64) -> Result<Self> {
        if !battery_capacity.is_finite() || battery_capacity <= 0.0 {
            return Err(Error::InvalidBattery(battery_capacity));
        }
        Ok(Self {
            nodes,
            polygons,
            battery_capacity,
            risk_model: Arc::new(AffineRisk::default()),
            feasibility: RefCell::new(HashMap::new()),
        })
    }

    /// Creates a graph from raw polygon vertex lists.
    ///
    /// Reports the position of the first polygon with fewer than three
    /// vertices.
    pub fn from_vertices(
        nodes: Vec<Node>,
        polygons: Vec<Vec<Point>>,
        battery_capacity: f64,
    ) -> Result<Self> {
        let polygons = polygons
            .into_iter()
            .enumerate()
            .map(|(index, vertices)| {
                let count = vertices.len();
                Polygon::new(vertices).map_err(|_| Error::InvalidPolygon {
                    index,
                    vertices: count,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(nodes, polygons, battery_capacity)
    }

    /// Replaces the risk model.
    pub fn with_risk_model(mut self, model: impl RiskModel + 'static) -> Self {
        self.risk_model = Arc::new(model);
        self
    }

    /// All nodes; a node's index in this slice is its identity.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The node at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: usize) -> &Node {
        &self.nodes[index]
    }

    /// No-fly polygons.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Full-charge battery capacity.
    pub fn battery_capacity(&self) -> f64 {
        self.battery_capacity
    }

    /// Computes the weight of edge `a–b`. Not cached.
    pub fn weight(&self, a: usize, b: usize) -> EdgeWeight {
        let distance = self.nodes[a].distance_to(&self.nodes[b]);
        EdgeWeight {
            distance,
            risk: self.risk_model.risk(distance),
            battery_cost: distance,
        }
    }

    /// Returns `true` if the straight edge `a–b` avoids every polygon.
    ///
    /// The first call for a pair runs the geometry tests; later calls in
    /// either direction read the cache.
    pub fn edge_feasible(&self, a: usize, b: usize) -> bool {
        if a == b {
            return true;
        }
        let key = (a.min(b), a.max(b));
        if let Some(&cached) = self.feasibility.borrow().get(&key) {
            return cached;
        }
        let p = self.nodes[a].position();
        let q = self.nodes[b].position();
        let feasible = !self
            .polygons
            .iter()
            .any(|poly| segment_intersects_polygon(p, q, poly));
        self.feasibility.borrow_mut().insert(key, feasible);
        feasible
    }

    /// Nodes reachable from `from` by a feasible edge, in index order.
    pub fn feasible_successors(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.nodes.len()).filter(move |&to| to != from && self.edge_feasible(from, to))
    }

    /// Builds the full symmetric weight matrix, leaving obstructed pairs
    /// empty.
    pub fn complete_weights(&self) -> WeightMatrix {
        let n = self.nodes.len();
        let mut matrix = WeightMatrix::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                if self.edge_feasible(i, j) {
                    matrix.set_symmetric(i, j, self.weight(i, j));
                }
            }
        }
        matrix
    }

    /// Number of unordered pairs whose feasibility is cached.
    pub fn cached_pairs(&self) -> usize {
        self.feasibility.borrow().len()
    }
}
