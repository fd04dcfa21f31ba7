//! Node and node category types.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Role of a node in the delivery network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Base station. Always permits a full recharge.
    Hub,
    /// Dedicated charging pad.
    Charger,
    /// Delivery point.
    #[default]
    Delivery,
}

/// A location the vehicle must visit.
///
/// A node's identity inside a [`RouteGraph`](crate::graph::RouteGraph) is its
/// array position; `id` is an opaque label carried for the caller. The
/// charger flag is independent of the category: a delivery node may double
/// as a charging point, and a hub recharges regardless of the flag.
///
/// Serialized field names follow the instance files (`type`, `is_charger`).
///
/// # Examples
///
/// ```
/// use u_droneroute::models::{Node, NodeKind};
///
/// let hub = Node::hub(0, 0.0, 0.0);
/// assert!(hub.can_recharge());
///
/// let d = Node::delivery(1, 3.0, 4.0);
/// assert_eq!(d.kind(), NodeKind::Delivery);
/// assert!(!d.can_recharge());
/// assert!(d.with_charger(true).can_recharge());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    id: usize,
    #[serde(flatten)]
    position: Point,
    #[serde(rename = "type", default)]
    kind: NodeKind,
    #[serde(rename = "is_charger", default)]
    charger: bool,
}

impl Node {
    /// Creates a node of the given category without a charger.
    pub fn new(id: usize, x: f64, y: f64, kind: NodeKind) -> Self {
        Self {
            id,
            position: Point::new(x, y),
            kind,
            charger: false,
        }
    }

    /// Creates a hub.
    pub fn hub(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, NodeKind::Hub)
    }

    /// Creates a delivery node.
    pub fn delivery(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, NodeKind::Delivery)
    }

    /// Creates a charging pad (category `Charger`, flag set).
    pub fn charger(id: usize, x: f64, y: f64) -> Self {
        Self::new(id, x, y, NodeKind::Charger).with_charger(true)
    }

    /// Sets the charger flag.
    pub fn with_charger(mut self, charger: bool) -> Self {
        self.charger = charger;
        self
    }

    /// Caller-supplied label.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Location in the plane.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Node category.
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Charger flag as supplied.
    pub fn is_charger(&self) -> bool {
        self.charger
    }

    /// `true` if a full recharge is possible here.
    pub fn can_recharge(&self) -> bool {
        self.charger || self.kind == NodeKind::Hub
    }

    /// Euclidean distance to another node.
    pub fn distance_to(&self, other: &Node) -> f64 {
        self.position.distance_to(&other.position)
    }
}
