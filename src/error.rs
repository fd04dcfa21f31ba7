//! Error types for u-droneroute.
//!
//! Only configuration and construction problems are errors. An infeasible
//! route or an instance without any feasible tour is a normal outcome and is
//! reported through [`Evaluation`](crate::evaluation::Evaluation) or an empty
//! front instead.

use thiserror::Error;

/// Result type alias for u-droneroute operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised at the configuration boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The requested solver strategy does not exist.
    #[error("Unknown solver strategy: {0}")]
    UnknownStrategy(String),

    /// A no-fly polygon has fewer than three vertices.
    #[error("Invalid polygon #{index}: expected at least 3 vertices, got {vertices}")]
    InvalidPolygon {
        /// Position of the polygon in the input list.
        index: usize,
        /// Number of vertices supplied.
        vertices: usize,
    },

    /// Battery capacity is not a positive finite number.
    #[error("Invalid battery capacity: {0}")]
    InvalidBattery(f64),

    /// The start node does not exist in the graph.
    #[error("Start node {start} out of range for graph with {nodes} nodes")]
    InvalidStart {
        /// Requested start index.
        start: usize,
        /// Number of nodes in the graph.
        nodes: usize,
    },

    /// Any other invalid solver parameter.
    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}
