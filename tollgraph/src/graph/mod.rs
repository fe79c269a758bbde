use std::fmt::{Debug, Display};

use num_traits::Float;
use serde::Serialize;

pub use node::{AsNodeId, Node, NodeSpec, NodeStore};
pub use route::{AdjacencyStore, DeleteMode, Direction};
pub use tollgraph::TollGraph;

pub mod node;
pub mod route;
pub mod tollgraph;

/// Numeric type used for route weights and node tolls.
///
/// `+∞` marks avoided nodes and routes.
pub trait Weight: Float + Debug + Display + Send + Sync + 'static {}

impl<T> Weight for T where T: Float + Debug + Display + Send + Sync + 'static {}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GraphStats {
    pub name: String,
    pub num_nodes: usize,
    pub num_routes: usize,
    pub num_avoided_nodes: usize,
    pub num_avoided_routes: usize,
}

pub trait GetStats {
    fn get_stats(&self) -> GraphStats;
}
