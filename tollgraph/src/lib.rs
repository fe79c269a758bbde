//! Mutable weighted graphs with per-node tolls.
//!
//! Nodes are addressed by string identifiers and carry a toll which is charged whenever a
//! path passes through or ends at them. Routes are directed and carry a positive weight.
//! Both tolls and route weights can be set to `+∞` to "avoid" an element without removing it
//! from the topology.
//!
//! Two shortest path algorithms are available:
//!
//! * [`ShortestPath`](algorithm::ShortestPath): single pair Dijkstra, always working on the
//!   current state of the graph.
//! * [`AllPairsShortestPath`](algorithm::AllPairsShortestPath): Floyd-Warshall distance and
//!   precedence matrices. [`TollGraph::compute_matrices`](graph::TollGraph::compute_matrices)
//!   caches the matrices on the graph, later queries using
//!   [`TollGraph::floyd_warshall_path`](graph::TollGraph::floyd_warshall_path) are simple
//!   lookups. Every mutation of the graph invalidates the cache.
//!
//! # Cost accounting
//!
//! The cost of a path `n0 -> n1 -> ... -> nk` is
//! `toll(n0) + Σ weight(ni, ni+1) + Σ toll(ni+1)`, so the toll of the origin is charged once
//! as well as the toll of every node entered afterwards.
//!
//! ```
//! use tollgraph::algorithm::ShortestPath;
//! use tollgraph::graph::{Direction, TollGraph};
//!
//! let mut graph: TollGraph = TollGraph::new();
//! graph
//!     .add_nodes(["A", "B", "C", "D"])?
//!     .add_route("A", "B", 2.0, Direction::OneWay)?
//!     .add_route("A", "C", 1.0, Direction::OneWay)?
//!     .add_route("B", "C", 2.0, Direction::OneWay)?
//!     .add_route("C", "D", 1.0, Direction::OneWay)?;
//!
//! let path = graph.dijkstra_path("A", "D")?;
//! assert_eq!(path.cost, 2.0);
//! assert_eq!(path.nodes, vec!["A", "C", "D"]);
//! # Ok::<(), tollgraph::Error>(())
//! ```

#![warn(
    clippy::all,
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    nonstandard_style
)]

pub mod algorithm;
pub mod collections;
pub mod error;
pub mod format;
pub mod graph;
pub mod options;

pub use crate::error::Error;
pub use crate::graph::{TollGraph, Weight};
