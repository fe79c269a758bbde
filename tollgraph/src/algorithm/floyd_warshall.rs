//! All-pairs shortest paths using the [Floyd-Warshall
//! algorithm](https://en.wikipedia.org/wiki/Floyd%E2%80%93Warshall_algorithm).
//!
//! Rows and columns of the matrices are ordered by the lexicographic order of the node
//! identifiers. The relaxation for a middle node `k` does not change row `k` itself, so all
//! other rows are relaxed in parallel.
//!
//! The precedence matrix is derived from the final distances: the predecessor of a node is
//! the cheapest last hop, ties going to the lexicographically smallest predecessor. This
//! matches the paths found by [`dijkstra`](super::dijkstra).
use std::sync::Arc;

use rayon::prelude::*;

use crate::algorithm::path::Path;
use crate::collections::HashMap;
use crate::error::Error;
use crate::graph::{AsNodeId, TollGraph, Weight};
use crate::options::LogLevel;

/// Maps node identifiers to rows and columns of the matrices.
#[derive(Debug, Clone, PartialEq, Eq)]
struct MatrixIndex {
    nodes: Vec<String>,
    positions: HashMap<String, usize>,
}

impl MatrixIndex {
    fn new(mut nodes: Vec<String>) -> Self {
        nodes.sort_unstable();
        let positions = nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.clone(), i))
            .collect();
        Self { nodes, positions }
    }

    fn position(&self, node: &str) -> Result<usize, Error> {
        self.positions
            .get(node)
            .copied()
            .ok_or_else(|| Error::NodeNotFound(node.to_string()))
    }
}

/// Cost of the cheapest path for every pair of nodes. `+∞` when there is no path.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix<W> {
    index: Arc<MatrixIndex>,
    values: Vec<W>,
}

impl<W: Weight> DistanceMatrix<W> {
    /// node identifiers in the order of the rows and columns
    pub fn nodes(&self) -> &[String] {
        &self.index.nodes
    }

    pub fn len(&self) -> usize {
        self.index.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.nodes.is_empty()
    }

    pub fn get<S: AsNodeId, E: AsNodeId>(&self, start: S, end: E) -> Option<W> {
        let i = self.index.position(&start.as_node_id()).ok()?;
        let j = self.index.position(&end.as_node_id()).ok()?;
        Some(self.values[i * self.len() + j])
    }

    /// the costs from `start` to all nodes, in the order of [`nodes`](Self::nodes)
    pub fn row<S: AsNodeId>(&self, start: S) -> Option<&[W]> {
        let i = self.index.position(&start.as_node_id()).ok()?;
        let n = self.len();
        Some(&self.values[i * n..(i + 1) * n])
    }
}

/// The node preceding the destination on the cheapest path for every pair of nodes.
///
/// For pairs without a path, and for the diagonal, the origin itself is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedenceMatrix {
    index: Arc<MatrixIndex>,
    values: Vec<usize>,
}

impl PrecedenceMatrix {
    pub fn nodes(&self) -> &[String] {
        &self.index.nodes
    }

    pub fn get<S: AsNodeId, E: AsNodeId>(&self, start: S, end: E) -> Option<&str> {
        let i = self.index.position(&start.as_node_id()).ok()?;
        let j = self.index.position(&end.as_node_id()).ok()?;
        let p = self.values[i * self.index.nodes.len() + j];
        Some(self.index.nodes[p].as_str())
    }
}

/// Distance and precedence matrices of a graph, computed at a given revision of the graph.
#[derive(Debug, Clone, PartialEq)]
pub struct FloydWarshall<W> {
    distances: DistanceMatrix<W>,
    precedence: PrecedenceMatrix,
    revision: u64,
}

impl<W: Weight> FloydWarshall<W> {
    pub fn distances(&self) -> &DistanceMatrix<W> {
        &self.distances
    }

    pub fn precedence(&self) -> &PrecedenceMatrix {
        &self.precedence
    }

    /// the revision of the graph the matrices have been computed for
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Reconstructs the cheapest path from `start` to `end` from the precedence matrix.
    ///
    /// When `end` can not be reached, the returned path is empty and has a cost of `+∞`.
    pub fn path<S: AsNodeId, E: AsNodeId>(&self, start: S, end: E) -> Result<Path<W>, Error> {
        let index = &self.distances.index;
        let n = index.nodes.len();
        let s = index.position(&start.as_node_id())?;
        let e = index.position(&end.as_node_id())?;

        if s == e {
            return Ok(Path::origin_is_destination(&index.nodes[s]));
        }
        let cost = self.distances.values[s * n + e];
        if !cost.is_finite() {
            return Ok(Path::unreachable());
        }

        let mut rev = vec![e];
        let mut current = e;
        while current != s && rev.len() <= n {
            current = self.precedence.values[s * n + current];
            rev.push(current);
        }
        Ok(Path {
            nodes: rev
                .into_iter()
                .rev()
                .map(|i| index.nodes[i].clone())
                .collect(),
            cost,
        })
    }
}

/// Computation of the distance and precedence matrices for all pairs of nodes.
pub trait AllPairsShortestPath<W> {
    fn all_pairs_shortest_paths(&self) -> FloydWarshall<W>;
}

impl<W: Weight> AllPairsShortestPath<W> for TollGraph<W> {
    fn all_pairs_shortest_paths(&self) -> FloydWarshall<W> {
        let index = Arc::new(MatrixIndex::new(
            self.iter_nodes().map(|(id, _)| id.to_string()).collect(),
        ));
        let n = index.nodes.len();
        if self.logs(LogLevel::Steps) {
            log::debug!(
                "[{}] computing floyd-warshall matrices for {} nodes",
                self.name(),
                n
            );
        }
        let tolls: Vec<W> = index
            .nodes
            .iter()
            .map(|id| self.nodes.cost(id).unwrap_or_else(W::infinity))
            .collect();

        let mut distances = vec![W::infinity(); n * n];
        let mut routes = Vec::with_capacity(self.num_routes());
        for (i, origin) in index.nodes.iter().enumerate() {
            distances[i * n + i] = W::zero();
            for (destination, weight) in self.routes.routes_from(origin) {
                if let Some(&j) = index.positions.get(destination) {
                    distances[i * n + j] = weight + tolls[j];
                    routes.push((i, j, weight));
                }
            }
        }

        for k in 0..n {
            let distances_k = distances[k * n..(k + 1) * n].to_vec();
            distances
                .par_chunks_mut(n)
                .enumerate()
                .for_each(|(i, distance_row)| {
                    if i == k {
                        return;
                    }
                    let via_k = distance_row[k];
                    if !via_k.is_finite() {
                        return;
                    }
                    for j in 0..n {
                        if j == k {
                            continue;
                        }
                        let candidate = via_k + distances_k[j];
                        if candidate < distance_row[j] {
                            distance_row[j] = candidate;
                        }
                    }
                });
        }

        // The predecessor of every destination is the cheapest last hop of the row. Equal
        // costs go to the lexicographically smallest predecessor, as in the Dijkstra search.
        let mut precedence: Vec<usize> = (0..n * n).map(|cell| cell / n.max(1)).collect();
        precedence
            .par_chunks_mut(n.max(1))
            .zip(distances.par_chunks(n.max(1)))
            .enumerate()
            .for_each(|(i, (precedence_row, distance_row))| {
                let mut best: Vec<Option<(W, usize)>> = vec![None; n];
                for &(p, j, weight) in routes.iter() {
                    if j == i {
                        continue;
                    }
                    let candidate = distance_row[p] + weight + tolls[j];
                    if !candidate.is_finite() {
                        continue;
                    }
                    match best[j] {
                        Some((cost, q)) if cost < candidate || (cost == candidate && q < p) => {}
                        _ => best[j] = Some((candidate, p)),
                    }
                }
                for (j, found) in best.into_iter().enumerate() {
                    if let Some((_, p)) = found {
                        precedence_row[j] = p;
                    }
                }
            });

        // the toll of the origin is charged once per path
        for (i, toll) in tolls.iter().enumerate() {
            if *toll > W::zero() {
                for distance in distances[i * n..(i + 1) * n].iter_mut() {
                    if distance.is_finite() && *distance > W::zero() {
                        *distance = *distance + *toll;
                    }
                }
            }
        }

        FloydWarshall {
            distances: DistanceMatrix {
                index: index.clone(),
                values: distances,
            },
            precedence: PrecedenceMatrix {
                index,
                values: precedence,
            },
            revision: self.revision(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::algorithm::AllPairsShortestPath;
    use crate::graph::{Direction, TollGraph};

    fn graph() -> TollGraph {
        let mut graph = TollGraph::new();
        graph
            .add_nodes(["b", "a", "c"])
            .unwrap()
            .add_route("a", "b", 1.0, Direction::OneWay)
            .unwrap()
            .add_route("b", "c", 1.0, Direction::OneWay)
            .unwrap()
            .add_route("a", "c", 5.0, Direction::OneWay)
            .unwrap();
        graph
    }

    #[test]
    fn test_rows_are_sorted() {
        let fw = graph().all_pairs_shortest_paths();
        assert_eq!(fw.distances().nodes(), &["a", "b", "c"]);
        assert_eq!(fw.distances().row("a").unwrap(), &[0.0, 1.0, 2.0]);
        assert_eq!(fw.precedence().get("a", "c"), Some("b"));
        assert_eq!(fw.precedence().get("c", "a"), Some("c"));
    }

    #[test]
    fn test_origin_toll_is_charged_once() {
        let mut graph = graph();
        graph.set_node_cost("a", 10.0).unwrap();
        graph.set_node_cost("b", 3.0).unwrap();
        let fw = graph.all_pairs_shortest_paths();
        // 10 (a) + 5, the same as 10 (a) + 1 + 3 (b) + 1
        assert_eq!(fw.distances().get("a", "c"), Some(15.0));
        assert_eq!(fw.distances().get("a", "a"), Some(0.0));
        assert_eq!(fw.distances().get("c", "a"), Some(f64::INFINITY));
    }

    #[test]
    fn test_path_reconstruction() {
        let fw = graph().all_pairs_shortest_paths();
        let path = fw.path("a", "c").unwrap();
        assert_eq!(path.nodes, vec!["a", "b", "c"]);
        assert_eq!(path.cost, 2.0);

        let path = fw.path("c", "a").unwrap();
        assert!(!path.is_reachable());

        assert!(fw.path("a", "x").unwrap_err().is_not_found());
    }

    #[test]
    fn test_equal_costs_prefer_smallest_predecessor() {
        // a -> x -> d and a -> b -> d both cost 4
        let mut graph = TollGraph::new();
        graph
            .add_nodes(["a", "b", "d", "x"])
            .unwrap()
            .add_route("a", "x", 1.0, Direction::OneWay)
            .unwrap()
            .add_route("x", "d", 3.0, Direction::OneWay)
            .unwrap()
            .add_route("a", "b", 3.0, Direction::OneWay)
            .unwrap()
            .add_route("b", "d", 1.0, Direction::OneWay)
            .unwrap();
        let fw = graph.all_pairs_shortest_paths();
        assert_eq!(fw.precedence().get("a", "d"), Some("b"));

        let path = fw.path("a", "d").unwrap();
        assert_eq!(path.nodes, vec!["a", "b", "d"]);
        assert_eq!(path.cost, 4.0);
    }

    #[test]
    fn test_precedence_matrices_are_comparable() {
        fn assert_eq_impl<T: Eq>(_: &T) {}

        let first = graph().all_pairs_shortest_paths();
        let second = graph().all_pairs_shortest_paths();
        assert_eq_impl(first.precedence());
        assert_eq!(first.precedence(), second.precedence());
    }

    #[test]
    fn test_empty_graph() {
        let graph: TollGraph = TollGraph::new();
        let fw = graph.all_pairs_shortest_paths();
        assert!(fw.distances().is_empty());
    }
}
