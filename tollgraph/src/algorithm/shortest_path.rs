//! Dijkstra shortest-path routing.
//!
use rayon::prelude::*;

use crate::algorithm::dijkstra::dijkstra_tree;
use crate::algorithm::path::Path;
use crate::algorithm::trace::{DijkstraObserver, LogObserver};
use crate::collections::{HashMap, HashSet};
use crate::error::Error;
use crate::graph::{AsNodeId, TollGraph, Weight};
use crate::options::LogLevel;

/// Implements a simple Dijkstra shortest path route finding between two nodes.
///
/// The search always works on the current state of the graph.
pub trait ShortestPath<W> {
    /// Find the cheapest path from `start` to `end`.
    ///
    /// Fails when one of the nodes is not part of the graph, or when `start` has no
    /// outgoing routes. When `end` can not be reached, the returned path is empty and
    /// has a cost of `+∞`.
    fn dijkstra_path<S, E>(&self, start: S, end: E) -> Result<Path<W>, Error>
    where
        S: AsNodeId,
        E: AsNodeId;

    /// Same as [`dijkstra_path`](Self::dijkstra_path), reporting every iteration of the
    /// search to `observer`.
    fn dijkstra_path_observed<S, E, O>(
        &self,
        start: S,
        end: E,
        observer: &mut O,
    ) -> Result<Path<W>, Error>
    where
        S: AsNodeId,
        E: AsNodeId,
        O: DijkstraObserver<W>;
}

impl<W: Weight> ShortestPath<W> for TollGraph<W> {
    fn dijkstra_path<S, E>(&self, start: S, end: E) -> Result<Path<W>, Error>
    where
        S: AsNodeId,
        E: AsNodeId,
    {
        let mut observer = LogObserver::new(self.name(), self.options().log_level);
        let path = self.dijkstra_path_observed(start, end, &mut observer)?;
        if self.logs(LogLevel::Min) {
            log::info!(
                "[{}] dijkstra path: {} (cost {})",
                self.name(),
                path,
                self.format_cost(path.cost)
            );
        }
        Ok(path)
    }

    fn dijkstra_path_observed<S, E, O>(
        &self,
        start: S,
        end: E,
        observer: &mut O,
    ) -> Result<Path<W>, Error>
    where
        S: AsNodeId,
        E: AsNodeId,
        O: DijkstraObserver<W>,
    {
        let start = start.as_node_id();
        let end = end.as_node_id();
        if !self.contains_node(&*end) {
            return Err(Error::NodeNotFound(end.into_owned()));
        }
        let tree = dijkstra_tree(self, &start, observer)?;
        Ok(tree.path_to(&end))
    }
}

/// Variant of the [`ShortestPath`] trait routing from multiple
/// origins in parallel.
pub trait ShortestPathManyToMany<W>
where
    W: Send + Sync + Copy,
{
    /// Returns found paths keyed by the origin node.
    ///
    /// Origins which are not part of the graph or have no outgoing routes are skipped, as
    /// are unreachable destinations. The paths of each origin are sorted by cost.
    fn shortest_path_many_to_many<I, J, N, M>(
        &self,
        origins: I,
        destinations: J,
    ) -> Result<HashMap<String, Vec<Path<W>>>, Error>
    where
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = M>,
        N: AsNodeId,
        M: AsNodeId;
}

impl<W: Weight> ShortestPathManyToMany<W> for TollGraph<W> {
    fn shortest_path_many_to_many<I, J, N, M>(
        &self,
        origins: I,
        destinations: J,
    ) -> Result<HashMap<String, Vec<Path<W>>>, Error>
    where
        I: IntoIterator<Item = N>,
        J: IntoIterator<Item = M>,
        N: AsNodeId,
        M: AsNodeId,
    {
        let filtered_destinations: Vec<String> = {
            let mut seen = HashSet::default();
            destinations
                .into_iter()
                .map(|id| id.as_node_id().into_owned())
                .filter(|id| self.nodes.contains(id) && seen.insert(id.clone()))
                .collect()
        };
        if filtered_destinations.is_empty() {
            return Err(Error::DestinationsNotInGraph);
        }

        let filtered_origins: Vec<String> = {
            let mut seen = HashSet::default();
            origins
                .into_iter()
                .map(|id| id.as_node_id().into_owned())
                .filter(|id| {
                    self.routes.num_routes_from(id) > 0 && seen.insert(id.clone())
                })
                .collect()
        };

        log::debug!(
            "[{}] shortest_path many-to-many: from {} nodes to {} nodes",
            self.name(),
            filtered_origins.len(),
            filtered_destinations.len(),
        );

        let paths = filtered_origins
            .par_iter()
            .map(|origin| {
                let tree = dijkstra_tree(self, origin, &mut ())?;

                // return sorted from lowest to highest cost, use the destination as second criteria
                // to make path vecs directly comparable using this deterministic order
                let mut paths: Vec<_> = filtered_destinations
                    .iter()
                    .map(|destination| tree.path_to(destination))
                    .filter(|path| path.is_reachable())
                    .collect();
                paths.sort_unstable();
                Ok((origin.clone(), paths))
            })
            .collect::<Result<Vec<_>, Error>>()?;

        Ok(paths.into_iter().collect())
    }
}
