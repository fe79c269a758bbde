use std::fmt;
use std::iter;

use crate::algorithm::floyd_warshall::FloydWarshall;
use crate::algorithm::path::Path;
use crate::algorithm::AllPairsShortestPath;
use crate::collections::HashSet;
use crate::error::Error;
use crate::format::FormatCost;
use crate::options::{GraphOptions, LogLevel};

use super::node::{AsNodeId, Node, NodeSpec, NodeStore};
use super::route::{AdjacencyStore, DeleteMode, Direction};
use super::{GetStats, GraphStats, Weight};

/// A mutable directed graph with weighted routes and tolled nodes.
///
/// All mutating operations validate their input completely before touching the graph, so a
/// failed operation never leaves a partially applied change behind. They return the graph
/// itself to allow chaining:
///
/// ```
/// use tollgraph::graph::{Direction, TollGraph};
/// use tollgraph::options::GraphOptions;
///
/// let mut graph = TollGraph::with_options(
///     GraphOptions::new()
///         .with_auto_create_nodes(true)
///         .with_constant_node_cost(100.0),
/// );
/// graph
///     .add_route("A", "B", 2.0, Direction::Bidirectional)?
///     .avoid_node("B")?;
///
/// assert_eq!(graph.num_nodes(), 2);
/// assert_eq!(graph.num_routes(), 2);
/// assert_eq!(graph.node_cost("B"), Some(f64::INFINITY));
/// # Ok::<(), tollgraph::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct TollGraph<W: Weight = f64> {
    options: GraphOptions<W>,
    pub(crate) nodes: NodeStore<W>,
    pub(crate) routes: AdjacencyStore<W>,

    /// incremented by every successful mutation
    revision: u64,
    matrices: Option<FloydWarshall<W>>,
}

impl<W: Weight> Default for TollGraph<W> {
    fn default() -> Self {
        Self::with_options(GraphOptions::default())
    }
}

impl<W: Weight> TollGraph<W> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_options(options: GraphOptions<W>) -> Self {
        Self {
            options,
            nodes: Default::default(),
            routes: Default::default(),
            revision: 0,
            matrices: None,
        }
    }

    pub fn options(&self) -> &GraphOptions<W> {
        &self.options
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn contains_node<I: AsNodeId>(&self, id: I) -> bool {
        self.nodes.contains(&id.as_node_id())
    }

    pub fn contains_route<F: AsNodeId, T: AsNodeId>(&self, from: F, to: T) -> bool {
        self.routes.contains(&from.as_node_id(), &to.as_node_id())
    }

    pub fn node<I: AsNodeId>(&self, id: I) -> Option<&Node<W>> {
        self.nodes.get(&id.as_node_id())
    }

    pub fn node_cost<I: AsNodeId>(&self, id: I) -> Option<W> {
        self.nodes.cost(&id.as_node_id())
    }

    pub fn route_weight<F: AsNodeId, T: AsNodeId>(&self, from: F, to: T) -> Option<W> {
        self.routes.weight(&from.as_node_id(), &to.as_node_id())
    }

    pub fn constant_node_cost(&self) -> W {
        self.options.constant_node_cost
    }

    /// iterate over all nodes in insertion order
    pub fn iter_nodes(&self) -> impl Iterator<Item = (&str, &Node<W>)> {
        self.nodes.iter()
    }

    /// iterate over all routes as `(from, to, weight)`
    pub fn iter_routes(&self) -> impl Iterator<Item = (&str, &str, W)> {
        self.routes.iter()
    }

    /// get all routes in the graph leading from this node to its neighbors
    pub fn routes_from<I: AsNodeId>(&self, id: I) -> Vec<(&str, W)> {
        self.routes.routes_from(&id.as_node_id()).collect()
    }

    /// get all routes in the graph leading to this node from its neighbors
    pub fn routes_to<I: AsNodeId>(&self, id: I) -> Vec<(&str, W)> {
        self.routes.routes_to(&id.as_node_id())
    }

    /// Formats a cost using the configured [`CostFormat`](crate::format::CostFormat).
    pub fn format_cost(&self, cost: W) -> String {
        match (self.options.cost_format.as_ref(), cost.to_f64()) {
            (Some(cost_format), Some(value)) => cost_format.format_cost(value),
            _ => cost.to_string(),
        }
    }

    /// Runs `op` on the graph and applies the configured [`ErrorPolicy`](crate::options::ErrorPolicy)
    /// to its result.
    ///
    /// ```
    /// use tollgraph::graph::TollGraph;
    /// use tollgraph::options::GraphOptions;
    ///
    /// let mut graph: TollGraph = TollGraph::with_options(GraphOptions::new().with_ignore_errors(true));
    /// graph.add_node("A")?;
    /// let outcome = graph.try_with(|g| g.add_node("A").map(drop))?;
    /// assert!(outcome.is_none());
    /// # Ok::<(), tollgraph::Error>(())
    /// ```
    pub fn try_with<F, T>(&mut self, op: F) -> Result<Option<T>, Error>
    where
        F: FnOnce(&mut Self) -> Result<T, Error>,
    {
        let result = op(self);
        self.options.apply(result)
    }

    pub(crate) fn logs(&self, level: LogLevel) -> bool {
        level != LogLevel::None && self.options.log_level >= level
    }

    fn trace_mutation(&self, args: fmt::Arguments) {
        if self.logs(LogLevel::All) {
            log::trace!("[{}] {}", self.options.name, args);
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }

    // ---- nodes ------------------------------------------------------------

    pub fn add_node<S: Into<NodeSpec<W>>>(&mut self, spec: S) -> Result<&mut Self, Error> {
        self.add_nodes(iter::once(spec))
    }

    /// Adds multiple nodes. The complete batch is validated before the first node is added.
    pub fn add_nodes<I, S>(&mut self, specs: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeSpec<W>>,
    {
        let specs: Vec<NodeSpec<W>> = specs.into_iter().map(Into::into).collect();
        {
            let mut batch_ids = HashSet::default();
            for spec in specs.iter() {
                validate_node_id(&spec.id)?;
                if let Some(cost) = spec.cost {
                    validate_node_cost(cost)?;
                }
                if self.nodes.contains(&spec.id) || !batch_ids.insert(spec.id.as_str()) {
                    return Err(Error::DuplicateNode(spec.id.clone()));
                }
            }
        }

        for spec in specs {
            let cost = spec.cost.unwrap_or(self.options.constant_node_cost);
            self.insert_node_unchecked(spec.id, cost, spec.protected);
        }
        self.touch();
        Ok(self)
    }

    fn insert_node_unchecked(&mut self, id: String, cost: W, protected: bool) {
        self.trace_mutation(format_args!("adding node {} with cost {}", id, cost));
        self.routes.add_node(&id);
        self.nodes.insert(id, Node { cost, protected });
    }

    /// Renames a node and/or replaces its toll.
    ///
    /// Renaming keeps all routes from and to the node. A new cost is applied regardless
    /// of the `protected` flag of the node.
    pub fn edit_node<I: AsNodeId>(
        &mut self,
        id: I,
        new_id: Option<&str>,
        new_cost: Option<W>,
    ) -> Result<&mut Self, Error> {
        let mut id = id.as_node_id().into_owned();
        validate_node_id(&id)?;
        if !self.nodes.contains(&id) {
            return Err(Error::NodeNotFound(id));
        }
        if let Some(new_id) = new_id {
            validate_node_id(new_id)?;
            if new_id != id && self.nodes.contains(new_id) {
                return Err(Error::DuplicateNode(new_id.to_string()));
            }
        }
        if let Some(cost) = new_cost {
            validate_node_cost(cost)?;
        }

        if let Some(new_id) = new_id {
            if new_id != id {
                self.trace_mutation(format_args!("renaming node {} to {}", id, new_id));
                self.nodes.rename(&id, new_id);
                self.routes.rename_node(&id, new_id);
                id = new_id.to_string();
            }
        }
        if let Some(cost) = new_cost {
            self.trace_mutation(format_args!("setting cost of node {} to {}", id, cost));
            self.nodes.set_cost(&id, cost);
        }
        self.touch();
        Ok(self)
    }

    pub fn rename_node<I: AsNodeId>(&mut self, id: I, new_id: &str) -> Result<&mut Self, Error> {
        self.edit_node(id, Some(new_id), None)
    }

    pub fn set_node_cost<I: AsNodeId>(&mut self, id: I, cost: W) -> Result<&mut Self, Error> {
        self.edit_node(id, None, Some(cost))
    }

    pub fn delete_node<I: AsNodeId>(&mut self, id: I) -> Result<&mut Self, Error> {
        self.delete_nodes(iter::once(id))
    }

    /// Deletes nodes including all routes leading from and to them.
    ///
    /// Fails without deleting anything when one of the nodes does not exist.
    pub fn delete_nodes<I, N>(&mut self, ids: I) -> Result<&mut Self, Error>
    where
        I: IntoIterator<Item = N>,
        N: AsNodeId,
    {
        let ids: Vec<String> = ids
            .into_iter()
            .map(|id| id.as_node_id().into_owned())
            .collect();
        for id in ids.iter() {
            validate_node_id(id)?;
            if !self.nodes.contains(id) {
                return Err(Error::NodeNotFound(id.clone()));
            }
        }

        for id in ids.iter() {
            self.trace_mutation(format_args!("deleting node {}", id));
            self.nodes.remove(id);
            self.routes.remove_node(id);
        }
        self.touch();
        Ok(self)
    }

    /// Sets the toll of the node to `+∞`. Its routes are kept.
    pub fn avoid_node<I: AsNodeId>(&mut self, id: I) -> Result<&mut Self, Error> {
        let id = id.as_node_id();
        if !self.nodes.set_cost(&id, W::infinity()) {
            return Err(Error::NodeNotFound(id.into_owned()));
        }
        self.trace_mutation(format_args!("avoiding node {}", id));
        self.touch();
        Ok(self)
    }

    /// Changes the default toll for new nodes and overwrites the toll of all
    /// existing nodes which are not protected.
    pub fn set_constant_node_cost(&mut self, cost: W) -> Result<&mut Self, Error> {
        validate_node_cost(cost)?;
        self.options.constant_node_cost = cost;
        for (_, node) in self.nodes.iter_mut() {
            if !node.protected {
                node.cost = cost;
            }
        }
        self.trace_mutation(format_args!("constant node cost set to {}", cost));
        self.touch();
        Ok(self)
    }

    /// Multiplies the tolls of all nodes by `factor`. Avoided nodes stay avoided.
    pub fn scale_node_costs(&mut self, factor: W) -> Result<&mut Self, Error> {
        if !(factor.is_finite() && factor >= W::zero()) {
            return Err(Error::InvalidArgument(format!(
                "node cost factor must be a finite non-negative number, found {}",
                factor
            )));
        }
        for (_, node) in self.nodes.iter_mut() {
            if node.cost.is_finite() {
                node.cost = node.cost * factor;
            }
        }
        self.trace_mutation(format_args!("node costs scaled by {}", factor));
        self.touch();
        Ok(self)
    }

    // ---- routes -----------------------------------------------------------

    pub fn add_route<F: AsNodeId, T: AsNodeId>(
        &mut self,
        from: F,
        to: T,
        weight: W,
        direction: Direction,
    ) -> Result<&mut Self, Error> {
        self.insert_route(from, to, weight, direction, false)
    }

    /// Changes the weight of a route, adding it when it does not exist yet.
    pub fn edit_route<F: AsNodeId, T: AsNodeId>(
        &mut self,
        from: F,
        to: T,
        weight: W,
        direction: Direction,
    ) -> Result<&mut Self, Error> {
        self.insert_route(from, to, weight, direction, true)
    }

    /// Adds a route.
    ///
    /// Missing endpoints are created with the constant node cost when `auto_create_nodes`
    /// is enabled in the options. An existing route is only overwritten when `change_existing`
    /// is set; avoided routes (weight `+∞`) count as absent and are restored.
    pub fn insert_route<F: AsNodeId, T: AsNodeId>(
        &mut self,
        from: F,
        to: T,
        weight: W,
        direction: Direction,
        change_existing: bool,
    ) -> Result<&mut Self, Error> {
        let from = from.as_node_id();
        let to = to.as_node_id();
        validate_node_id(&from)?;
        validate_node_id(&to)?;
        if !(weight.is_finite() && weight > W::zero()) {
            return Err(Error::InvalidArgument(format!(
                "route weight must be a finite positive number, found {}",
                weight
            )));
        }

        let mut missing_nodes = Vec::with_capacity(2);
        for id in [&from, &to] {
            if !self.nodes.contains(id) {
                if self.options.auto_create_nodes {
                    missing_nodes.push(id.to_string());
                } else {
                    return Err(Error::NodeNotFound(id.to_string()));
                }
            }
        }
        if from == to {
            return Err(Error::SelfLoop(from.into_owned()));
        }
        if !change_existing {
            self.ensure_route_is_absent(&from, &to)?;
            if direction.is_bidirectional() {
                self.ensure_route_is_absent(&to, &from)?;
            }
        }

        for id in missing_nodes {
            self.insert_node_unchecked(id, self.options.constant_node_cost, false);
        }
        self.trace_mutation(format_args!(
            "setting weight of route {} -> {} to {} ({:?})",
            from, to, weight, direction
        ));
        self.routes.set_weight(&from, &to, weight);
        if direction.is_bidirectional() {
            self.routes.set_weight(&to, &from, weight);
        }
        self.touch();
        Ok(self)
    }

    fn ensure_route_is_absent(&self, from: &str, to: &str) -> Result<(), Error> {
        match self.routes.weight(from, to) {
            Some(weight) if weight.is_finite() => {
                Err(Error::RouteExists(from.to_string(), to.to_string()))
            }
            _ => Ok(()),
        }
    }

    /// Deletes a route. With [`DeleteMode::Soft`] the route is kept with a weight of `+∞`.
    pub fn delete_route<F: AsNodeId, T: AsNodeId>(
        &mut self,
        from: F,
        to: T,
        direction: Direction,
        mode: DeleteMode,
    ) -> Result<&mut Self, Error> {
        let from = from.as_node_id();
        let to = to.as_node_id();
        validate_node_id(&from)?;
        validate_node_id(&to)?;
        for id in [&from, &to] {
            if !self.nodes.contains(id) {
                return Err(Error::NodeNotFound(id.to_string()));
            }
        }
        if !self.routes.contains(&from, &to) {
            return Err(Error::RouteNotFound(from.into_owned(), to.into_owned()));
        }
        if direction.is_bidirectional() && !self.routes.contains(&to, &from) {
            return Err(Error::RouteNotFound(to.into_owned(), from.into_owned()));
        }

        let mut pairs = vec![(&from, &to)];
        if direction.is_bidirectional() {
            pairs.push((&to, &from));
        }
        for (origin, destination) in pairs {
            self.trace_mutation(format_args!(
                "deleting route {} -> {} ({:?})",
                origin, destination, mode
            ));
            match mode {
                DeleteMode::Hard => {
                    self.routes.remove(origin, destination);
                }
                DeleteMode::Soft => self.routes.set_weight(origin, destination, W::infinity()),
            }
        }
        self.touch();
        Ok(self)
    }

    /// Sets the weight of a route to `+∞`. The route stays part of the graph.
    pub fn avoid_route<F: AsNodeId, T: AsNodeId>(
        &mut self,
        from: F,
        to: T,
        direction: Direction,
    ) -> Result<&mut Self, Error> {
        self.delete_route(from, to, direction, DeleteMode::Soft)
    }

    /// Multiplies the weights of all routes by `factor`. Avoided routes stay avoided.
    pub fn scale_route_weights(&mut self, factor: W) -> Result<&mut Self, Error> {
        if !(factor.is_finite() && factor > W::zero()) {
            return Err(Error::InvalidArgument(format!(
                "route weight factor must be a finite positive number, found {}",
                factor
            )));
        }
        for weight in self.routes.weights_mut() {
            *weight = *weight * factor;
        }
        self.trace_mutation(format_args!("route weights scaled by {}", factor));
        self.touch();
        Ok(self)
    }

    // ---- floyd-warshall cache ---------------------------------------------

    /// Computes the Floyd-Warshall matrices and caches them for
    /// [`floyd_warshall_path`](Self::floyd_warshall_path). Any previously cached
    /// matrices are replaced.
    pub fn compute_matrices(&mut self) -> &FloydWarshall<W> {
        let matrices = self.all_pairs_shortest_paths();
        self.matrices.insert(matrices)
    }

    /// The cached matrices, provided they were computed for the current state of the graph.
    pub fn matrices(&self) -> Result<&FloydWarshall<W>, Error> {
        match self.matrices.as_ref() {
            None => Err(Error::PrecomputationRequired),
            Some(matrices) if matrices.revision() != self.revision => {
                Err(Error::StalePrecomputation {
                    computed: matrices.revision(),
                    current: self.revision,
                })
            }
            Some(matrices) => Ok(matrices),
        }
    }

    /// Looks up the shortest path in the cached Floyd-Warshall matrices.
    pub fn floyd_warshall_path<S: AsNodeId, E: AsNodeId>(
        &self,
        start: S,
        end: E,
    ) -> Result<Path<W>, Error> {
        let path = self.matrices()?.path(start, end)?;
        if self.logs(LogLevel::Min) {
            log::info!(
                "[{}] floyd-warshall path: {} (cost {})",
                self.options.name,
                path,
                self.format_cost(path.cost)
            );
        }
        Ok(path)
    }
}

impl<W: Weight> GetStats for TollGraph<W> {
    fn get_stats(&self) -> GraphStats {
        GraphStats {
            name: self.options.name.clone(),
            num_nodes: self.num_nodes(),
            num_routes: self.num_routes(),
            num_avoided_nodes: self
                .nodes
                .iter()
                .filter(|(_, node)| node.cost.is_infinite())
                .count(),
            num_avoided_routes: self
                .routes
                .iter()
                .filter(|(_, _, weight)| weight.is_infinite())
                .count(),
        }
    }
}

fn validate_node_id(id: &str) -> Result<(), Error> {
    if id.trim().is_empty() {
        Err(Error::InvalidArgument(
            "node identifier must not be empty".to_string(),
        ))
    } else {
        Ok(())
    }
}

fn validate_node_cost<W: Weight>(cost: W) -> Result<(), Error> {
    if cost.is_nan() || cost < W::zero() {
        Err(Error::InvalidArgument(format!(
            "node cost must not be negative, found {}",
            cost
        )))
    } else {
        Ok(())
    }
}
