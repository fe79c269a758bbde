use std::mem;

use crate::collections::IndexMap;

/// Whether a route operation applies to a single directed edge or to the edge and its reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    OneWay,

    /// two independent directed edges with the same weight, added, edited and deleted together.
    Bidirectional,
}

impl Direction {
    pub fn is_bidirectional(&self) -> bool {
        matches!(self, Self::Bidirectional)
    }
}

impl From<bool> for Direction {
    fn from(bidirectional: bool) -> Self {
        if bidirectional {
            Self::Bidirectional
        } else {
            Self::OneWay
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// remove the route from the graph
    Hard,

    /// keep the route, but set its weight to `+∞`. Adding the route again restores it.
    Soft,
}

/// Outgoing routes of every node: origin -> (destination -> weight).
///
/// Every node of the graph has an entry here, even when it has no outgoing routes.
#[derive(Debug, Clone)]
pub struct AdjacencyStore<W> {
    routes: IndexMap<String, IndexMap<String, W>>,
}

impl<W> Default for AdjacencyStore<W> {
    fn default() -> Self {
        Self {
            routes: Default::default(),
        }
    }
}

impl<W: Copy> AdjacencyStore<W> {
    pub fn add_node(&mut self, id: &str) {
        self.routes
            .entry(id.to_string())
            .or_insert_with(Default::default);
    }

    /// removes the outgoing routes of the node as well as all routes leading to it.
    pub fn remove_node(&mut self, id: &str) {
        self.routes.shift_remove(id);
        for destinations in self.routes.values_mut() {
            destinations.shift_remove(id);
        }
    }

    /// Changes the identifier of a node in its own entry as well as in all routes leading
    /// to it. Weights and iteration order are preserved.
    pub fn rename_node(&mut self, id: &str, new_id: &str) {
        let rename = |k: String| if k == id { new_id.to_string() } else { k };

        self.routes = mem::take(&mut self.routes)
            .into_iter()
            .map(|(origin, destinations)| {
                let destinations = if destinations.contains_key(id) {
                    destinations
                        .into_iter()
                        .map(|(destination, weight)| (rename(destination), weight))
                        .collect()
                } else {
                    destinations
                };
                (rename(origin), destinations)
            })
            .collect();
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<W> {
        self.routes
            .get(from)
            .and_then(|destinations| destinations.get(to))
            .copied()
    }

    pub fn contains(&self, from: &str, to: &str) -> bool {
        self.weight(from, to).is_some()
    }

    /// Sets the weight of a route. The origin node must already have an entry.
    pub fn set_weight(&mut self, from: &str, to: &str, weight: W) {
        if let Some(destinations) = self.routes.get_mut(from) {
            destinations.insert(to.to_string(), weight);
        }
    }

    pub fn remove(&mut self, from: &str, to: &str) -> Option<W> {
        self.routes
            .get_mut(from)
            .and_then(|destinations| destinations.shift_remove(to))
    }

    pub fn num_routes_from(&self, from: &str) -> usize {
        self.routes
            .get(from)
            .map(|destinations| destinations.len())
            .unwrap_or(0)
    }

    /// routes leading away from `from` in insertion order
    pub fn routes_from<'a>(&'a self, from: &str) -> impl Iterator<Item = (&'a str, W)> + 'a {
        self.routes
            .get(from)
            .into_iter()
            .flat_map(|destinations| destinations.iter())
            .map(|(destination, weight)| (destination.as_str(), *weight))
    }

    /// routes leading to `to`
    pub fn routes_to(&self, to: &str) -> Vec<(&str, W)> {
        self.routes
            .iter()
            .filter_map(|(origin, destinations)| {
                destinations
                    .get(to)
                    .map(|weight| (origin.as_str(), *weight))
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, W)> {
        self.routes.iter().flat_map(|(origin, destinations)| {
            destinations
                .iter()
                .map(move |(destination, weight)| (origin.as_str(), destination.as_str(), *weight))
        })
    }

    pub fn weights_mut(&mut self) -> impl Iterator<Item = &mut W> {
        self.routes
            .values_mut()
            .flat_map(|destinations| destinations.values_mut())
    }

    pub fn len(&self) -> usize {
        self.routes.values().map(|destinations| destinations.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
