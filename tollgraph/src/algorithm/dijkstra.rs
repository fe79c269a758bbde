//! Compute shortest paths using the [Dijkstra search
//! algorithm](https://en.wikipedia.org/wiki/Dijkstra's_algorithm), extended by node tolls.
//!
//! The toll of the origin is charged together with the first route, the toll of every
//! other node is charged when the node is entered.
//!
//! The structure of the search follows the `pathfinding` crate, with `ahash` based maps
//! and a deterministic tie-break: nodes of equal cost are settled in lexicographic order,
//! and of two predecessors offering the same cost the lexicographically smaller one is kept.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::hash_map::Entry::{Occupied, Vacant};
use smallvec::SmallVec;

use crate::algorithm::path::Path;
use crate::algorithm::trace::{DijkstraObserver, TraceStep};
use crate::collections::{HashMap, HashSet};
use crate::error::Error;
use crate::graph::{TollGraph, Weight};

/// Result of a complete search from a single origin.
pub struct DijkstraTree<'a, W> {
    origin: &'a str,

    /// every node which got a tentative cost during the search, mapped to its
    /// predecessor and its cost.
    parents: HashMap<&'a str, (&'a str, W)>,
}

impl<'a, W: Weight> DijkstraTree<'a, W> {
    pub fn origin(&self) -> &str {
        self.origin
    }

    /// The cost of reaching `node`, `+∞` when it is not reachable.
    pub fn cost(&self, node: &str) -> W {
        if node == self.origin {
            W::zero()
        } else {
            self.parents
                .get(node)
                .map(|(_, cost)| *cost)
                .unwrap_or_else(W::infinity)
        }
    }

    /// Build the path leading to `target` by following the predecessors.
    pub fn path_to(&self, target: &str) -> Path<W> {
        if target == self.origin {
            return Path::origin_is_destination(self.origin);
        }
        let cost = self.cost(target);
        if !cost.is_finite() {
            return Path::unreachable();
        }

        let mut rev = vec![target.to_string()];
        let mut next = target;
        while let Some((parent, _)) = self.parents.get(next) {
            rev.push(parent.to_string());
            if *parent == self.origin || rev.len() > self.parents.len() + 1 {
                break;
            }
            next = *parent;
        }
        rev.reverse();
        Path { nodes: rev, cost }
    }
}

/// Runs the search from `origin` until no further node can be reached at a finite cost.
///
/// Fails when `origin` is not part of the graph or has no outgoing routes.
pub fn dijkstra_tree<'a, W, O>(
    graph: &'a TollGraph<W>,
    origin: &str,
    observer: &mut O,
) -> Result<DijkstraTree<'a, W>, Error>
where
    W: Weight,
    O: DijkstraObserver<W>,
{
    let (origin, origin_node) = graph
        .nodes
        .get_key_value(origin)
        .ok_or_else(|| Error::NodeNotFound(origin.to_string()))?;
    if graph.routes.num_routes_from(origin) == 0 {
        return Err(Error::NodeNotFound(format!(
            "{} (node has no outgoing routes)",
            origin
        )));
    }
    let toll = |node: &str| graph.nodes.cost(node).unwrap_or_else(W::infinity);

    let mut to_see = BinaryHeap::new();
    let mut parents: HashMap<&'a str, (&'a str, W)> = HashMap::default();
    for (neighbor, weight) in graph.routes.routes_from(origin) {
        let cost = weight + origin_node.cost + toll(neighbor);
        parents.insert(neighbor, (origin, cost));
        if cost.is_finite() {
            to_see.push(SmallestHolder {
                cost,
                node: neighbor,
            });
        }
    }

    let mut settled: HashSet<&str> = HashSet::default();
    settled.insert(origin);
    let mut iteration = 0;

    while let Some(SmallestHolder { cost, node }) = to_see.pop() {
        if settled.contains(node) {
            continue;
        }
        let predecessor = match parents.get(node) {
            // We may have inserted a node several times into the binary heap if we found
            // a better way to access it. Ensure that we are currently dealing with the
            // best path and discard the others.
            Some((_, c)) if cost > *c => continue,
            Some((predecessor, _)) => *predecessor,
            None => continue,
        };
        settled.insert(node);
        iteration += 1;

        let mut relaxed = SmallVec::new();
        for (neighbor, weight) in graph.routes.routes_from(node) {
            if neighbor == origin || settled.contains(neighbor) {
                continue;
            }
            let new_cost = cost + weight + toll(neighbor);
            match parents.entry(neighbor) {
                Vacant(e) => {
                    e.insert((node, new_cost));
                }
                Occupied(mut e) => {
                    let (parent, cost) = *e.get();
                    if cost > new_cost {
                        e.insert((node, new_cost));
                    } else {
                        // equal costs: keep the lexicographically smallest predecessor
                        if cost == new_cost && node < parent {
                            e.insert((node, new_cost));
                        }
                        continue;
                    }
                }
            }
            if new_cost.is_finite() {
                to_see.push(SmallestHolder {
                    cost: new_cost,
                    node: neighbor,
                });
                if observer.wants_steps() {
                    relaxed.push((neighbor.to_string(), new_cost));
                }
            }
        }

        if observer.wants_steps() {
            observer.on_step(TraceStep {
                iteration,
                node: node.to_string(),
                cost,
                predecessor: predecessor.to_string(),
                relaxed,
            });
        }
    }
    Ok(DijkstraTree { origin, parents })
}

/// Orders the binary heap by the smallest cost first. Equal costs are ordered by the
/// node identifier to keep the search deterministic.
struct SmallestHolder<'a, W> {
    cost: W,
    node: &'a str,
}

impl<'a, W: PartialOrd> PartialEq for SmallestHolder<'a, W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<'a, W: PartialOrd> Eq for SmallestHolder<'a, W> {}

impl<'a, W: PartialOrd> PartialOrd for SmallestHolder<'a, W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<'a, W: PartialOrd> Ord for SmallestHolder<'a, W> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .partial_cmp(&self.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.node.cmp(self.node))
    }
}
