use std::cmp::Ordering;
use std::fmt;

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::format::FormatCost;

/// [Path] describes a path between a node and another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path<W> {
    /// node identifiers in the order origin -> destination.
    ///
    /// Empty when the destination can not be reached.
    pub nodes: Vec<String>,

    /// the total cost of the path including all tolls. `+∞` when the destination
    /// can not be reached.
    pub cost: W,
}

impl<W: Float> Path<W> {
    pub(crate) fn unreachable() -> Self {
        Self {
            nodes: vec![],
            cost: W::infinity(),
        }
    }

    pub(crate) fn origin_is_destination(node: &str) -> Self {
        Self {
            nodes: vec![node.to_string()],
            cost: W::zero(),
        }
    }

    /// `false` when no path to the destination exists.
    pub fn is_reachable(&self) -> bool {
        !self.nodes.is_empty() && self.cost.is_finite()
    }
}

impl<W> Path<W> {
    /// path is empty as origin and destination are the same, or there is no path at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() < 2
    }

    /// Length of the path in number of routes
    pub fn len(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Result<&str, Error> {
        self.nodes
            .first()
            .map(|node| node.as_str())
            .ok_or(Error::EmptyPath)
    }

    pub fn destination(&self) -> Result<&str, Error> {
        self.nodes
            .last()
            .map(|node| node.as_str())
            .ok_or(Error::EmptyPath)
    }

    /// pairs of consecutive nodes
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes
            .windows(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }
}

impl<W: Float> Path<W> {
    pub fn formatted_cost<F: FormatCost>(&self, cost_format: &F) -> String {
        cost_format.format_cost(self.cost.to_f64().unwrap_or(f64::NAN))
    }
}

impl<W: fmt::Display> fmt::Display for Path<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.nodes.is_empty() {
            write!(f, "<unreachable>")
        } else {
            write!(f, "{}", self.nodes.join(" -> "))
        }
    }
}

impl<W: PartialEq> Eq for Path<W> {}

/// order by cost, origin and destination.
///
/// This ordering can used to bring `Vec`s of paths in a deterministic order to make them
/// comparable. Costs are never NaN, so the partial order of the weights is total here.
impl<W: PartialOrd> Ord for Path<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .partial_cmp(&other.cost)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.nodes.first().cmp(&other.nodes.first()))
            .then_with(|| self.nodes.last().cmp(&other.nodes.last()))
    }
}

impl<W: PartialOrd> PartialOrd for Path<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
