use std::borrow::Cow;
use std::mem;

use serde::{Deserialize, Serialize};

use crate::collections::IndexMap;

/// Conversion of values into node identifiers.
///
/// Numeric identifiers are stored in their decimal string form, so `3_u32` and `"3"`
/// address the same node.
pub trait AsNodeId {
    fn as_node_id(&self) -> Cow<'_, str>;
}

impl AsNodeId for str {
    fn as_node_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl AsNodeId for String {
    fn as_node_id(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: AsNodeId + ?Sized> AsNodeId for &T {
    fn as_node_id(&self) -> Cow<'_, str> {
        (**self).as_node_id()
    }
}

macro_rules! numeric_node_id {
    ($($t:ty),*) => {
        $(
            impl AsNodeId for $t {
                fn as_node_id(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }

            impl<W> From<$t> for NodeSpec<W> {
                fn from(id: $t) -> Self {
                    NodeSpec::new(id.to_string())
                }
            }
        )*
    };
}

numeric_node_id!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

/// Describes a node to be added to a graph.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec<W> {
    pub id: String,

    /// toll of the node. Falls back to the constant node cost of the graph when not set.
    pub cost: Option<W>,

    /// protected nodes keep their toll when the constant node cost of the graph changes.
    pub protected: bool,
}

impl<W> NodeSpec<W> {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            cost: None,
            protected: false,
        }
    }

    pub fn with_cost(mut self, cost: W) -> Self {
        self.cost = Some(cost);
        self
    }

    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }
}

impl<W> From<&str> for NodeSpec<W> {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<W> From<String> for NodeSpec<W> {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl<W> From<&String> for NodeSpec<W> {
    fn from(id: &String) -> Self {
        Self::new(id.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node<W> {
    /// the toll charged when passing through or ending at this node. `+∞` when the
    /// node is avoided.
    pub cost: W,
    pub protected: bool,
}

/// Node identifiers mapped to their tolls, in insertion order.
#[derive(Debug, Clone)]
pub struct NodeStore<W> {
    nodes: IndexMap<String, Node<W>>,
}

impl<W> Default for NodeStore<W> {
    fn default() -> Self {
        Self {
            nodes: Default::default(),
        }
    }
}

impl<W: Copy> NodeStore<W> {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Node<W>> {
        self.nodes.get(id)
    }

    pub fn get_key_value(&self, id: &str) -> Option<(&str, &Node<W>)> {
        self.nodes
            .get_key_value(id)
            .map(|(id, node)| (id.as_str(), node))
    }

    pub fn cost(&self, id: &str) -> Option<W> {
        self.nodes.get(id).map(|node| node.cost)
    }

    pub fn insert(&mut self, id: String, node: Node<W>) {
        self.nodes.insert(id, node);
    }

    pub fn remove(&mut self, id: &str) -> Option<Node<W>> {
        self.nodes.shift_remove(id)
    }

    /// returns `false` when the node does not exist
    pub fn set_cost(&mut self, id: &str, cost: W) -> bool {
        if let Some(node) = self.nodes.get_mut(id) {
            node.cost = cost;
            true
        } else {
            false
        }
    }

    /// Changes the identifier of a node while keeping its position in the
    /// iteration order.
    pub fn rename(&mut self, id: &str, new_id: &str) {
        if !self.nodes.contains_key(id) {
            return;
        }
        self.nodes = mem::take(&mut self.nodes)
            .into_iter()
            .map(|(k, node)| {
                if k == id {
                    (new_id.to_string(), node)
                } else {
                    (k, node)
                }
            })
            .collect();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node<W>)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Node<W>)> {
        self.nodes.iter_mut().map(|(id, node)| (id.as_str(), node))
    }
}
