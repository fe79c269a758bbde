use thiserror::Error as ThisError;

#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("node not found: {0}")]
    NodeNotFound(String),

    #[error("route not found: {0} -> {1}")]
    RouteNotFound(String, String),

    #[error("node already exists: {0}")]
    DuplicateNode(String),

    #[error("route already exists: {0} -> {1}")]
    RouteExists(String, String),

    #[error("route would start and end at node {0}")]
    SelfLoop(String),

    #[error("the floyd-warshall matrices need to be computed first")]
    PrecomputationRequired,

    #[error("the floyd-warshall matrices are outdated: computed at revision {computed}, graph is at revision {current}")]
    StalePrecomputation { computed: u64, current: u64 },

    #[error("none of the routing destinations is part of the graph")]
    DestinationsNotInGraph,

    #[error("empty path")]
    EmptyPath,
}

impl Error {
    /// `true` for all errors caused by a missing node or route.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NodeNotFound(_) | Self::RouteNotFound(_, _))
    }
}
