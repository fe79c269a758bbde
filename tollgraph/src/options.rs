//! Construction options of a [`TollGraph`](crate::graph::TollGraph).
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::format::CostFormat;

/// Verbosity of the log records emitted by a graph.
///
/// All records go through the [`log`] facade, so the installed logger applies its own
/// filtering on top of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LogLevel {
    /// nothing is logged
    None,

    /// suppressed errors and the results of path queries
    Min,

    /// additionally every iteration of the algorithms
    Steps,

    /// additionally every relaxation and every mutation of the graph
    All,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Min
    }
}

/// How failed operations are reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// errors are returned to the caller
    Surface,

    /// errors are logged and the operation is treated as a no-op
    Suppress,
}

impl ErrorPolicy {
    /// Applies the policy to the result of an operation.
    ///
    /// As all operations validate their input before modifying the graph, a suppressed
    /// error always leaves the graph unchanged. Nothing is logged here, see
    /// [`GraphOptions::apply`] for the variant reporting suppressed errors.
    pub fn apply<T>(self, result: Result<T, Error>) -> Result<Option<T>, Error> {
        match (result, self) {
            (Ok(value), _) => Ok(Some(value)),
            (Err(e), Self::Surface) => Err(e),
            (Err(_), Self::Suppress) => Ok(None),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphOptions<W> {
    /// display name, used as a prefix for all log records
    pub name: String,

    pub log_level: LogLevel,

    /// suppress errors instead of returning them. See [`ErrorPolicy`].
    pub ignore_errors: bool,

    /// create missing nodes when a route references them
    pub auto_create_nodes: bool,

    /// toll of nodes which are added without an explicit cost
    pub constant_node_cost: W,

    /// formatting applied to costs when they are displayed
    pub cost_format: Option<CostFormat>,
}

impl<W: Zero> Default for GraphOptions<W> {
    fn default() -> Self {
        Self {
            name: "graph".to_string(),
            log_level: LogLevel::default(),
            ignore_errors: false,
            auto_create_nodes: false,
            constant_node_cost: W::zero(),
            cost_format: None,
        }
    }
}

impl<W: Zero> GraphOptions<W> {
    pub fn new() -> Self {
        Default::default()
    }
}

impl<W> GraphOptions<W> {
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    pub fn with_ignore_errors(mut self, ignore_errors: bool) -> Self {
        self.ignore_errors = ignore_errors;
        self
    }

    pub fn with_auto_create_nodes(mut self, auto_create_nodes: bool) -> Self {
        self.auto_create_nodes = auto_create_nodes;
        self
    }

    pub fn with_constant_node_cost(mut self, constant_node_cost: W) -> Self {
        self.constant_node_cost = constant_node_cost;
        self
    }

    pub fn with_cost_format(mut self, cost_format: CostFormat) -> Self {
        self.cost_format = Some(cost_format);
        self
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        if self.ignore_errors {
            ErrorPolicy::Suppress
        } else {
            ErrorPolicy::Surface
        }
    }

    /// Applies the [`ErrorPolicy`] of these options to `result`.
    ///
    /// Suppressed errors are logged as `warn` records prefixed by the graph name, unless
    /// the log level is [`LogLevel::None`].
    pub fn apply<T>(&self, result: Result<T, Error>) -> Result<Option<T>, Error> {
        match result {
            Err(e) if self.error_policy() == ErrorPolicy::Suppress => {
                if self.log_level != LogLevel::None {
                    log::warn!("[{}] ignoring failed operation: {}", self.name, e);
                }
                Ok(None)
            }
            result => result.map(Some),
        }
    }
}
