//! Observation of the Dijkstra search.
//!
//! Observers only receive information, they never influence the search.
use serde::Serialize;
use smallvec::SmallVec;

use crate::graph::Weight;
use crate::options::LogLevel;

/// One iteration of the Dijkstra search: a node has been settled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceStep<W> {
    /// starts at 1
    pub iteration: usize,

    /// the settled node
    pub node: String,

    /// the final cost of reaching `node`
    pub cost: W,

    /// the node preceding `node` on its cheapest path
    pub predecessor: String,

    /// neighbors of `node` which received a new tentative cost in this iteration
    pub relaxed: SmallVec<[(String, W); 4]>,
}

pub trait DijkstraObserver<W> {
    /// returning `false` allows the search to skip building the [`TraceStep`] values.
    fn wants_steps(&self) -> bool {
        true
    }

    fn on_step(&mut self, step: TraceStep<W>);
}

/// ignores all steps
impl<W> DijkstraObserver<W> for () {
    fn wants_steps(&self) -> bool {
        false
    }

    fn on_step(&mut self, _step: TraceStep<W>) {}
}

/// collects all steps
impl<W> DijkstraObserver<W> for Vec<TraceStep<W>> {
    fn on_step(&mut self, step: TraceStep<W>) {
        self.push(step);
    }
}

/// Emits the steps using the `log` crate.
///
/// [`LogLevel::Steps`] logs one `debug` record per iteration, [`LogLevel::All`] additionally
/// one `trace` record per relaxed neighbor.
pub struct LogObserver<'a> {
    graph_name: &'a str,
    level: LogLevel,
}

impl<'a> LogObserver<'a> {
    pub fn new(graph_name: &'a str, level: LogLevel) -> Self {
        Self { graph_name, level }
    }
}

impl<'a, W: Weight> DijkstraObserver<W> for LogObserver<'a> {
    fn wants_steps(&self) -> bool {
        self.level >= LogLevel::Steps
    }

    fn on_step(&mut self, step: TraceStep<W>) {
        log::debug!(
            "[{}] dijkstra iteration {}: settled {} at cost {} via {} -> {}",
            self.graph_name,
            step.iteration,
            step.node,
            step.cost,
            step.predecessor,
            step.node
        );
        if self.level >= LogLevel::All {
            for (neighbor, cost) in step.relaxed.iter() {
                log::trace!(
                    "[{}] dijkstra iteration {}: relaxed {} to {}",
                    self.graph_name,
                    step.iteration,
                    neighbor,
                    cost
                );
            }
        }
    }
}
