// src/exec/executor.rs

//! Sequential executor: an explicit state machine over order positions.

use tracing::{debug, trace, warn};

use crate::errors::{RandwireError, Result};
use crate::exec::backend::{Aggregator, SharedUnit};
use crate::schedule::Schedule;

/// Where the executor is in its walk over the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutorState {
    /// The step at this position is next.
    Pending(usize),
    /// The step at this position is being computed.
    Running(usize),
    /// Every step ran; terminal buffers are waiting for aggregation.
    Completed,
    /// A compute unit failed; no aggregation will happen.
    Failed(String),
}

/// Outcome of a single [`DagExecutor::step`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorStep {
    pub position: usize,
    pub node: usize,
    /// Positions whose buffers were released after this step, descending.
    pub released: Vec<usize>,
    /// Whether this was the final step.
    pub finished: bool,
}

/// Walks a [`Schedule`] one node at a time, holding exactly the buffers the
/// liveness plan says are still needed.
///
/// `units[n]` is the compute unit bound to node id `n`.
pub struct DagExecutor<'a, B> {
    schedule: &'a Schedule,
    units: &'a [SharedUnit<B>],
    buffers: Vec<Option<B>>,
    state: ExecutorState,
}

impl<'a, B> std::fmt::Debug for DagExecutor<'a, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DagExecutor")
            .field("state", &self.state)
            .field("live", &self.live_positions())
            .finish_non_exhaustive()
    }
}

impl<'a, B> DagExecutor<'a, B> {
    pub fn new(schedule: &'a Schedule, units: &'a [SharedUnit<B>]) -> Result<Self> {
        let node_count = schedule.graph().node_count();
        if units.len() != node_count {
            return Err(RandwireError::InvalidGraph(format!(
                "{} compute units bound to a graph of {node_count} nodes",
                units.len()
            )));
        }

        Ok(Self {
            schedule,
            units,
            buffers: (0..node_count).map(|_| None).collect(),
            state: ExecutorState::Pending(0),
        })
    }

    pub fn state(&self) -> &ExecutorState {
        &self.state
    }

    /// Positions whose buffers are currently held, ascending.
    pub fn live_positions(&self) -> Vec<usize> {
        self.buffers
            .iter()
            .enumerate()
            .filter_map(|(position, buffer)| buffer.as_ref().map(|_| position))
            .collect()
    }

    /// Run the next pending position.
    pub fn step(&mut self, input: &B) -> Result<ExecutorStep> {
        let position = match self.state {
            ExecutorState::Pending(position) => position,
            ref other => {
                return Err(RandwireError::ExecutorError(format!(
                    "cannot step an executor in state {other:?}"
                )));
            }
        };
        self.state = ExecutorState::Running(position);

        let schedule = self.schedule;
        let order = schedule.order();
        let graph = schedule.graph();
        let node = order.node_at(position);
        let preds = graph.predecessors(node);
        let is_source = preds.is_empty();

        let result = {
            let gathered: Result<Vec<&B>> = if is_source {
                Ok(vec![input])
            } else {
                preds
                    .iter()
                    .map(|&pred| {
                        let pred_position = order.position_of(pred);
                        self.buffers[pred_position].as_ref().ok_or_else(|| {
                            RandwireError::ExecutorError(format!(
                                "buffer of node {pred} (position {pred_position}) needed by node {node} was already released"
                            ))
                        })
                    })
                    .collect()
            };
            let inputs = match gathered {
                Ok(inputs) => inputs,
                Err(err) => {
                    self.state = ExecutorState::Failed(err.to_string());
                    return Err(err);
                }
            };
            trace!(node, position, inputs = inputs.len(), "computing node");
            self.units[node].compute(&inputs, is_source)
        };

        let output = match result {
            Ok(output) => output,
            Err(source) => {
                warn!(node, position, error = %source, "compute unit failed");
                self.state =
                    ExecutorState::Failed(format!("node {node} at position {position}: {source}"));
                return Err(RandwireError::Compute {
                    node,
                    position,
                    source,
                });
            }
        };
        self.buffers[position] = Some(output);

        let released = schedule.plan().releases_after(position).to_vec();
        for &freed in &released {
            self.buffers[freed] = None;
        }

        let finished = position + 1 == schedule.len();
        self.state = if finished {
            ExecutorState::Completed
        } else {
            ExecutorState::Pending(position + 1)
        };

        Ok(ExecutorStep {
            position,
            node,
            released,
            finished,
        })
    }

    /// Run every remaining step, then aggregate.
    pub fn run(mut self, input: &B, aggregator: &dyn Aggregator<B>) -> Result<B> {
        while matches!(self.state, ExecutorState::Pending(_)) {
            self.step(input)?;
        }
        self.finish(aggregator)
    }

    /// Aggregate the terminal results.
    ///
    /// Buffers whose last consumer was the final step are still held at this
    /// point; only sink buffers take part in the reduction.
    pub fn finish(self, aggregator: &dyn Aggregator<B>) -> Result<B> {
        if self.state != ExecutorState::Completed {
            return Err(RandwireError::ExecutorError(format!(
                "cannot aggregate an executor in state {:?}",
                self.state
            )));
        }

        let graph = self.schedule.graph();
        let order = self.schedule.order();
        let terminals: Vec<B> = self
            .buffers
            .into_iter()
            .enumerate()
            .filter(|(position, _)| graph.out_degree(order.node_at(*position)) == 0)
            .filter_map(|(_, buffer)| buffer)
            .collect();
        debug!(terminals = terminals.len(), "aggregating terminal buffers");
        aggregator.reduce(terminals).map_err(RandwireError::Aggregation)
    }
}
