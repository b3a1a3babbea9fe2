// src/exec/parallel.rs

//! Concurrent executor for independent branches of a schedule.
//!
//! A node becomes runnable once its remaining-predecessor counter reaches
//! zero. Runnable nodes are dispatched lowest order position first onto a
//! bounded set of blocking Tokio workers. The coordinator loop is the only
//! writer of the buffer table.
//!
//! Release rule: a buffer leaves the table as soon as its last consumer has
//! been *dispatched*. Dispatched workers hold their own `Arc` handles to
//! their inputs, so freeing the table slot never pulls a buffer from under a
//! computation that is still in flight.
//!
//! A failing or panicking job stops dispatch; jobs already running are
//! joined before the error is returned.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, trace, warn};

use crate::errors::{RandwireError, Result};
use crate::exec::backend::{Aggregator, SharedUnit};
use crate::schedule::Schedule;

/// Buffer-table bookkeeping from one [`ParallelExecutor::run_with_stats`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Most buffers held in the table at once.
    pub peak_resident: usize,
    /// Node ids in the order their buffers left the table.
    pub released: Vec<usize>,
    /// Node ids in dispatch order.
    pub dispatched: Vec<usize>,
}

/// Bounded worker-pool executor over a [`Schedule`].
pub struct ParallelExecutor<B> {
    schedule: Arc<Schedule>,
    units: Vec<SharedUnit<B>>,
    workers: usize,
}

impl<B> std::fmt::Debug for ParallelExecutor<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelExecutor")
            .field("nodes", &self.schedule.len())
            .field("workers", &self.workers)
            .finish_non_exhaustive()
    }
}

impl<B> ParallelExecutor<B>
where
    B: Send + Sync + 'static,
{
    pub fn new(schedule: Arc<Schedule>, units: Vec<SharedUnit<B>>, workers: usize) -> Result<Self> {
        let node_count = schedule.graph().node_count();
        if units.len() != node_count {
            return Err(RandwireError::InvalidGraph(format!(
                "{} compute units bound to a graph of {node_count} nodes",
                units.len()
            )));
        }
        if workers == 0 {
            return Err(RandwireError::InvalidParameter(
                "parallel executor needs at least one worker".to_string(),
            ));
        }

        Ok(Self {
            schedule,
            units,
            workers,
        })
    }

    /// Execute the whole schedule and aggregate the terminal results.
    ///
    /// On the first compute failure no further node is dispatched; jobs
    /// already running are allowed to finish, then the failure is returned
    /// without aggregating.
    pub async fn run(
        &self,
        input: Arc<B>,
        aggregator: &(dyn Aggregator<B> + Sync),
    ) -> Result<B> {
        self.run_with_stats(input, aggregator)
            .await
            .map(|(output, _)| output)
    }

    /// Like [`run`](Self::run), also reporting buffer-table bookkeeping.
    pub async fn run_with_stats(
        &self,
        input: Arc<B>,
        aggregator: &(dyn Aggregator<B> + Sync),
    ) -> Result<(B, ExecutionStats)> {
        let graph = self.schedule.graph();
        let order = self.schedule.order();
        let node_count = graph.node_count();

        let mut waiting_on: Vec<usize> = (0..node_count).map(|n| graph.in_degree(n)).collect();
        let mut consumers_left: Vec<usize> = (0..node_count).map(|n| graph.out_degree(n)).collect();
        let mut table: Vec<Option<Arc<B>>> = vec![None; node_count];
        let mut resident = 0usize;
        let mut stats = ExecutionStats::default();

        let mut ready: BinaryHeap<Reverse<usize>> = graph
            .sources()
            .into_iter()
            .map(|n| Reverse(order.position_of(n)))
            .collect();
        let mut in_flight: JoinSet<(usize, anyhow::Result<B>)> = JoinSet::new();
        let mut failure: Option<RandwireError> = None;

        info!(nodes = node_count, workers = self.workers, "parallel execution started");

        loop {
            while failure.is_none() && in_flight.len() < self.workers {
                let Some(Reverse(position)) = ready.pop() else {
                    break;
                };
                let node = order.node_at(position);
                let preds = graph.predecessors(node);
                let is_source = preds.is_empty();

                let inputs: Vec<Arc<B>> = if is_source {
                    vec![Arc::clone(&input)]
                } else {
                    let mut inputs = Vec::with_capacity(preds.len());
                    for &pred in preds {
                        let buffer = table[pred].clone().ok_or_else(|| {
                            RandwireError::ExecutorError(format!(
                                "buffer of node {pred} needed by node {node} was already released"
                            ))
                        })?;
                        inputs.push(buffer);
                    }
                    inputs
                };

                for &pred in preds {
                    consumers_left[pred] -= 1;
                    if consumers_left[pred] == 0 {
                        trace!(node = pred, "last consumer dispatched; releasing buffer");
                        table[pred] = None;
                        resident -= 1;
                        stats.released.push(pred);
                    }
                }

                debug!(node, position, inputs = inputs.len(), "dispatching node");
                stats.dispatched.push(node);
                let unit = Arc::clone(&self.units[node]);
                in_flight.spawn_blocking(move || {
                    let refs: Vec<&B> = inputs.iter().map(Arc::as_ref).collect();
                    (node, unit.compute(&refs, is_source))
                });
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };
            let (node, result) = match joined {
                Ok(joined) => joined,
                Err(join_error) => {
                    warn!(error = %join_error, "compute job panicked; draining in-flight work");
                    if failure.is_none() {
                        failure = Some(RandwireError::Other(join_error.into()));
                    }
                    continue;
                }
            };

            match result {
                Ok(output) => {
                    table[node] = Some(Arc::new(output));
                    resident += 1;
                    stats.peak_resident = stats.peak_resident.max(resident);
                    for &succ in graph.successors(node) {
                        waiting_on[succ] -= 1;
                        if waiting_on[succ] == 0 {
                            ready.push(Reverse(order.position_of(succ)));
                        }
                    }
                }
                Err(source) => {
                    let position = order.position_of(node);
                    warn!(node, position, error = %source, "compute unit failed; draining in-flight work");
                    if failure.is_none() {
                        failure = Some(RandwireError::Compute {
                            node,
                            position,
                            source,
                        });
                    }
                }
            }
        }

        if let Some(err) = failure {
            return Err(err);
        }

        debug!(peak_resident = stats.peak_resident, "parallel execution finished");

        let mut terminals = Vec::new();
        for sink in graph.sinks() {
            let buffer = table[sink].take().ok_or_else(|| {
                RandwireError::ExecutorError(format!("terminal node {sink} produced no buffer"))
            })?;
            let buffer = Arc::try_unwrap(buffer).map_err(|_| {
                RandwireError::ExecutorError(format!(
                    "terminal buffer of node {sink} is still shared"
                ))
            })?;
            terminals.push(buffer);
        }

        let output = aggregator
            .reduce(terminals)
            .map_err(RandwireError::Aggregation)?;
        Ok((output, stats))
    }
}
