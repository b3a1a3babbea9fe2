// src/schedule/reorder.rs

//! Random-relabeling search for a lower peak live count.
//!
//! Relabeling does not change the topology, but it changes which of the
//! many valid topological orders the lexicographic tie-break selects, and
//! with it how long buffers stay alive. The search is a plain best-of-N
//! heuristic: no optimality is claimed, only that the incumbent never gets
//! worse.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::errors::{RandwireError, Result};
use crate::graph::Graph;
use crate::schedule::snapshot::Schedule;

/// Result of [`ReorderOptimizer::search`].
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Lowest-peak snapshot seen (first seen wins ties).
    pub best: Schedule,
    pub best_peak: usize,
    /// Peak of the graph as given.
    pub initial_peak: usize,
    /// Trial that produced `best`; trial 0 is the unmodified graph.
    pub best_trial: usize,
    /// Peak observed at each trial.
    pub peaks: Vec<usize>,
}

/// Best-of-`trials` search over uniform random relabelings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderOptimizer {
    trials: usize,
}

impl ReorderOptimizer {
    pub fn new(trials: usize) -> Result<Self> {
        if trials == 0 {
            return Err(RandwireError::InvalidParameter(
                "reorder search needs at least one trial".to_string(),
            ));
        }
        Ok(Self { trials })
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Evaluate `trials` labelings of `graph` and keep the best.
    ///
    /// Trial 0 is the graph as given, so one trial reports the unmodified
    /// peak. Each later trial relabels the *input* graph with a fresh
    /// permutation; a permutation consumes the same amount of randomness
    /// regardless of outcome, so with a fixed seed the trajectory for `T`
    /// trials is a prefix of the one for `T + 1`.
    pub fn search<R: Rng + ?Sized>(&self, graph: &Graph, rng: &mut R) -> Result<SearchOutcome> {
        let initial = Schedule::new(graph.clone());
        let initial_peak = initial.peak();

        let mut best = initial;
        let mut best_peak = initial_peak;
        let mut best_trial = 0;
        let mut peaks = Vec::with_capacity(self.trials);
        peaks.push(initial_peak);

        let mut mapping: Vec<usize> = (0..graph.node_count()).collect();
        for trial in 1..self.trials {
            mapping.sort_unstable();
            mapping.shuffle(rng);

            let candidate = Schedule::new(graph.relabel(&mapping)?);
            let peak = candidate.peak();
            peaks.push(peak);
            debug!(trial, peak, best_peak, "evaluated relabeling");

            if peak < best_peak {
                info!(trial, peak, previous = best_peak, "new best relabeling");
                best = candidate;
                best_peak = peak;
                best_trial = trial;
            }
        }

        Ok(SearchOutcome {
            best,
            best_peak,
            initial_peak,
            best_trial,
            peaks,
        })
    }
}

/// Convenience wrapper: `ReorderOptimizer::new(trials)?.search(graph, rng)`.
pub fn search<R: Rng + ?Sized>(graph: &Graph, trials: usize, rng: &mut R) -> Result<SearchOutcome> {
    ReorderOptimizer::new(trials)?.search(graph, rng)
}
