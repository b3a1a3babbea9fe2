// src/schedule/liveness.rs

//! Live-range analysis over a topological order.
//!
//! Everything here is expressed in *order positions*, not node ids: buffer
//! `i` is the result produced at step `i`.
//!
//! - `span(i)` is the position of the last consumer of buffer `i`, or the
//!   final position when the producing node is a sink (terminal results are
//!   aggregated after the last step).
//! - `live(k)` is `{ i | i < k && span(i) >= k }`: the earlier results that
//!   must still be held while step `k` runs.

use std::collections::BTreeSet;

use crate::graph::Graph;
use crate::schedule::order::TopologicalOrder;

/// Per-step live sets for one `(graph, order)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivenessPlan {
    spans: Vec<usize>,
    live: Vec<Vec<usize>>,
    releases: Vec<Vec<usize>>,
}

impl LivenessPlan {
    /// Number of steps (equal to the node count).
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Last step at which the buffer produced at `position` is needed.
    pub fn span(&self, position: usize) -> usize {
        self.spans[position]
    }

    pub fn spans(&self) -> &[usize] {
        &self.spans
    }

    /// Positions held while `step` runs, ascending.
    pub fn live_set(&self, step: usize) -> &[usize] {
        &self.live[step]
    }

    pub fn live_sets(&self) -> &[Vec<usize>] {
        &self.live
    }

    pub fn is_live(&self, position: usize, step: usize) -> bool {
        position < step && self.spans[position] >= step
    }

    /// Buffers that can be dropped once `step` has finished, in descending
    /// position order. Always empty for the final step: whatever is still
    /// held then is the set of terminal results.
    pub fn releases_after(&self, step: usize) -> &[usize] {
        &self.releases[step]
    }

    /// Peak concurrently-live count over all steps.
    pub fn peak(&self) -> usize {
        self.live.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// First step reaching [`peak`](Self::peak).
    pub fn peak_step(&self) -> usize {
        let peak = self.peak();
        self.live
            .iter()
            .position(|set| set.len() == peak)
            .unwrap_or(0)
    }
}

/// Compute spans, live sets and release points.
///
/// Spans come from one pass over predecessor adjacency using the order's
/// id → position map; live sets are then swept forward, adding each newly
/// produced buffer and expiring buffers whose span has passed.
pub fn compute_liveness(graph: &Graph, order: &TopologicalOrder) -> LivenessPlan {
    let n = order.len();
    if n == 0 {
        return LivenessPlan {
            spans: Vec::new(),
            live: Vec::new(),
            releases: Vec::new(),
        };
    }
    let last = n - 1;

    // Visiting consumers in increasing position leaves the maximum behind.
    let mut spans: Vec<Option<usize>> = vec![None; n];
    for (step, &node) in order.nodes().iter().enumerate() {
        for &pred in graph.predecessors(node) {
            spans[order.position_of(pred)] = Some(step);
        }
    }
    let spans: Vec<usize> = spans.into_iter().map(|s| s.unwrap_or(last)).collect();

    let mut expiring: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (position, &span) in spans.iter().enumerate() {
        if span < last {
            expiring[span].push(position);
        }
    }

    let mut live = Vec::with_capacity(n);
    let mut held: BTreeSet<usize> = BTreeSet::new();
    live.push(Vec::new());
    for step in 1..n {
        held.insert(step - 1);
        for position in &expiring[step - 1] {
            held.remove(position);
        }
        live.push(held.iter().copied().collect());
    }

    let releases = expiring
        .into_iter()
        .map(|mut positions| {
            positions.sort_unstable_by(|a, b| b.cmp(a));
            positions
        })
        .collect();

    LivenessPlan {
        spans,
        live,
        releases,
    }
}
