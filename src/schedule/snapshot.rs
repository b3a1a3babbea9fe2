// src/schedule/snapshot.rs

use crate::graph::Graph;
use crate::schedule::liveness::{LivenessPlan, compute_liveness};
use crate::schedule::order::{TopologicalOrder, topological_order};

/// Immutable `(graph, order, plan)` triple.
///
/// Every relabeling tried by the reorder search gets its own snapshot, and
/// the executor runs against one; nothing is shared or patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    graph: Graph,
    order: TopologicalOrder,
    plan: LivenessPlan,
}

impl Schedule {
    pub fn new(graph: Graph) -> Self {
        let order = topological_order(&graph);
        let plan = compute_liveness(&graph, &order);
        Self { graph, order, plan }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn order(&self) -> &TopologicalOrder {
        &self.order
    }

    pub fn plan(&self) -> &LivenessPlan {
        &self.plan
    }

    pub fn peak(&self) -> usize {
        self.plan.peak()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
