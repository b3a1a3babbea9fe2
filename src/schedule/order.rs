// src/schedule/order.rs

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::graph::Graph;

/// Execution order of a [`Graph`] plus the inverse id → position map.
///
/// For every edge `(u, v)`, `u` comes before `v`. Among all valid orders this
/// is the lexicographically smallest one, so identical graphs always
/// schedule identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologicalOrder {
    order: Vec<usize>,
    positions: Vec<usize>,
}

impl TopologicalOrder {
    /// Node ids in execution order.
    pub fn nodes(&self) -> &[usize] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node executed at `position`.
    pub fn node_at(&self, position: usize) -> usize {
        self.order[position]
    }

    /// Position at which `node` executes.
    pub fn position_of(&self, node: usize) -> usize {
        self.positions[node]
    }
}

/// Kahn's algorithm with a min-heap of ready nodes.
pub fn topological_order(graph: &Graph) -> TopologicalOrder {
    let n = graph.node_count();
    let mut remaining: Vec<usize> = (0..n).map(|node| graph.in_degree(node)).collect();
    let mut ready: BinaryHeap<Reverse<usize>> = (0..n)
        .filter(|&node| remaining[node] == 0)
        .map(Reverse)
        .collect();

    let mut order = Vec::with_capacity(n);
    let mut positions = vec![0; n];

    while let Some(Reverse(node)) = ready.pop() {
        positions[node] = order.len();
        order.push(node);
        for &succ in graph.successors(node) {
            remaining[succ] -= 1;
            if remaining[succ] == 0 {
                ready.push(Reverse(succ));
            }
        }
    }

    // Graph construction guarantees acyclicity.
    debug_assert_eq!(order.len(), n, "cycle in a validated graph");

    TopologicalOrder { order, positions }
}
