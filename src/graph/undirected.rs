// src/graph/undirected.rs

use std::collections::BTreeSet;

use petgraph::algo::connected_components;
use petgraph::graph::UnGraph;

/// Undirected skeleton produced by a random graph model.
///
/// Nodes are the dense ids `0..node_count`. The edge list is kept exactly as
/// given so that malformed input (self-loops, duplicates) can be rejected
/// later by [`crate::graph::to_dag`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndirectedGraph {
    node_count: usize,
    edges: Vec<(usize, usize)>,
}

impl UndirectedGraph {
    /// Wrap a raw edge list without validation.
    pub fn from_edges(node_count: usize, edges: Vec<(usize, usize)>) -> Self {
        Self { node_count, edges }
    }

    /// Build from a set of normalized `(low, high)` pairs; used by the
    /// generators, whose adjacency bookkeeping already rules out bad edges.
    pub(crate) fn from_edge_set(node_count: usize, edges: &BTreeSet<(usize, usize)>) -> Self {
        Self {
            node_count,
            edges: edges.iter().copied().collect(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether every node can reach every other node.
    ///
    /// The empty graph is treated as disconnected. Edges with an endpoint
    /// outside `0..node_count` are ignored.
    pub fn is_connected(&self) -> bool {
        if self.node_count == 0 {
            return false;
        }

        let mut graph = UnGraph::<(), ()>::with_capacity(self.node_count, self.edges.len());
        let nodes: Vec<_> = (0..self.node_count).map(|_| graph.add_node(())).collect();
        for &(u, v) in &self.edges {
            if u < self.node_count && v < self.node_count {
                graph.add_edge(nodes[u], nodes[v], ());
            }
        }

        connected_components(&graph) == 1
    }
}
