// src/graph/dag.rs

use std::collections::BTreeSet;

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;
use serde::{Deserialize, Serialize};

use crate::errors::{RandwireError, Result};
use crate::graph::undirected::UndirectedGraph;

/// Directed acyclic graph over the dense node ids `0..node_count`.
///
/// An edge `(u, v)` means "u's result feeds v". The edge set never contains
/// self-loops or duplicates and is always acyclic; every constructor checks
/// this. Once built a `Graph` is immutable: relabeling produces a new value.
///
/// Serialized form is `{ "node_count": N, "edges": [[u, v], ...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct Graph {
    node_count: usize,
    edges: BTreeSet<(usize, usize)>,
    preds: Vec<Vec<usize>>,
    succs: Vec<Vec<usize>>,
}

/// Per-node view derived from a [`Graph`]. Predecessor and successor lists
/// are sorted by node id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub id: usize,
    pub in_degree: usize,
    pub out_degree: usize,
    pub predecessors: Vec<usize>,
    pub successors: Vec<usize>,
}

impl NodeDescriptor {
    pub fn is_source(&self) -> bool {
        self.in_degree == 0
    }

    pub fn is_sink(&self) -> bool {
        self.out_degree == 0
    }
}

/// Wire format: node count plus edge list.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphRepr {
    node_count: usize,
    edges: Vec<(usize, usize)>,
}

impl TryFrom<GraphRepr> for Graph {
    type Error = RandwireError;

    fn try_from(repr: GraphRepr) -> std::result::Result<Self, Self::Error> {
        Graph::new(repr.node_count, repr.edges)
    }
}

impl From<Graph> for GraphRepr {
    fn from(graph: Graph) -> Self {
        GraphRepr {
            node_count: graph.node_count,
            edges: graph.edges.into_iter().collect(),
        }
    }
}

impl Graph {
    /// Build a DAG from an explicit edge list, rejecting self-loops,
    /// duplicate edges, out-of-range endpoints and cycles.
    pub fn new(
        node_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self> {
        let edges = collect_edges(node_count, edges)?;
        ensure_acyclic(node_count, &edges)?;
        Ok(Self::from_checked(node_count, edges))
    }

    /// Adjacency construction for an edge set already known to be a simple DAG.
    fn from_checked(node_count: usize, edges: BTreeSet<(usize, usize)>) -> Self {
        let mut preds = vec![Vec::new(); node_count];
        let mut succs = vec![Vec::new(); node_count];
        // Edges iterate in (u, v) order, so both lists come out sorted.
        for &(u, v) in &edges {
            succs[u].push(v);
            preds[v].push(u);
        }

        Self {
            node_count,
            edges,
            preds,
            succs,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges in `(u, v)` lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().copied()
    }

    pub fn contains_edge(&self, u: usize, v: usize) -> bool {
        self.edges.contains(&(u, v))
    }

    pub fn predecessors(&self, node: usize) -> &[usize] {
        self.preds.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn successors(&self, node: usize) -> &[usize] {
        self.succs.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn in_degree(&self, node: usize) -> usize {
        self.predecessors(node).len()
    }

    pub fn out_degree(&self, node: usize) -> usize {
        self.successors(node).len()
    }

    /// Nodes with in-degree zero, ascending.
    pub fn sources(&self) -> Vec<usize> {
        (0..self.node_count)
            .filter(|&n| self.preds[n].is_empty())
            .collect()
    }

    /// Nodes with out-degree zero, ascending.
    pub fn sinks(&self) -> Vec<usize> {
        (0..self.node_count)
            .filter(|&n| self.succs[n].is_empty())
            .collect()
    }

    pub fn descriptor(&self, node: usize) -> Option<NodeDescriptor> {
        if node >= self.node_count {
            return None;
        }
        Some(NodeDescriptor {
            id: node,
            in_degree: self.preds[node].len(),
            out_degree: self.succs[node].len(),
            predecessors: self.preds[node].clone(),
            successors: self.succs[node].clone(),
        })
    }

    pub fn descriptors(&self) -> Vec<NodeDescriptor> {
        (0..self.node_count)
            .filter_map(|n| self.descriptor(n))
            .collect()
    }

    /// Rename every node `n` to `mapping[n]`.
    ///
    /// `mapping` must be a permutation of `0..node_count`. The result is
    /// isomorphic to `self`; only the labels (and therefore tie-breaks in the
    /// topological order) change.
    pub fn relabel(&self, mapping: &[usize]) -> Result<Graph> {
        if mapping.len() != self.node_count {
            return Err(RandwireError::InvalidGraph(format!(
                "relabeling covers {} nodes but the graph has {}",
                mapping.len(),
                self.node_count
            )));
        }

        let mut seen = vec![false; self.node_count];
        for &target in mapping {
            if target >= self.node_count || seen[target] {
                return Err(RandwireError::InvalidGraph(format!(
                    "relabeling is not a bijection on 0..{} (label {target})",
                    self.node_count
                )));
            }
            seen[target] = true;
        }

        let edges = self
            .edges
            .iter()
            .map(|&(u, v)| (mapping[u], mapping[v]))
            .collect();
        Ok(Self::from_checked(self.node_count, edges))
    }
}

/// Convert an undirected skeleton into a DAG by orienting every edge from
/// the lower to the higher node id.
///
/// Fails with [`RandwireError::InvalidGraph`] on self-loops, repeated edges
/// (in either orientation) or endpoints outside the node range.
pub fn to_dag(graph: &UndirectedGraph) -> Result<Graph> {
    let node_count = graph.node_count();
    let mut edges = BTreeSet::new();

    for &(u, v) in graph.edges() {
        if u == v {
            return Err(RandwireError::InvalidGraph(format!(
                "self-loop on node {u}"
            )));
        }
        if u >= node_count || v >= node_count {
            return Err(RandwireError::InvalidGraph(format!(
                "edge {{{u}, {v}}} references a node outside 0..{node_count}"
            )));
        }
        if !edges.insert((u.min(v), u.max(v))) {
            return Err(RandwireError::InvalidGraph(format!(
                "duplicate edge {{{u}, {v}}}"
            )));
        }
    }

    if node_count == 0 {
        return Err(RandwireError::InvalidGraph(
            "graph must have at least one node".to_string(),
        ));
    }

    // Lower-to-higher orientation cannot close a cycle.
    Ok(Graph::from_checked(node_count, edges))
}

fn collect_edges(
    node_count: usize,
    edges: impl IntoIterator<Item = (usize, usize)>,
) -> Result<BTreeSet<(usize, usize)>> {
    if node_count == 0 {
        return Err(RandwireError::InvalidGraph(
            "graph must have at least one node".to_string(),
        ));
    }

    let mut set = BTreeSet::new();
    for (u, v) in edges {
        if u == v {
            return Err(RandwireError::InvalidGraph(format!(
                "self-loop on node {u}"
            )));
        }
        if u >= node_count || v >= node_count {
            return Err(RandwireError::InvalidGraph(format!(
                "edge ({u}, {v}) references a node outside 0..{node_count}"
            )));
        }
        if !set.insert((u, v)) {
            return Err(RandwireError::InvalidGraph(format!(
                "duplicate edge ({u}, {v})"
            )));
        }
    }
    Ok(set)
}

fn ensure_acyclic(node_count: usize, edges: &BTreeSet<(usize, usize)>) -> Result<()> {
    let mut graph = DiGraph::<(), ()>::with_capacity(node_count, edges.len());
    let nodes: Vec<_> = (0..node_count).map(|_| graph.add_node(())).collect();
    for &(u, v) in edges {
        graph.add_edge(nodes[u], nodes[v], ());
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => Err(RandwireError::InvalidGraph(format!(
            "cycle detected involving node {}",
            cycle.node_id().index()
        ))),
    }
}
