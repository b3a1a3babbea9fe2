// src/graph/batch.rs

//! Batches of independently generated DAGs (for example one per stage of a
//! larger pipeline).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{RandwireError, Result};
use crate::graph::dag::{Graph, to_dag};
use crate::graph::model::{ModelParams, RandomGraphModel};
use crate::types::ModelKind;

/// Node count for every graph of a batch, or one per graph.
///
/// Deserializes from either `node_counts = 32` or `node_counts = [32, 16]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeCounts {
    Uniform(usize),
    PerGraph(Vec<usize>),
}

impl NodeCounts {
    /// Expand to exactly `graph_count` entries.
    pub fn resolve(&self, graph_count: usize) -> Result<Vec<usize>> {
        match self {
            NodeCounts::Uniform(n) => Ok(vec![*n; graph_count]),
            NodeCounts::PerGraph(counts) if counts.len() == graph_count => Ok(counts.clone()),
            NodeCounts::PerGraph(counts) => Err(RandwireError::InvalidParameter(format!(
                "{} node counts given for {graph_count} graphs",
                counts.len()
            ))),
        }
    }
}

/// Seeds for a batch.
///
/// A single base seed `s` expands to `s, s + 1, ..., s + graph_count - 1`, so
/// every graph gets its own seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seeds {
    Base(u64),
    PerGraph(Vec<u64>),
}

impl Seeds {
    /// Expand to exactly `graph_count` seeds.
    pub fn resolve(&self, graph_count: usize) -> Result<Vec<u64>> {
        match self {
            Seeds::Base(base) => Ok((0..graph_count as u64)
                .map(|i| base.wrapping_add(i))
                .collect()),
            Seeds::PerGraph(seeds) if seeds.len() == graph_count => Ok(seeds.clone()),
            Seeds::PerGraph(seeds) => Err(RandwireError::InvalidParameter(format!(
                "{} seeds given for {graph_count} graphs",
                seeds.len()
            ))),
        }
    }
}

/// Configure a model from `kind` + `params` and generate `graph_count` DAGs.
pub fn get_graphs(
    kind: ModelKind,
    params: &ModelParams,
    graph_count: usize,
    node_counts: &NodeCounts,
    seeds: Option<&Seeds>,
) -> Result<Vec<Graph>> {
    let model = RandomGraphModel::configure(kind, params)?;
    generate_batch(&model, graph_count, node_counts, seeds)
}

/// Generate `graph_count` DAGs from an already configured model.
///
/// Graphs share no state and are drawn in parallel; the returned vector is
/// in request order. Unseeded batches draw from OS entropy per graph.
pub fn generate_batch(
    model: &RandomGraphModel,
    graph_count: usize,
    node_counts: &NodeCounts,
    seeds: Option<&Seeds>,
) -> Result<Vec<Graph>> {
    if graph_count == 0 {
        return Err(RandwireError::InvalidParameter(
            "graph count must be at least 1".to_string(),
        ));
    }

    let counts = node_counts.resolve(graph_count)?;
    let seeds: Vec<Option<u64>> = match seeds {
        Some(seeds) => seeds.resolve(graph_count)?.into_iter().map(Some).collect(),
        None => vec![None; graph_count],
    };

    info!(
        model = %model.kind(),
        graph_count,
        ?counts,
        ?seeds,
        "generating graph batch"
    );

    counts
        .into_par_iter()
        .zip(seeds)
        .map(|(node_count, seed)| {
            let skeleton = model.generate(node_count, seed)?;
            to_dag(&skeleton)
        })
        .collect()
}
