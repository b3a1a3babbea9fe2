// src/graph/model.rs

//! Random graph models used to draw the undirected skeleton of a network.
//!
//! [`RandomGraphModel::configure`] validates model parameters up front, so a
//! configured model only fails at generation time for node-count related
//! reasons (`M`/`K` not smaller than the node count) or when the connectivity
//! rejection loop runs out of attempts.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{RandwireError, Result};
use crate::graph::undirected::UndirectedGraph;
use crate::types::ModelKind;

/// Default budget for the connectivity rejection loop.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Raw model parameters, keyed the way configuration files spell them.
///
/// ```toml
/// P = 0.75
/// K = 4
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    /// Edge (ER) or rewiring (WS) probability.
    #[serde(rename = "P", default, skip_serializing_if = "Option::is_none")]
    pub p: Option<f64>,

    /// Edges attached per new node (BA).
    #[serde(rename = "M", default, skip_serializing_if = "Option::is_none")]
    pub m: Option<usize>,

    /// Ring lattice degree (WS), must be even.
    #[serde(rename = "K", default, skip_serializing_if = "Option::is_none")]
    pub k: Option<usize>,
}

impl ModelParams {
    pub fn erdos_renyi(p: f64) -> Self {
        Self {
            p: Some(p),
            ..Self::default()
        }
    }

    pub fn barabasi_albert(m: usize) -> Self {
        Self {
            m: Some(m),
            ..Self::default()
        }
    }

    pub fn watts_strogatz(k: usize, p: f64) -> Self {
        Self {
            p: Some(p),
            k: Some(k),
            ..Self::default()
        }
    }
}

/// Validated, model-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelSpec {
    ErdosRenyi { p: f64 },
    BarabasiAlbert { m: usize },
    WattsStrogatz { k: usize, p: f64 },
}

/// A configured random graph model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomGraphModel {
    spec: ModelSpec,
    max_attempts: usize,
}

impl RandomGraphModel {
    /// Validate `params` for `kind` before any generation is attempted.
    pub fn configure(kind: ModelKind, params: &ModelParams) -> Result<Self> {
        let spec = match kind {
            ModelKind::ErdosRenyi => ModelSpec::ErdosRenyi {
                p: require_probability(kind, params.p)?,
            },
            ModelKind::BarabasiAlbert => {
                let m = params.m.ok_or_else(|| missing(kind, "M"))?;
                if m == 0 {
                    return Err(RandwireError::InvalidParameter(format!(
                        "{kind} model: param M must be a positive integer (got 0)"
                    )));
                }
                ModelSpec::BarabasiAlbert { m }
            }
            ModelKind::WattsStrogatz => {
                let k = params.k.ok_or_else(|| missing(kind, "K"))?;
                let p = require_probability(kind, params.p)?;
                if k == 0 || k % 2 != 0 {
                    return Err(RandwireError::InvalidParameter(format!(
                        "{kind} model: param K must be a positive even integer (got {k})"
                    )));
                }
                ModelSpec::WattsStrogatz { k, p }
            }
        };

        Ok(Self {
            spec,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Override the connectivity rejection budget (at least one attempt is
    /// always made).
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn kind(&self) -> ModelKind {
        match self.spec {
            ModelSpec::ErdosRenyi { .. } => ModelKind::ErdosRenyi,
            ModelSpec::BarabasiAlbert { .. } => ModelKind::BarabasiAlbert,
            ModelSpec::WattsStrogatz { .. } => ModelKind::WattsStrogatz,
        }
    }

    pub fn spec(&self) -> ModelSpec {
        self.spec
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Draw a connected graph with `node_count` nodes.
    ///
    /// With `Some(seed)` the result is fully determined by the seed, the
    /// parameters and `node_count`; with `None` the generator is seeded from
    /// OS entropy.
    pub fn generate(&self, node_count: usize, seed: Option<u64>) -> Result<UndirectedGraph> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_with_rng(node_count, &mut rng)
    }

    /// Same as [`generate`](Self::generate) but drawing from a caller-owned
    /// random source.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        node_count: usize,
        rng: &mut R,
    ) -> Result<UndirectedGraph> {
        let kind = self.kind();
        if node_count == 0 {
            return Err(RandwireError::InvalidParameter(format!(
                "{kind} model: node count must be at least 1"
            )));
        }

        match self.spec {
            ModelSpec::ErdosRenyi { p } => {
                self.until_connected(node_count, rng, |rng| erdos_renyi(node_count, p, rng))
            }
            ModelSpec::BarabasiAlbert { m } => {
                if m >= node_count {
                    return Err(RandwireError::InvalidParameter(format!(
                        "{kind} model: param M must be smaller than the node count (M = {m}, nodes = {node_count})"
                    )));
                }
                Ok(barabasi_albert(node_count, m, rng))
            }
            ModelSpec::WattsStrogatz { k, p } => {
                if k >= node_count {
                    return Err(RandwireError::InvalidParameter(format!(
                        "{kind} model: param K must be smaller than the node count (K = {k}, nodes = {node_count})"
                    )));
                }
                self.until_connected(node_count, rng, |rng| watts_strogatz(node_count, k, p, rng))
            }
        }
    }

    /// Rejection-sample `draw` until the result is connected or the attempt
    /// budget is spent.
    fn until_connected<R, F>(
        &self,
        node_count: usize,
        rng: &mut R,
        mut draw: F,
    ) -> Result<UndirectedGraph>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> UndirectedGraph,
    {
        let kind = self.kind();
        for attempt in 1..=self.max_attempts {
            let graph = draw(rng);
            if graph.is_connected() {
                debug!(
                    model = %kind,
                    node_count,
                    attempt,
                    edges = graph.edge_count(),
                    "drew connected graph"
                );
                return Ok(graph);
            }
            debug!(model = %kind, node_count, attempt, "graph disconnected; redrawing");
        }

        warn!(
            model = %kind,
            node_count,
            attempts = self.max_attempts,
            "connectivity rejection budget exhausted"
        );
        Err(RandwireError::GenerationTimeout {
            model: kind,
            node_count,
            attempts: self.max_attempts,
        })
    }
}

fn missing(kind: ModelKind, key: &str) -> RandwireError {
    RandwireError::InvalidParameter(format!("{kind} model requires param {key}"))
}

fn require_probability(kind: ModelKind, p: Option<f64>) -> Result<f64> {
    let p = p.ok_or_else(|| missing(kind, "P"))?;
    if !(0.0..=1.0).contains(&p) {
        return Err(RandwireError::InvalidParameter(format!(
            "{kind} model: param P must be a real number between 0 and 1 (got {p})"
        )));
    }
    Ok(p)
}

/// G(n, p): every unordered pair is an edge independently with probability `p`.
fn erdos_renyi<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> UndirectedGraph {
    let mut edges = BTreeSet::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.random::<f64>() < p {
                edges.insert((u, v));
            }
        }
    }
    UndirectedGraph::from_edge_set(n, &edges)
}

/// Preferential attachment: node `m` joins the `m` initial nodes, then each
/// following node attaches to `m` distinct targets drawn proportionally to
/// degree.
fn barabasi_albert<R: Rng + ?Sized>(n: usize, m: usize, rng: &mut R) -> UndirectedGraph {
    let mut edges = BTreeSet::new();
    let mut targets: Vec<usize> = (0..m).collect();
    let mut repeated: Vec<usize> = Vec::with_capacity(2 * n * m);

    for source in m..n {
        for &target in &targets {
            edges.insert((target.min(source), target.max(source)));
        }
        repeated.extend_from_slice(&targets);
        repeated.extend(std::iter::repeat_n(source, m));
        targets = random_subset(&repeated, m, rng);
    }

    UndirectedGraph::from_edge_set(n, &edges)
}

/// `m` distinct values drawn uniformly from `seq` (with multiplicity).
fn random_subset<R: Rng + ?Sized>(seq: &[usize], m: usize, rng: &mut R) -> Vec<usize> {
    let mut picked = BTreeSet::new();
    while picked.len() < m {
        picked.insert(seq[rng.random_range(0..seq.len())]);
    }
    picked.into_iter().collect()
}

/// Ring lattice of degree `k`, each clockwise edge rewired with probability
/// `p` to a uniformly chosen node that keeps the graph simple.
fn watts_strogatz<R: Rng + ?Sized>(n: usize, k: usize, p: f64, rng: &mut R) -> UndirectedGraph {
    let mut adj: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); n];
    for j in 1..=k / 2 {
        for u in 0..n {
            let v = (u + j) % n;
            adj[u].insert(v);
            adj[v].insert(u);
        }
    }

    for j in 1..=k / 2 {
        for u in 0..n {
            let v = (u + j) % n;
            if rng.random::<f64>() >= p {
                continue;
            }

            let mut w = rng.random_range(0..n);
            let mut saturated = false;
            while w == u || adj[u].contains(&w) {
                w = rng.random_range(0..n);
                if adj[u].len() >= n - 1 {
                    saturated = true;
                    break;
                }
            }
            if saturated {
                continue;
            }

            adj[u].remove(&v);
            adj[v].remove(&u);
            adj[u].insert(w);
            adj[w].insert(u);
        }
    }

    let edges: BTreeSet<(usize, usize)> = adj
        .iter()
        .enumerate()
        .flat_map(|(u, nbrs)| nbrs.iter().filter(move |&&v| u < v).map(move |&v| (u, v)))
        .collect();
    UndirectedGraph::from_edge_set(n, &edges)
}
