// src/config/model.rs

use serde::Deserialize;

use crate::graph::model::{DEFAULT_MAX_ATTEMPTS, ModelParams, RandomGraphModel};
use crate::graph::{NodeCounts, Seeds};
use crate::types::ModelKind;

/// Run configuration exactly as read from a TOML file, before validation.
///
/// ```toml
/// [model]
/// kind = "WS"
/// P = 0.75
/// K = 4
///
/// [generation]
/// max_attempts = 1000
///
/// [batch]
/// graph_count = 3
/// node_counts = 32
/// seeds = 7
///
/// [search]
/// trials = 20
/// seed = 1
///
/// [exec]
/// workers = 4
/// input_len = 4
/// ```
///
/// Only `[model]` is required; every other section has defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    pub model: ModelSection,

    #[serde(default)]
    pub generation: GenerationSection,

    #[serde(default)]
    pub batch: BatchSection,

    #[serde(default)]
    pub search: SearchSection,

    #[serde(default)]
    pub exec: ExecSection,
}

/// `[model]` section: model kind plus its capitalised parameters
/// (`P`, `M`, `K`), which sit directly in the section.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSection {
    pub kind: ModelKind,

    #[serde(flatten)]
    pub params: ModelParams,
}

/// `[generation]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSection {
    /// Connectivity rejection budget for ER and WS.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for GenerationSection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

/// `[batch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchSection {
    #[serde(default = "default_graph_count")]
    pub graph_count: usize,

    /// Either one node count for all graphs or one per graph.
    #[serde(default = "default_node_counts")]
    pub node_counts: NodeCounts,

    /// Base seed or one seed per graph; omitted means OS entropy.
    #[serde(default)]
    pub seeds: Option<Seeds>,
}

fn default_graph_count() -> usize {
    1
}

fn default_node_counts() -> NodeCounts {
    NodeCounts::Uniform(32)
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            graph_count: default_graph_count(),
            node_counts: default_node_counts(),
            seeds: None,
        }
    }
}

/// `[search]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchSection {
    /// Number of labelings to evaluate; 1 keeps the generated labeling.
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Seed for the relabeling stream; omitted means OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_trials() -> usize {
    1
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            seed: None,
        }
    }
}

/// `[exec]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ExecSection {
    /// 1 runs the sequential executor; more selects the concurrent one.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Length of the demo input vector.
    #[serde(default = "default_input_len")]
    pub input_len: usize,
}

fn default_workers() -> usize {
    1
}

fn default_input_len() -> usize {
    4
}

impl Default for ExecSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            input_len: default_input_len(),
        }
    }
}

/// Validated configuration. Only obtainable through
/// `ConfigFile::try_from(RawConfigFile)`, which configures the graph model
/// and checks every section.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub model: RandomGraphModel,
    pub batch: BatchSection,
    pub search: SearchSection,
    pub exec: ExecSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        model: RandomGraphModel,
        batch: BatchSection,
        search: SearchSection,
        exec: ExecSection,
    ) -> Self {
        Self {
            model,
            batch,
            search,
            exec,
        }
    }
}
