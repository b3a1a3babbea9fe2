#![allow(dead_code)]

use randwire::config::{
    BatchSection, ConfigFile, ExecSection, GenerationSection, ModelSection, RawConfigFile,
    SearchSection,
};
use randwire::graph::{Graph, ModelParams, NodeCounts, Seeds};
use randwire::types::ModelKind;

/// Builder for small hand-written DAGs.
pub struct GraphBuilder {
    node_count: usize,
    edges: Vec<(usize, usize)>,
}

impl GraphBuilder {
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
        }
    }

    pub fn edge(mut self, u: usize, v: usize) -> Self {
        self.edges.push((u, v));
        self
    }

    pub fn edges(mut self, edges: &[(usize, usize)]) -> Self {
        self.edges.extend_from_slice(edges);
        self
    }

    /// `0 -> 1 -> ... -> n-1`
    pub fn chain(node_count: usize) -> Self {
        let edges = (1..node_count).map(|v| (v - 1, v)).collect();
        Self { node_count, edges }
    }

    /// `0 -> 1, 0 -> 2, ..., 0 -> n-1`
    pub fn star(node_count: usize) -> Self {
        let edges = (1..node_count).map(|v| (0, v)).collect();
        Self { node_count, edges }
    }

    /// `0 -> {1, 2} -> 3`
    pub fn diamond() -> Self {
        Self::new(4).edges(&[(0, 1), (0, 2), (1, 3), (2, 3)])
    }

    pub fn build(self) -> Graph {
        Graph::new(self.node_count, self.edges).expect("Failed to build valid graph from builder")
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new(kind: ModelKind) -> Self {
        Self {
            config: RawConfigFile {
                model: ModelSection {
                    kind,
                    params: ModelParams::default(),
                },
                generation: GenerationSection::default(),
                batch: BatchSection::default(),
                search: SearchSection::default(),
                exec: ExecSection::default(),
            },
        }
    }

    pub fn p(mut self, p: f64) -> Self {
        self.config.model.params.p = Some(p);
        self
    }

    pub fn m(mut self, m: usize) -> Self {
        self.config.model.params.m = Some(m);
        self
    }

    pub fn k(mut self, k: usize) -> Self {
        self.config.model.params.k = Some(k);
        self
    }

    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.config.generation.max_attempts = max_attempts;
        self
    }

    pub fn graphs(mut self, graph_count: usize, node_counts: NodeCounts) -> Self {
        self.config.batch.graph_count = graph_count;
        self.config.batch.node_counts = node_counts;
        self
    }

    pub fn seeds(mut self, seeds: Seeds) -> Self {
        self.config.batch.seeds = Some(seeds);
        self
    }

    pub fn trials(mut self, trials: usize) -> Self {
        self.config.search.trials = trials;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.config.exec.workers = workers;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}
