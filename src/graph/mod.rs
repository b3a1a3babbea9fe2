// src/graph/mod.rs

//! Random DAG construction.
//!
//! - [`model`] draws connected undirected graphs from the ER, BA and WS models.
//! - [`undirected`] holds the undirected skeleton those models produce.
//! - [`dag`] orients a skeleton into a [`Graph`] and derives per-node views.
//! - [`batch`] generates several independent graphs at once.

pub mod batch;
pub mod dag;
pub mod model;
pub mod undirected;

pub use batch::{NodeCounts, Seeds, generate_batch, get_graphs};
pub use dag::{Graph, NodeDescriptor, to_dag};
pub use model::{DEFAULT_MAX_ATTEMPTS, ModelParams, ModelSpec, RandomGraphModel};
pub use undirected::UndirectedGraph;
