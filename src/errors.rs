// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

use crate::types::ModelKind;

#[derive(Error, Debug)]
pub enum RandwireError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(
        "Generation timeout: {model} model with {node_count} nodes stayed disconnected after {attempts} attempts"
    )]
    GenerationTimeout {
        model: ModelKind,
        node_count: usize,
        attempts: usize,
    },

    #[error("Invalid graph: {0}")]
    InvalidGraph(String),

    #[error("Compute error at node {node} (order position {position}): {source}")]
    Compute {
        node: usize,
        position: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Aggregation error: {0}")]
    Aggregation(#[source] anyhow::Error),

    #[error("Executor error: {0}")]
    ExecutorError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, RandwireError>;
