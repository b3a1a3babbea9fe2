// src/config/validate.rs

use crate::config::model::{
    BatchSection, ConfigFile, ExecSection, GenerationSection, RawConfigFile, SearchSection,
};
use crate::errors::{RandwireError, Result};
use crate::graph::RandomGraphModel;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::RandwireError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_generation(&raw.generation)?;
        let model = RandomGraphModel::configure(raw.model.kind, &raw.model.params)?
            .with_max_attempts(raw.generation.max_attempts);
        validate_batch(&raw.batch)?;
        validate_search(&raw.search)?;
        validate_exec(&raw.exec)?;
        Ok(ConfigFile::new_unchecked(model, raw.batch, raw.search, raw.exec))
    }
}

fn validate_generation(generation: &GenerationSection) -> Result<()> {
    if generation.max_attempts == 0 {
        return Err(RandwireError::ConfigError(
            "[generation].max_attempts must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_batch(batch: &BatchSection) -> Result<()> {
    if batch.graph_count == 0 {
        return Err(RandwireError::ConfigError(
            "[batch].graph_count must be >= 1 (got 0)".to_string(),
        ));
    }

    let counts = batch
        .node_counts
        .resolve(batch.graph_count)
        .map_err(|e| RandwireError::ConfigError(format!("[batch].node_counts: {e}")))?;
    if let Some(i) = counts.iter().position(|&n| n == 0) {
        return Err(RandwireError::ConfigError(format!(
            "[batch].node_counts: graph {i} has no nodes"
        )));
    }

    if let Some(seeds) = &batch.seeds {
        seeds
            .resolve(batch.graph_count)
            .map_err(|e| RandwireError::ConfigError(format!("[batch].seeds: {e}")))?;
    }

    Ok(())
}

fn validate_search(search: &SearchSection) -> Result<()> {
    if search.trials == 0 {
        return Err(RandwireError::ConfigError(
            "[search].trials must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_exec(exec: &ExecSection) -> Result<()> {
    if exec.workers == 0 {
        return Err(RandwireError::ConfigError(
            "[exec].workers must be >= 1 (got 0)".to_string(),
        ));
    }
    if exec.input_len == 0 {
        return Err(RandwireError::ConfigError(
            "[exec].input_len must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}
