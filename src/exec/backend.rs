// src/exec/backend.rs

//! Pluggable compute and aggregation seams.
//!
//! The executors never look inside a buffer. They hand each node's inputs to
//! a [`ComputeUnit`] and, once the schedule is done, hand the terminal
//! results to an [`Aggregator`]. Production code plugs in real transform
//! blocks; tests plug in recording or failing fakes.
//!
//! - [`SumUnit`] and [`MeanAggregator`] are the small `Vec<f32>` pair the
//!   binary uses to exercise a schedule end to end.

use std::sync::Arc;

use anyhow::{Result, bail};

/// Per-node computation: maps the ordered input buffers to one output.
///
/// Source nodes receive a single input, the externally supplied initial
/// buffer, with `is_source = true`. Other nodes receive their predecessors'
/// results in ascending predecessor-id order.
pub trait ComputeUnit<B>: Send + Sync {
    fn compute(&self, inputs: &[&B], is_source: bool) -> Result<B>;
}

impl<B, F> ComputeUnit<B> for F
where
    F: Fn(&[&B], bool) -> Result<B> + Send + Sync,
{
    fn compute(&self, inputs: &[&B], is_source: bool) -> Result<B> {
        self(inputs, is_source)
    }
}

/// Order-independent reduction over the terminal results.
pub trait Aggregator<B> {
    fn reduce(&self, buffers: Vec<B>) -> Result<B>;
}

impl<B, F> Aggregator<B> for F
where
    F: Fn(Vec<B>) -> Result<B>,
{
    fn reduce(&self, buffers: Vec<B>) -> Result<B> {
        self(buffers)
    }
}

/// Compute unit shared between the executor and worker threads.
pub type SharedUnit<B> = Arc<dyn ComputeUnit<B>>;

/// Bind the same unit to every one of `node_count` nodes.
pub fn uniform_units<B, U>(unit: U, node_count: usize) -> Vec<SharedUnit<B>>
where
    U: ComputeUnit<B> + 'static,
{
    let unit: SharedUnit<B> = Arc::new(unit);
    vec![unit; node_count]
}

/// Elementwise sum of all inputs, plus one.
#[derive(Debug, Clone, Copy, Default)]
pub struct SumUnit;

impl ComputeUnit<Vec<f32>> for SumUnit {
    fn compute(&self, inputs: &[&Vec<f32>], _is_source: bool) -> Result<Vec<f32>> {
        let Some(first) = inputs.first() else {
            bail!("compute unit called without inputs");
        };

        let mut out = vec![1.0; first.len()];
        for input in inputs {
            if input.len() != out.len() {
                bail!(
                    "input length mismatch: expected {}, got {}",
                    out.len(),
                    input.len()
                );
            }
            for (acc, x) in out.iter_mut().zip(input.iter()) {
                *acc += x;
            }
        }
        Ok(out)
    }
}

/// Elementwise mean, the default terminal aggregation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAggregator;

impl Aggregator<Vec<f32>> for MeanAggregator {
    fn reduce(&self, buffers: Vec<Vec<f32>>) -> Result<Vec<f32>> {
        let Some(len) = buffers.first().map(Vec::len) else {
            bail!("nothing to aggregate");
        };

        let mut sum = vec![0.0f32; len];
        for buffer in &buffers {
            if buffer.len() != len {
                bail!(
                    "terminal buffer length mismatch: expected {len}, got {}",
                    buffer.len()
                );
            }
            for (acc, x) in sum.iter_mut().zip(buffer) {
                *acc += x;
            }
        }

        let count = buffers.len() as f32;
        Ok(sum.into_iter().map(|x| x / count).collect())
    }
}
