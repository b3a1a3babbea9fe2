// src/exec/mod.rs

//! Schedule execution layer.
//!
//! - [`backend`] defines the `ComputeUnit` / `Aggregator` seams plus the small
//!   `Vec<f32>` implementations used by the binary.
//! - [`executor`] is the sequential, step-by-step `DagExecutor` state machine
//!   that follows the liveness plan exactly.
//! - [`parallel`] runs independent branches concurrently on a bounded pool
//!   of blocking Tokio workers.

pub mod backend;
pub mod executor;
pub mod parallel;

pub use backend::{Aggregator, ComputeUnit, MeanAggregator, SharedUnit, SumUnit, uniform_units};
pub use executor::{DagExecutor, ExecutorState, ExecutorStep};
pub use parallel::{ExecutionStats, ParallelExecutor};
