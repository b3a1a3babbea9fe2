// src/schedule/mod.rs

//! Execution planning for a [`Graph`](crate::graph::Graph).
//!
//! - [`order`] computes the deterministic topological order.
//! - [`liveness`] derives, per step, which earlier results must stay buffered.
//! - [`snapshot`] bundles graph, order and plan into an immutable [`Schedule`].
//! - [`reorder`] searches node relabelings for a lower peak live count.

pub mod liveness;
pub mod order;
pub mod reorder;
pub mod snapshot;

pub use liveness::{LivenessPlan, compute_liveness};
pub use order::{TopologicalOrder, topological_order};
pub use reorder::{ReorderOptimizer, SearchOutcome, search};
pub use snapshot::Schedule;
