use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::{Result, bail};
use randwire::exec::{ComputeUnit, SharedUnit};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub node: usize,
    pub inputs: Vec<Vec<f32>>,
    pub is_source: bool,
}

/// Shared log of calls, in invocation order.
pub type CallLog = Arc<Mutex<Vec<Call>>>;

/// A fake compute unit that:
/// - records which node ran and with which inputs
/// - returns `[node]` so downstream inputs identify their producers.
pub struct RecordingUnit {
    node: usize,
    log: CallLog,
    delay: Option<Duration>,
}

impl ComputeUnit<Vec<f32>> for RecordingUnit {
    fn compute(&self, inputs: &[&Vec<f32>], is_source: bool) -> Result<Vec<f32>> {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        {
            let mut guard = self.log.lock().unwrap();
            guard.push(Call {
                node: self.node,
                inputs: inputs.iter().map(|b| (*b).clone()).collect(),
                is_source,
            });
        }
        Ok(vec![self.node as f32])
    }
}

/// Always fails.
pub struct FailingUnit {
    node: usize,
}

impl ComputeUnit<Vec<f32>> for FailingUnit {
    fn compute(&self, _inputs: &[&Vec<f32>], _is_source: bool) -> Result<Vec<f32>> {
        bail!("node {} refused to compute", self.node)
    }
}

/// One `RecordingUnit` per node, all writing to `log`.
pub fn recording_units(node_count: usize, log: &CallLog) -> Vec<SharedUnit<Vec<f32>>> {
    recording_units_with_delay(node_count, log, None)
}

pub fn recording_units_with_delay(
    node_count: usize,
    log: &CallLog,
    delay: Option<Duration>,
) -> Vec<SharedUnit<Vec<f32>>> {
    (0..node_count)
        .map(|node| {
            Arc::new(RecordingUnit {
                node,
                log: Arc::clone(log),
                delay,
            }) as SharedUnit<Vec<f32>>
        })
        .collect()
}

/// A [`FailingUnit`] for `node`.
pub fn failing_unit(node: usize) -> SharedUnit<Vec<f32>> {
    Arc::new(FailingUnit { node })
}

/// Like [`recording_units`], but `failing` is bound to a [`FailingUnit`].
pub fn units_failing_at(
    node_count: usize,
    failing: usize,
    log: &CallLog,
) -> Vec<SharedUnit<Vec<f32>>> {
    let mut units = recording_units(node_count, log);
    units[failing] = failing_unit(failing);
    units
}

/// Nodes in the order they were computed.
pub fn called_nodes(log: &CallLog) -> Vec<usize> {
    log.lock().unwrap().iter().map(|c| c.node).collect()
}
