//! Worker group configuration

use serde::{Deserialize, Serialize};

/// Size of the worker group a solve runs on.
///
/// The group is fixed for the lifetime of a solve: workers are spawned
/// before elimination starts and joined after the solution broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Number of cooperating workers (`P`), at least 1.
    pub num_workers: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { num_workers: 4 }
    }
}

impl WorkerConfig {
    /// Single-worker config: the solver takes its pure sequential path.
    pub fn single() -> Self {
        Self { num_workers: 1 }
    }

    /// Config for `num_workers` workers.
    pub fn with_workers(num_workers: usize) -> Self {
        Self {
            num_workers: num_workers.max(1),
        }
    }
}
