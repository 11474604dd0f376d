//! Verification pipeline
//!
//! Runs the sequential reference and the column-striped variant on the
//! same input and compares the solution vectors. This is the
//! parameterized test runner the exercise suite drives; the striped
//! side spawns a fresh worker group per call.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use vstripe_comm::{run_spmd, Communicator, WorkerConfig};

use crate::error::{HarnessError, Result};
use crate::input;
use crate::task::{GaussSeqTask, GaussStripedTask, LifecycleTask};

/// Outcome of running both variants on one input.
#[derive(Debug)]
pub struct SolveReport {
    /// Solution from the sequential reference.
    pub sequential: Vec<f64>,
    /// Solution agreed on by the striped worker group.
    pub striped: Vec<f64>,
    /// Max absolute difference between the two.
    pub max_error: f64,
    /// Max absolute residual of the striped solution.
    pub residual: f64,
}

/// Drives both solver variants over the task lifecycle.
pub struct SolvePipeline {
    config: WorkerConfig,
}

impl SolvePipeline {
    pub fn new(config: WorkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Run the single-process reference.
    pub fn run_sequential(&self, input: &[f64]) -> Result<Vec<f64>> {
        GaussSeqTask::new(input.to_vec()).execute()
    }

    /// Run the striped variant on a fresh group of
    /// `config.num_workers` workers.
    ///
    /// Validation happens here, locally, before any worker is spawned;
    /// a malformed input never reaches the communicator.
    pub fn run_striped(&self, input: &[f64]) -> Result<Vec<f64>> {
        if !input::validate(input) {
            return Err(HarnessError::ValidationFailed);
        }

        let size = self.config.num_workers;
        let mut results = run_spmd(size, |comm| {
            let local_input = if comm.is_coordinator() {
                input.to_vec()
            } else {
                Vec::new()
            };
            GaussStripedTask::new(comm, local_input).execute()
        });

        // The solution is broadcast before the run stage returns, so
        // every rank must hold the identical vector.
        let first = results.remove(0)?;
        for (rank, result) in results.into_iter().enumerate() {
            let other = result?;
            if other != first {
                return Err(HarnessError::VerificationFailed {
                    message: format!("rank {} disagrees with coordinator", rank + 1),
                });
            }
        }
        Ok(first)
    }

    /// Run both variants and report how well they agree.
    pub fn report(&self, input: &[f64]) -> Result<SolveReport> {
        let sequential = self.run_sequential(input)?;
        let striped = self.run_striped(input)?;
        if sequential.len() != striped.len() {
            return Err(HarnessError::VerificationFailed {
                message: format!(
                    "solution length mismatch: {} vs {}",
                    sequential.len(),
                    striped.len()
                ),
            });
        }

        let max_error = sequential
            .iter()
            .zip(&striped)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0f64, f64::max);
        let residual = max_residual(input, &striped)?;

        info!(
            workers = self.config.num_workers,
            max_error, residual, "solve report"
        );
        Ok(SolveReport {
            sequential,
            striped,
            max_error,
            residual,
        })
    }

    /// True when both variants agree within `tolerance`.
    pub fn verify(&self, input: &[f64], tolerance: f64) -> Result<bool> {
        Ok(self.report(input)?.max_error <= tolerance)
    }
}

impl Default for SolvePipeline {
    fn default() -> Self {
        Self::new(WorkerConfig::default())
    }
}

/// Max absolute residual `|A·x - b|` of a candidate solution against
/// the original (un-reduced) system.
pub fn max_residual(input: &[f64], solution: &[f64]) -> Result<f64> {
    let matrix = input::parse(input)?;
    let n = matrix.n();
    if solution.len() != n {
        return Err(HarnessError::LengthMismatch {
            expected: n,
            got: solution.len(),
        });
    }

    let mut worst = 0.0f64;
    for i in 0..n {
        let lhs: f64 = (0..n).map(|j| matrix.get(i, j) * solution[j]).sum();
        worst = worst.max((lhs - matrix.get(i, n)).abs());
    }
    Ok(worst)
}

/// Deterministic well-conditioned fixture: a strictly diagonally
/// dominant system in the flat input encoding.
pub fn random_system(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let cols = n + 1;
    let mut values = vec![0.0; n * cols];
    for i in 0..n {
        let mut off_diagonal = 0.0;
        for j in 0..n {
            if i != j {
                let v: f64 = rng.gen_range(-1.0..1.0);
                values[i * cols + j] = v;
                off_diagonal += v.abs();
            }
        }
        // Strict dominance keeps every pivot comfortably nonzero.
        values[i * cols + i] = off_diagonal + rng.gen_range(1.0..2.0);
        values[i * cols + n] = rng.gen_range(-10.0..10.0);
    }
    input::encode(n, &values)
}
