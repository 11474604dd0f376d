//! Single-worker reference solver

use vstripe_matrix::AugmentedMatrix;

use crate::eliminate::{eliminate_striped, StepOutcome};
use crate::error::{Result, SolverError};
use crate::pivot::find_pivot_row;
use crate::substitute::back_substitute;

/// Sequential Gaussian elimination with partial pivoting.
///
/// Runs the same pivot/eliminate/substitute steps as the striped
/// variant with a worker group of one, and therefore without any
/// reconciliation. Used as the reference the parallel variant is
/// verified against.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialSolver;

impl SequentialSolver {
    pub fn new() -> Self {
        Self
    }

    /// Reduce a copy of `matrix` and return the solution vector.
    ///
    /// Returns [`SolverError::SingularSystem`] when any pivot fell
    /// below [`PIVOT_EPSILON`](crate::PIVOT_EPSILON); the affected
    /// column is reported and no solution is produced.
    pub fn solve(&self, matrix: &AugmentedMatrix) -> Result<Vec<f64>> {
        let mut m = matrix.clone();
        let n = m.n();
        let mut singular: Option<usize> = None;

        for k in 0..n {
            let pivot_row = find_pivot_row(&m, k);
            if pivot_row != k {
                m.swap_rows(k, pivot_row);
            }
            if eliminate_striped(&mut m, k, 0, 1) == StepOutcome::SkippedSingular
                && singular.is_none()
            {
                singular = Some(k);
            }
        }

        if let Some(column) = singular {
            return Err(SolverError::SingularSystem { column });
        }
        Ok(back_substitute(&m))
    }
}
