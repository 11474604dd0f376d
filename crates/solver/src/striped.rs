//! Column-striped SPMD solver

use tracing::debug;
use vstripe_comm::{ownership, Communicator, COORDINATOR};
use vstripe_matrix::AugmentedMatrix;

use crate::eliminate::{eliminate_striped, StepOutcome};
use crate::error::{Result, SolverError};
use crate::pivot::find_pivot_row;
use crate::reconcile::reconcile_row;
use crate::substitute::back_substitute;

/// Per-worker program for the vertical (column-striped) scheme.
///
/// Every worker holds a full replica of the augmented matrix. Pivot
/// search and row swaps run redundantly on all replicas; column updates
/// are partitioned by the cyclic ownership rule and reconciled through
/// the coordinator after every step. With a group of one the program
/// degenerates to the sequential path with no communication at all.
pub struct StripedSolver<C> {
    comm: C,
}

impl<C: Communicator> StripedSolver<C> {
    pub fn new(comm: C) -> Self {
        Self { comm }
    }

    pub fn comm(&self) -> &C {
        &self.comm
    }

    /// Pre-processing: replicate the coordinator's matrix onto every
    /// worker.
    ///
    /// The coordinator sends each peer its column-cyclic stripe
    /// (anchored at column 0) of every row, then every row is
    /// reconciled once, so all workers enter the run step with
    /// identical replicas. Non-coordinators pass `None`.
    pub fn distribute(&self, matrix: Option<&AugmentedMatrix>) -> Result<AugmentedMatrix> {
        let size = self.comm.size();

        let mut local = if self.comm.is_coordinator() {
            let m = matrix.ok_or(SolverError::MissingCoordinatorInput)?;
            let mut dims = vec![m.n() as f64];
            self.comm.broadcast(COORDINATOR, &mut dims)?;

            for dest in 1..size {
                for i in 0..m.n() {
                    let stripe: Vec<f64> = ownership::owned_cols(dest, 0, m.cols(), size)
                        .map(|j| m.get(i, j))
                        .collect();
                    self.comm.send(dest, stripe)?;
                }
            }
            m.clone()
        } else {
            let mut dims = Vec::new();
            self.comm.broadcast(COORDINATOR, &mut dims)?;
            let n = dims[0] as usize;

            let mut m = AugmentedMatrix::zeros(n);
            let expected = ownership::stripe_len(self.comm.rank(), 0, m.cols(), size);
            for i in 0..n {
                let stripe = self.comm.recv(COORDINATOR)?;
                debug_assert_eq!(stripe.len(), expected);
                for (idx, j) in ownership::owned_cols(self.comm.rank(), 0, m.cols(), size)
                    .enumerate()
                {
                    m.set(i, j, stripe[idx]);
                }
            }
            m
        };

        if size > 1 {
            for i in 0..local.n() {
                reconcile_row(&self.comm, &mut local, 0, i)?;
            }
        }
        Ok(local)
    }

    /// Run all `n` elimination steps on this worker's replica, then
    /// back-substitute on the coordinator and broadcast the solution.
    ///
    /// Returns [`SolverError::SingularSystem`] on every worker when any
    /// pivot fell below the threshold; the replicas never diverge
    /// because the skip decision is taken redundantly on synchronized
    /// state.
    pub fn run(&self, matrix: &mut AugmentedMatrix) -> Result<Vec<f64>> {
        let n = matrix.n();
        let size = self.comm.size();
        debug!(n, size, rank = self.comm.rank(), "starting elimination");

        let mut singular: Option<usize> = None;
        for k in 0..n {
            let pivot_row = find_pivot_row(matrix, k);
            if pivot_row != k {
                matrix.swap_rows(k, pivot_row);
            }
            match eliminate_striped(matrix, k, self.comm.rank(), size) {
                StepOutcome::SkippedSingular => {
                    // Nothing was written, so there is nothing to
                    // reconcile and every replica took the same branch.
                    singular.get_or_insert(k);
                }
                StepOutcome::Eliminated => {
                    if size > 1 {
                        for i in k + 1..n {
                            reconcile_row(&self.comm, matrix, k, i)?;
                        }
                    }
                }
            }
        }

        if let Some(column) = singular {
            return Err(SolverError::SingularSystem { column });
        }

        let mut solution = if self.comm.is_coordinator() {
            back_substitute(matrix)
        } else {
            vec![0.0; n]
        };
        self.comm.broadcast(COORDINATOR, &mut solution)?;
        debug!(rank = self.comm.rank(), "solve complete");
        Ok(solution)
    }

    /// Distribute and run in one call. The coordinator supplies the
    /// parsed matrix; everyone returns the same solution vector.
    pub fn solve(&self, matrix: Option<&AugmentedMatrix>) -> Result<Vec<f64>> {
        let mut local = self.distribute(matrix)?;
        self.run(&mut local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use vstripe_comm::run_spmd;

    fn demo_matrix() -> AugmentedMatrix {
        AugmentedMatrix::from_flat(3, &[
            2.0, 1.0, -1.0, 8.0, //
            -3.0, -1.0, 2.0, -11.0, //
            -2.0, 1.0, 2.0, -3.0,
        ])
        .unwrap()
    }

    #[test]
    fn test_distribute_replicates_the_matrix() {
        let input = demo_matrix();
        let replicas = run_spmd(3, |comm| {
            let solver = StripedSolver::new(comm);
            let local = if solver.comm().is_coordinator() {
                solver.distribute(Some(&input)).unwrap()
            } else {
                solver.distribute(None).unwrap()
            };
            local
        });
        for replica in &replicas {
            assert_eq!(replica, &input);
        }
    }

    #[test]
    fn test_all_workers_agree_on_solution() {
        let input = demo_matrix();
        for size in [1, 2, 3, 4] {
            let solutions = run_spmd(size, |comm| {
                let solver = StripedSolver::new(comm);
                let matrix = solver.comm().is_coordinator().then_some(&input);
                solver.solve(matrix).unwrap()
            });
            for solution in &solutions {
                assert_relative_eq!(solution[0], 2.0, epsilon = 1e-6);
                assert_relative_eq!(solution[1], 3.0, epsilon = 1e-6);
                assert_relative_eq!(solution[2], -1.0, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_single_process_backend_never_communicates() {
        // With a group of one the whole solve must go through without
        // touching any fallible communication primitive.
        let input = demo_matrix();
        let solver = StripedSolver::new(vstripe_comm::SingleProcess);
        let solution = solver.solve(Some(&input)).unwrap();
        assert_relative_eq!(solution[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(solution[1], 3.0, epsilon = 1e-9);
        assert_relative_eq!(solution[2], -1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_replicas_identical_after_every_step() {
        let input = demo_matrix();
        let replicas = run_spmd(2, |comm| {
            let solver = StripedSolver::new(comm);
            let matrix = solver.comm().is_coordinator().then_some(&input);
            let mut local = solver.distribute(matrix).unwrap();
            solver.run(&mut local).unwrap();
            local
        });
        // Bit-for-bit equality of the final replicas, per the
        // reconciliation post-condition.
        assert_eq!(replicas[0], replicas[1]);
    }

    #[test]
    fn test_singular_reported_on_every_rank() {
        let input = AugmentedMatrix::from_flat(2, &[
            1.0, 1.0, 2.0, //
            2.0, 2.0, 4.0,
        ])
        .unwrap();
        let outcomes = run_spmd(2, |comm| {
            let solver = StripedSolver::new(comm);
            let matrix = solver.comm().is_coordinator().then_some(&input);
            solver.solve(matrix)
        });
        for outcome in outcomes {
            assert!(matches!(
                outcome,
                Err(SolverError::SingularSystem { column: 1 })
            ));
        }
    }
}
