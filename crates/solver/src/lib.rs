//! vstripe elimination core
//!
//! Gaussian elimination with partial pivoting over an augmented matrix,
//! in two variants sharing the same building blocks:
//!
//! - [`SequentialSolver`]: single-worker reference implementation.
//! - [`StripedSolver`]: SPMD per-worker program in which every worker
//!   holds a full replica of the matrix and updates only its
//!   column-cyclic stripe of each row, reconciling rows through the
//!   coordinator after every elimination step.
//!
//! Pivot search and row swaps are recomputed redundantly on every
//! replica instead of being broadcast: replicas are identical entering
//! each step, so the redundant O(n) scan buys the removal of one
//! collective per step.

mod eliminate;
mod error;
mod pivot;
mod reconcile;
mod seq;
mod striped;
mod substitute;

pub use eliminate::{eliminate_striped, StepOutcome, PIVOT_EPSILON};
pub use error::{Result, SolverError};
pub use pivot::find_pivot_row;
pub use reconcile::{merge_row_fragments, reconcile_row};
pub use seq::SequentialSolver;
pub use striped::StripedSolver;
pub use substitute::back_substitute;
