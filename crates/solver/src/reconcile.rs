//! Row reconciliation protocol
//!
//! After a round of column-striped updates, each worker's replica of a
//! row is authoritative only on that worker's owned columns; everything
//! else is stale. The coordinator gathers every worker's tail fragment,
//! overlays each sender's owned stripe, and replies with the fully
//! merged tail.
//!
//! Post-condition: every worker's replica of the row holds identical
//! values for columns `pivot_col..=n`.

use vstripe_comm::{ownership, Communicator, COORDINATOR};
use vstripe_matrix::AugmentedMatrix;

use crate::error::Result;

/// Merge per-worker tail fragments into the complete row tail.
///
/// `fragments[r]` is rank `r`'s copy of the row tail (columns
/// `pivot_col..cols`); only the columns rank `r` owns for this step are
/// meaningful in it. The merged tail takes each column from its owner.
pub fn merge_row_fragments(pivot_col: usize, cols: usize, fragments: &[Vec<f64>]) -> Vec<f64> {
    let size = fragments.len();
    let mut merged = vec![0.0; cols - pivot_col];
    for (rank, fragment) in fragments.iter().enumerate() {
        debug_assert_eq!(fragment.len(), merged.len());
        for j in ownership::owned_cols(rank, pivot_col, cols, size) {
            merged[j - pivot_col] = fragment[j - pivot_col];
        }
    }
    merged
}

/// Reconcile one row across all workers (coordinator pattern).
///
/// Workers send their tail fragment to the coordinator; it merges them
/// by the ownership rule, installs the merged tail into its own replica
/// and replies with it; senders overwrite their replica's tail. With a
/// single worker this is never called: elimination is already complete
/// locally.
pub fn reconcile_row<C: Communicator>(
    comm: &C,
    matrix: &mut AugmentedMatrix,
    pivot_col: usize,
    row: usize,
) -> Result<()> {
    let cols = matrix.cols();
    let tail = matrix.row_tail(row, pivot_col);

    if comm.is_coordinator() {
        let mut fragments = Vec::with_capacity(comm.size());
        fragments.push(tail);
        for src in 1..comm.size() {
            fragments.push(comm.recv(src)?);
        }
        let merged = merge_row_fragments(pivot_col, cols, &fragments);
        matrix.write_row_tail(row, pivot_col, &merged);
        for dest in 1..comm.size() {
            comm.send(dest, merged.clone())?;
        }
    } else {
        comm.send(COORDINATOR, tail)?;
        let merged = comm.recv(COORDINATOR)?;
        matrix.write_row_tail(row, pivot_col, &merged);
    }

    Ok(())
}
