//! Column elimination with column-striped work partitioning

use vstripe_comm::ownership;
use vstripe_matrix::AugmentedMatrix;

/// Pivot magnitudes below this are treated as zero and the elimination
/// step is skipped for the whole column.
pub const PIVOT_EPSILON: f64 = 1e-10;

/// What an elimination step did with its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Pivot row normalized and all rows below updated.
    Eliminated,
    /// Pivot too small; the replica was left untouched for this step.
    SkippedSingular,
}

/// Run elimination step `k` on this worker's replica.
///
/// The pivot row is normalized in full on every worker (deterministic
/// division over already-identical inputs needs no reconciliation);
/// each row below then has only the columns owned by `rank` updated.
/// The elimination factor `M[i][k]` is read before any update to row
/// `i`, so the rank-0 stripe overwriting column `k` cannot disturb it.
///
/// On `SkippedSingular` no replica is modified, so all workers stay in
/// lockstep without communicating; callers surface the degenerate
/// column after the elimination loop.
pub fn eliminate_striped(
    matrix: &mut AugmentedMatrix,
    k: usize,
    rank: usize,
    size: usize,
) -> StepOutcome {
    let n = matrix.n();
    let cols = matrix.cols();
    let pivot = matrix.get(k, k);
    if pivot.abs() < PIVOT_EPSILON {
        tracing::warn!(column = k, pivot, "near-singular pivot, skipping column");
        return StepOutcome::SkippedSingular;
    }

    for j in k..cols {
        let v = matrix.get(k, j) / pivot;
        matrix.set(k, j, v);
    }

    for i in k + 1..n {
        let factor = matrix.get(i, k);
        for j in ownership::owned_cols(rank, k, cols, size) {
            let v = matrix.get(i, j) - factor * matrix.get(k, j);
            matrix.set(i, j, v);
        }
    }

    StepOutcome::Eliminated
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_worker_eliminates_full_rows() {
        let mut m = AugmentedMatrix::from_flat(2, &[
            2.0, 1.0, 5.0, //
            1.0, 3.0, 5.0,
        ])
        .unwrap();
        assert_eq!(eliminate_striped(&mut m, 0, 0, 1), StepOutcome::Eliminated);
        // Pivot row normalized: [1, 0.5, 2.5]; row 1 reduced: [0, 2.5, 2.5].
        assert_relative_eq!(m.get(0, 1), 0.5);
        assert_relative_eq!(m.get(1, 0), 0.0);
        assert_relative_eq!(m.get(1, 1), 2.5);
        assert_relative_eq!(m.get(1, 2), 2.5);
    }

    #[test]
    fn test_striped_workers_cover_disjoint_columns() {
        let flat = [
            2.0, 4.0, 6.0, 8.0, //
            1.0, 1.0, 1.0, 1.0, //
            3.0, 2.0, 1.0, 0.0,
        ];
        let mut replica_a = AugmentedMatrix::from_flat(3, &flat).unwrap();
        let mut replica_b = AugmentedMatrix::from_flat(3, &flat).unwrap();
        let mut reference = AugmentedMatrix::from_flat(3, &flat).unwrap();

        eliminate_striped(&mut replica_a, 0, 0, 2);
        eliminate_striped(&mut replica_b, 0, 1, 2);
        eliminate_striped(&mut reference, 0, 0, 1);

        // Each replica's owned columns must match the full reference.
        for i in 1..3 {
            for j in 0..4 {
                let expected = reference.get(i, j);
                let owner = vstripe_comm::ownership::owner_of(j, 0, 2);
                let got = if owner == 0 {
                    replica_a.get(i, j)
                } else {
                    replica_b.get(i, j)
                };
                assert_relative_eq!(got, expected);
            }
        }
    }

    #[test]
    fn test_near_zero_pivot_leaves_replica_untouched() {
        let flat = [
            1e-12, 1.0, 1.0, //
            1.0, 1.0, 2.0,
        ];
        let mut m = AugmentedMatrix::from_flat(2, &flat).unwrap();
        let before = m.clone();
        assert_eq!(
            eliminate_striped(&mut m, 0, 0, 1),
            StepOutcome::SkippedSingular
        );
        assert_eq!(m, before);
    }
}
