//! Partial pivot selection

use vstripe_matrix::AugmentedMatrix;

/// Row index in `k..n` holding the largest absolute value in column `k`.
///
/// The scan uses a strict `>` comparison, so on ties the first
/// (lowest-index) maximal row wins. Every worker runs this scan
/// redundantly on its own replica; replicas are identical entering the
/// step, so all workers agree on the result without communicating.
pub fn find_pivot_row(matrix: &AugmentedMatrix, k: usize) -> usize {
    let mut max_row = k;
    let mut max_val = matrix.get(k, k).abs();
    for i in k + 1..matrix.n() {
        let val = matrix.get(i, k).abs();
        if val > max_val {
            max_val = val;
            max_row = i;
        }
    }
    max_row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_largest_magnitude() {
        let m = AugmentedMatrix::from_flat(3, &[
            1.0, 0.0, 0.0, 1.0, //
            -5.0, 1.0, 0.0, 1.0, //
            3.0, 0.0, 1.0, 1.0,
        ])
        .unwrap();
        assert_eq!(find_pivot_row(&m, 0), 1);
    }

    #[test]
    fn test_tie_keeps_first_row() {
        let m = AugmentedMatrix::from_flat(3, &[
            2.0, 0.0, 0.0, 1.0, //
            -2.0, 1.0, 0.0, 1.0, //
            2.0, 0.0, 1.0, 1.0,
        ])
        .unwrap();
        // |2| == |-2| == |2|: the scan must keep row 0.
        assert_eq!(find_pivot_row(&m, 0), 0);
    }

    #[test]
    fn test_scan_starts_at_k() {
        let m = AugmentedMatrix::from_flat(3, &[
            9.0, 1.0, 0.0, 1.0, //
            0.0, 2.0, 0.0, 1.0, //
            0.0, -7.0, 1.0, 1.0,
        ])
        .unwrap();
        // Row 0 is out of range for step 1 regardless of magnitude.
        assert_eq!(find_pivot_row(&m, 1), 2);
    }
}
