//! Back-substitution over the reduced upper-triangular system

use vstripe_matrix::AugmentedMatrix;

/// Compute the solution vector from a fully reduced augmented matrix.
///
/// Pivot rows were normalized during elimination, so the diagonal is 1
/// and the recurrence needs no division:
/// `x[i] = M[i][n] - sum_{j > i} M[i][j] * x[j]`, for `i = n-1` down
/// to `0`. In the striped variant only the coordinator's replica is
/// guaranteed authoritative here, so only the coordinator calls this.
pub fn back_substitute(matrix: &AugmentedMatrix) -> Vec<f64> {
    let n = matrix.n();
    let mut solution = vec![0.0; n];
    for i in (0..n).rev() {
        let mut xi = matrix.get(i, n);
        for j in i + 1..n {
            xi -= matrix.get(i, j) * solution[j];
        }
        solution[i] = xi;
    }
    solution
}
