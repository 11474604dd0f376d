//! Column-cyclic ownership rule
//!
//! For elimination step `k`, column `j >= k` is owned for update
//! purposes by worker `(j - k) % size`. Ownership rotates with `k`: it
//! is a round-robin stripe anchored at the current pivot column, not a
//! fixed partition. The same rule (anchored at column 0) drives the
//! initial matrix distribution.

/// Rank that owns column `col` at pivot step `pivot_col`.
///
/// Caller guarantees `col >= pivot_col` and `size > 0`.
#[inline]
pub fn owner_of(col: usize, pivot_col: usize, size: usize) -> usize {
    (col - pivot_col) % size
}

/// Columns of `pivot_col..cols` owned by `rank`, in ascending order.
pub fn owned_cols(
    rank: usize,
    pivot_col: usize,
    cols: usize,
    size: usize,
) -> impl Iterator<Item = usize> {
    (pivot_col + rank..cols).step_by(size.max(1))
}

/// Number of columns `rank` owns in `pivot_col..cols`.
pub fn stripe_len(rank: usize, pivot_col: usize, cols: usize, size: usize) -> usize {
    owned_cols(rank, pivot_col, cols, size).count()
}
