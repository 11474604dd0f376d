//! Flat row-major augmented matrix

use crate::error::{MatrixError, Result};

/// An `n x (n+1)` augmented matrix (coefficients plus right-hand side)
/// stored as one flat row-major `Vec<f64>`.
///
/// Indexing is unchecked beyond debug assertions: callers guarantee
/// `row < n` and `col <= n`. Validation of user input happens in the
/// harness before a matrix is ever built.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedMatrix {
    n: usize,
    data: Vec<f64>,
}

impl AugmentedMatrix {
    /// Create an all-zero `n x (n+1)` matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            data: vec![0.0; n * (n + 1)],
        }
    }

    /// Build a matrix from a flat row-major buffer of `n * (n+1)` values.
    pub fn from_flat(n: usize, values: &[f64]) -> Result<Self> {
        if n == 0 {
            return Err(MatrixError::EmptyDimension);
        }
        let expected = n * (n + 1);
        if values.len() != expected {
            return Err(MatrixError::LengthMismatch {
                expected,
                got: values.len(),
            });
        }
        Ok(Self {
            n,
            data: values.to_vec(),
        })
    }

    /// Number of equations (rows).
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of columns, always `n + 1`.
    pub fn cols(&self) -> usize {
        self.n + 1
    }

    #[inline]
    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.n && col <= self.n);
        row * self.cols() + col
    }

    /// Read element `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[self.idx(row, col)]
    }

    /// Write element `(row, col)`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let i = self.idx(row, col);
        self.data[i] = value;
    }

    /// Full row as a slice.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = self.idx(row, 0);
        &self.data[start..start + self.cols()]
    }

    /// Full row as a mutable slice.
    pub fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = self.idx(row, 0);
        let cols = self.cols();
        &mut self.data[start..start + cols]
    }

    /// Exchange all `n + 1` elements of two rows.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        let cols = self.cols();
        let (a, b) = (self.idx(r1, 0), self.idx(r2, 0));
        for j in 0..cols {
            self.data.swap(a + j, b + j);
        }
    }

    /// Copy out the tail of a row, columns `from_col..=n`. Used to build
    /// reconciliation messages.
    pub fn row_tail(&self, row: usize, from_col: usize) -> Vec<f64> {
        let start = self.idx(row, from_col);
        let end = self.idx(row, 0) + self.cols();
        self.data[start..end].to_vec()
    }

    /// Overwrite the tail of a row, columns `from_col..=n`, with the
    /// merged values produced by reconciliation.
    pub fn write_row_tail(&mut self, row: usize, from_col: usize, tail: &[f64]) {
        debug_assert_eq!(tail.len(), self.cols() - from_col);
        let start = self.idx(row, from_col);
        self.data[start..start + tail.len()].copy_from_slice(tail);
    }

    /// The whole flat buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}
