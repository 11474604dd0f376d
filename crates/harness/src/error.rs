//! Harness error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("System dimension must be a positive integer, got {0}")]
    InvalidDimension(f64),

    #[error("Input length mismatch: expected {expected} values, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Validation rejected the input")]
    ValidationFailed,

    #[error("Verification failed: {message}")]
    VerificationFailed { message: String },

    #[error("Matrix error: {0}")]
    Matrix(#[from] vstripe_matrix::MatrixError),

    #[error("Communication error: {0}")]
    Comm(#[from] vstripe_comm::CommError),

    #[error("Solver error: {0}")]
    Solver(#[from] vstripe_solver::SolverError),
}

pub type Result<T> = std::result::Result<T, HarnessError>;
