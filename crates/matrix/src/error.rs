//! Matrix error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Flat buffer length mismatch: expected {expected}, got {got}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Matrix dimension must be positive")]
    EmptyDimension,
}

pub type Result<T> = std::result::Result<T, MatrixError>;
