//! Solver error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Singular system: pivot magnitude below threshold in column {column}")]
    SingularSystem { column: usize },

    #[error("Coordinator entered distribution without an input matrix")]
    MissingCoordinatorInput,

    #[error("Matrix error: {0}")]
    Matrix(#[from] vstripe_matrix::MatrixError),

    #[error("Communication error: {0}")]
    Comm(#[from] vstripe_comm::CommError),
}

pub type Result<T> = std::result::Result<T, SolverError>;
