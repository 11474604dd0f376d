//! vstripe dense matrix storage
//!
//! Flat row-major storage for the `n x (n+1)` augmented matrix mutated
//! in place by the elimination engine. Every worker holds a full-size
//! replica of this type; consistency between replicas is the solver's
//! concern, not the store's.

mod dense;
mod error;

pub use dense::AugmentedMatrix;
pub use error::{MatrixError, Result};
