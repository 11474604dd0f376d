//! vstripe task harness
//!
//! The validate / pre-process / run / post-process lifecycle shared by
//! the exercise suite, the flat input encoding, the two
//! Gaussian-elimination tasks (sequential reference and column-striped
//! parallel), and a pipeline that runs both and verifies one against
//! the other.

mod error;
mod input;
mod pipeline;
mod task;

pub use error::{HarnessError, Result};
pub use input::{encode, parse, validate};
pub use pipeline::{max_residual, random_system, SolvePipeline, SolveReport};
pub use task::{GaussSeqTask, GaussStripedTask, LifecycleTask};
