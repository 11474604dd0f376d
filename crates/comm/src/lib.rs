//! vstripe communication layer
//!
//! A fixed group of `P` workers runs the same solver program (SPMD) over
//! a flat communicator. This crate provides the communicator abstraction,
//! an in-process implementation backed by blocking channels, the
//! column-cyclic ownership rule shared by the distribution and
//! reconciliation steps, and the scoped-thread worker group runner.
//!
//! Every primitive is a blocking rendezvous: there are no timeouts and
//! no cancellation. A worker that stops responding stalls the whole
//! group, mirroring the flat-communicator model the solver assumes.

mod channel;
mod communicator;
mod config;
mod error;
mod group;
pub mod ownership;

pub use channel::ChannelCommunicator;
pub use communicator::{Communicator, SingleProcess, COORDINATOR};
pub use config::WorkerConfig;
pub use error::{CommError, Result};
pub use group::run_spmd;
