//! Communication error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommError {
    #[error("Peer {peer} out of range for group of size {size}")]
    InvalidPeer { peer: usize, size: usize },

    #[error("Cannot send a message to self (rank {rank})")]
    SelfMessage { rank: usize },

    #[error("Channel to peer {peer} disconnected")]
    Disconnected { peer: usize },
}

pub type Result<T> = std::result::Result<T, CommError>;
