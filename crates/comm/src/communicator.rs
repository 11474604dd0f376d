//! Communicator abstraction over a flat worker group

use crate::error::{CommError, Result};

/// Rank of the coordinator worker. The coordinator parses input, merges
/// row fragments during reconciliation, runs back-substitution and is
/// the root of every broadcast.
pub const COORDINATOR: usize = 0;

/// Blocking point-to-point and collective primitives over a flat group
/// of `size()` workers carrying `Vec<f64>` buffers.
///
/// Implementations: [`SingleProcess`] (no-op, size 1) and
/// [`ChannelCommunicator`](crate::ChannelCommunicator) (in-process
/// channel mesh).
pub trait Communicator {
    /// This worker's rank, `0..size()`.
    fn rank(&self) -> usize;

    /// Total number of workers in the group.
    fn size(&self) -> usize;

    /// Send a buffer to `dest`, blocking until accepted.
    fn send(&self, dest: usize, buf: Vec<f64>) -> Result<()>;

    /// Receive the next buffer sent by `src`, blocking until it arrives.
    fn recv(&self, src: usize) -> Result<Vec<f64>>;

    /// Broadcast `buf` from `root` to every worker. On non-root workers
    /// the buffer is replaced with the root's copy.
    fn broadcast(&self, root: usize, buf: &mut Vec<f64>) -> Result<()> {
        if self.rank() == root {
            for dest in 0..self.size() {
                if dest != root {
                    self.send(dest, buf.clone())?;
                }
            }
        } else {
            *buf = self.recv(root)?;
        }
        Ok(())
    }

    /// Block until every worker in the group has reached this point.
    fn barrier(&self);

    /// Whether this worker is the coordinator.
    fn is_coordinator(&self) -> bool {
        self.rank() == COORDINATOR
    }
}

/// No-op backend for single-worker execution.
///
/// Point-to-point operations are errors (there are no peers); the
/// collectives pass through unchanged. The solver takes its pure
/// sequential path when `size() == 1`, so in practice none of the
/// fallible primitives are ever reached.
#[derive(Debug, Clone, Copy, Default)]
pub struct SingleProcess;

impl Communicator for SingleProcess {
    fn rank(&self) -> usize {
        COORDINATOR
    }

    fn size(&self) -> usize {
        1
    }

    fn send(&self, dest: usize, _buf: Vec<f64>) -> Result<()> {
        Err(CommError::InvalidPeer { peer: dest, size: 1 })
    }

    fn recv(&self, src: usize) -> Result<Vec<f64>> {
        Err(CommError::InvalidPeer { peer: src, size: 1 })
    }

    fn broadcast(&self, _root: usize, _buf: &mut Vec<f64>) -> Result<()> {
        // Single worker: the buffer is already everywhere it needs to be.
        Ok(())
    }

    fn barrier(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_process_shape() {
        let comm = SingleProcess;
        assert_eq!(comm.rank(), 0);
        assert_eq!(comm.size(), 1);
        assert!(comm.is_coordinator());
    }

    #[test]
    fn test_single_process_broadcast_is_identity() {
        let comm = SingleProcess;
        let mut buf = vec![1.0, 2.0];
        comm.broadcast(0, &mut buf).unwrap();
        assert_eq!(buf, vec![1.0, 2.0]);
    }

    #[test]
    fn test_single_process_has_no_peers() {
        let comm = SingleProcess;
        assert!(comm.send(1, vec![]).is_err());
        assert!(comm.recv(1).is_err());
    }
}
