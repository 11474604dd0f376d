//! In-process channel-mesh communicator

use std::sync::{Arc, Barrier};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::communicator::Communicator;
use crate::error::{CommError, Result};

/// One endpoint of a fully connected in-process worker group.
///
/// `connect(size)` wires a dedicated channel for every ordered pair of
/// ranks, so `recv(src)` always observes messages from `src` in the
/// order `src` sent them and never interleaves peers. A shared barrier
/// provides the all-participant rendezvous.
pub struct ChannelCommunicator {
    rank: usize,
    size: usize,
    /// `senders[dest]` is the channel rank -> dest; `None` at own rank.
    senders: Vec<Option<Sender<Vec<f64>>>>,
    /// `receivers[src]` is the channel src -> rank; `None` at own rank.
    receivers: Vec<Option<Receiver<Vec<f64>>>>,
    barrier: Arc<Barrier>,
}

impl ChannelCommunicator {
    /// Create all `size` endpoints of a connected group. Endpoint `r`
    /// of the returned vector has rank `r`.
    pub fn connect(size: usize) -> Vec<Self> {
        assert!(size > 0, "worker group must have at least one member");

        let mut tx: Vec<Vec<Option<Sender<Vec<f64>>>>> = (0..size)
            .map(|_| (0..size).map(|_| None).collect())
            .collect();
        let mut rx: Vec<Vec<Option<Receiver<Vec<f64>>>>> = (0..size)
            .map(|_| (0..size).map(|_| None).collect())
            .collect();

        for from in 0..size {
            for to in 0..size {
                if from != to {
                    let (s, r) = unbounded();
                    tx[from][to] = Some(s);
                    rx[to][from] = Some(r);
                }
            }
        }

        let barrier = Arc::new(Barrier::new(size));

        tx.into_iter()
            .zip(rx)
            .enumerate()
            .map(|(rank, (senders, receivers))| Self {
                rank,
                size,
                senders,
                receivers,
                barrier: Arc::clone(&barrier),
            })
            .collect()
    }

    fn check_peer(&self, peer: usize) -> Result<()> {
        if peer >= self.size {
            return Err(CommError::InvalidPeer {
                peer,
                size: self.size,
            });
        }
        if peer == self.rank {
            return Err(CommError::SelfMessage { rank: self.rank });
        }
        Ok(())
    }
}

impl Communicator for ChannelCommunicator {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.size
    }

    fn send(&self, dest: usize, buf: Vec<f64>) -> Result<()> {
        self.check_peer(dest)?;
        self.senders[dest]
            .as_ref()
            .ok_or(CommError::Disconnected { peer: dest })?
            .send(buf)
            .map_err(|_| CommError::Disconnected { peer: dest })
    }

    fn recv(&self, src: usize) -> Result<Vec<f64>> {
        self.check_peer(src)?;
        self.receivers[src]
            .as_ref()
            .ok_or(CommError::Disconnected { peer: src })?
            .recv()
            .map_err(|_| CommError::Disconnected { peer: src })
    }

    fn barrier(&self) {
        self.barrier.wait();
    }
}

impl std::fmt::Debug for ChannelCommunicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelCommunicator")
            .field("rank", &self.rank)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_point_to_point_preserves_order() {
        let mut group = ChannelCommunicator::connect(2);
        let b = group.pop().unwrap();
        let a = group.pop().unwrap();

        a.send(1, vec![1.0]).unwrap();
        a.send(1, vec![2.0]).unwrap();
        assert_eq!(b.recv(0).unwrap(), vec![1.0]);
        assert_eq!(b.recv(0).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_peer_bounds() {
        let group = ChannelCommunicator::connect(2);
        assert!(matches!(
            group[0].send(2, vec![]),
            Err(CommError::InvalidPeer { peer: 2, size: 2 })
        ));
        assert!(matches!(
            group[0].send(0, vec![]),
            Err(CommError::SelfMessage { rank: 0 })
        ));
    }

    #[test]
    fn test_broadcast_reaches_all_ranks() {
        let group = ChannelCommunicator::connect(3);
        let handles: Vec<_> = group
            .into_iter()
            .map(|comm| {
                thread::spawn(move || {
                    let mut buf = if comm.is_coordinator() {
                        vec![3.5, -1.0]
                    } else {
                        Vec::new()
                    };
                    comm.broadcast(0, &mut buf).unwrap();
                    buf
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), vec![3.5, -1.0]);
        }
    }

    #[test]
    fn test_recv_after_peer_dropped_errors() {
        let mut group = ChannelCommunicator::connect(2);
        let b = group.pop().unwrap();
        drop(group); // drops rank 0
        assert!(matches!(b.recv(0), Err(CommError::Disconnected { peer: 0 })));
    }
}
