//! Scoped-thread SPMD worker group

use std::thread;

use crate::channel::ChannelCommunicator;

/// Run `f` once per rank on a connected group of `size` workers, each
/// on its own thread, and collect the per-rank results in rank order.
///
/// This is the whole lifecycle of the group: threads are spawned before
/// `f` begins and joined before this function returns. A panic on any
/// worker is propagated to the caller after the remaining workers have
/// been joined, matching the fatal-on-communication-failure policy of
/// the solver.
pub fn run_spmd<R, F>(size: usize, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(ChannelCommunicator) -> R + Sync,
{
    let endpoints = ChannelCommunicator::connect(size);
    let f = &f;
    thread::scope(|s| {
        let handles: Vec<_> = endpoints
            .into_iter()
            .map(|comm| s.spawn(move || f(comm)))
            .collect();
        handles
            .into_iter()
            .map(|h| match h.join() {
                Ok(result) => result,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    })
}
