//! The leader/follower protocol run by every worker thread.

use std::fmt;
use std::sync::{Arc, Condvar, MutexGuard};
use std::time::Instant;

use tracing::{debug, trace};

use super::{Follower, JobProcessor, POOL_TARGET, PoolState, Shared};

/// Stable identity of one pool worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerId(usize);

impl WorkerId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Zero-based index of the worker within its pool.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

pub(super) fn run_worker<P>(id: WorkerId, shared: Arc<Shared<P::Job>>, processor: Arc<P>)
where
    P: JobProcessor,
{
    debug!(target: POOL_TARGET, worker = %id, "worker started");
    let wake = Arc::new(Condvar::new());
    while let Some(job) = next_job(id, &shared, &wake) {
        let started = Instant::now();
        processor.process(job, id);
        shared.stats.record_processed(started.elapsed());
    }
    debug!(target: POOL_TARGET, worker = %id, "worker stopped");
}

/// Blocks until this worker leads and dequeues a job, or the pool stops.
fn next_job<J>(id: WorkerId, shared: &Shared<J>, wake: &Arc<Condvar>) -> Option<J> {
    let mut state = shared.lock();
    loop {
        if !state.running {
            return None;
        }
        if state.leader.is_none() {
            state.leader = Some(id);
            shared.stats.record_promotion();
            trace!(target: POOL_TARGET, worker = %id, "claimed leadership");
        }
        if state.leader == Some(id) {
            return lead(id, shared, state);
        }
        state = follow(id, shared, wake, state);
    }
}

fn lead<'a, J>(
    id: WorkerId,
    shared: &'a Shared<J>,
    state: MutexGuard<'a, PoolState<J>>,
) -> Option<J> {
    let mut state = {
        let _waiting = shared.stats.enter_leader_wait();
        shared
            .leader_cv
            .wait_while(state, |state| state.running && state.queue.is_empty())
            .unwrap_or_else(|poison| poison.into_inner())
    };
    if !state.running {
        return None;
    }
    let job = state.queue.pop_front()?;
    state.leader = None;
    if let Some(next) = state.followers.pop_front() {
        state.leader = Some(next.id);
        shared.stats.record_promotion();
        next.wake.notify_one();
        trace!(target: POOL_TARGET, worker = %id, promoted = %next.id, "handed off leadership");
    }
    Some(job)
}

fn follow<'a, J>(
    id: WorkerId,
    shared: &'a Shared<J>,
    wake: &Arc<Condvar>,
    mut state: MutexGuard<'a, PoolState<J>>,
) -> MutexGuard<'a, PoolState<J>> {
    state.followers.push_back(Follower {
        id,
        wake: Arc::clone(wake),
    });
    let mut woken = false;
    let mut state = wake
        .wait_while(state, |state| {
            let parked = state.running && state.leader != Some(id);
            if woken && parked {
                shared.stats.record_stray_wakeup();
            }
            woken = true;
            parked
        })
        .unwrap_or_else(|poison| poison.into_inner());
    state.followers.retain(|follower| follower.id != id);
    state
}
