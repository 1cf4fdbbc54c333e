//! Leader/follower worker pool.
//!
//! A fixed set of workers shares one FIFO queue. At any instant exactly one
//! worker, the leader, waits for work. When a job arrives the leader takes
//! it, hands leadership to the longest-waiting follower and only then starts
//! processing, so the next job can be picked up while the previous one is
//! still running.
//!
//! The queue, the leader slot and the follower list sit behind a single
//! mutex. Counters live in [`StatsSnapshot`]-producing atomics that never
//! touch that mutex.

mod errors;
mod stats;
mod worker;

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread;

use tracing::{info, warn};

pub use self::errors::PoolError;
pub use self::stats::StatsSnapshot;
pub use self::worker::WorkerId;

use self::stats::PoolStats;

const POOL_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::pool");

/// Work executed by pool workers once they give up leadership.
pub trait JobProcessor: Send + Sync + 'static {
    /// Unit of work queued on the pool.
    type Job: Send + 'static;

    /// Processes one job on the worker identified by `worker`.
    ///
    /// Implementations report failures through the job itself; a panic here
    /// takes the worker down with it.
    fn process(&self, job: Self::Job, worker: WorkerId);
}

/// A parked follower and the condition variable only it waits on.
pub(crate) struct Follower {
    id: WorkerId,
    wake: Arc<Condvar>,
}

pub(crate) struct PoolState<J> {
    queue: VecDeque<J>,
    leader: Option<WorkerId>,
    followers: VecDeque<Follower>,
    running: bool,
}

pub(crate) struct Shared<J> {
    state: Mutex<PoolState<J>>,
    leader_cv: Condvar,
    stats: PoolStats,
}

impl<J> Shared<J> {
    fn new() -> Self {
        Self {
            state: Mutex::new(PoolState {
                queue: VecDeque::new(),
                leader: None,
                followers: VecDeque::new(),
                running: true,
            }),
            leader_cv: Condvar::new(),
            stats: PoolStats::default(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, PoolState<J>> {
        self.state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// Stops the pool and returns the jobs nobody dequeued.
    fn stop(&self) -> VecDeque<J> {
        let abandoned = {
            let mut state = self.lock();
            state.running = false;
            for follower in &state.followers {
                follower.wake.notify_one();
            }
            std::mem::take(&mut state.queue)
        };
        self.leader_cv.notify_all();
        abandoned
    }
}

/// Queue-side view of the pool state, for diagnostics and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSnapshot {
    /// Jobs waiting to be dequeued.
    pub queued: usize,
    /// Worker currently holding the leader slot.
    pub leader: Option<WorkerId>,
    /// Workers parked as followers.
    pub waiting_followers: usize,
    /// Whether the pool still accepts work.
    pub running: bool,
}

/// Cloneable submission handle.
pub struct PoolHandle<J> {
    shared: Arc<Shared<J>>,
    workers: usize,
}

impl<J> Clone for PoolHandle<J> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            workers: self.workers,
        }
    }
}

impl<J> PoolHandle<J> {
    /// Appends `job` to the queue and wakes the leader.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ShuttingDown`] carrying `job` once the pool has
    /// stopped.
    pub fn submit(&self, job: J) -> Result<(), PoolError<J>> {
        {
            let mut state = self.shared.lock();
            if !state.running {
                return Err(PoolError::ShuttingDown(job));
            }
            state.queue.push_back(job);
        }
        self.shared.stats.record_submitted();
        self.shared.leader_cv.notify_one();
        Ok(())
    }

    /// Captures the queue length, leader and follower count.
    #[must_use]
    pub fn snapshot(&self) -> PoolSnapshot {
        let state = self.shared.lock();
        PoolSnapshot {
            queued: state.queue.len(),
            leader: state.leader,
            waiting_followers: state.followers.len(),
            running: state.running,
        }
    }

    /// Captures the activity counters.
    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.shared.stats.snapshot(self.workers)
    }

    /// Number of workers in the pool.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }
}

/// Owner of the worker threads.
///
/// Dropping the pool without calling [`LeaderFollowerPool::shutdown`] still
/// stops it, but does not wait for the workers.
pub struct LeaderFollowerPool<J> {
    shared: Arc<Shared<J>>,
    workers: Vec<(WorkerId, thread::JoinHandle<()>)>,
}

impl<J> LeaderFollowerPool<J>
where
    J: Send + 'static,
{
    /// Spawns `size` workers that feed jobs to `processor`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Spawn`] when a worker thread cannot be created;
    /// workers spawned before the failure are stopped and joined.
    pub fn start<P>(size: usize, processor: Arc<P>) -> Result<Self, PoolError<J>>
    where
        P: JobProcessor<Job = J>,
    {
        let shared = Arc::new(Shared::new());
        let mut pool = Self {
            shared: Arc::clone(&shared),
            workers: Vec::with_capacity(size),
        };
        for index in 0..size {
            let id = WorkerId::new(index);
            let worker_shared = Arc::clone(&shared);
            let worker_processor = Arc::clone(&processor);
            let spawned = thread::Builder::new()
                .name(format!("graphd-worker-{index}"))
                .spawn(move || worker::run_worker(id, worker_shared, worker_processor));
            match spawned {
                Ok(handle) => pool.workers.push((id, handle)),
                Err(source) => {
                    drop(pool.shutdown());
                    return Err(PoolError::Spawn { index, source });
                }
            }
        }
        info!(target: POOL_TARGET, workers = size, "worker pool started");
        Ok(pool)
    }
}

impl<J> LeaderFollowerPool<J> {
    /// Returns a handle for submitting jobs and reading statistics.
    #[must_use]
    pub fn handle(&self) -> PoolHandle<J> {
        PoolHandle {
            shared: Arc::clone(&self.shared),
            workers: self.workers.len(),
        }
    }

    /// Stops accepting work, releases blocked workers and joins them all.
    ///
    /// Jobs still queued are dropped. Jobs already being processed run to
    /// completion before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::WorkerPanic`] for the first worker whose thread
    /// panicked; the remaining workers are still joined.
    pub fn shutdown(mut self) -> Result<StatsSnapshot, PoolError<J>> {
        let abandoned = self.shared.stop();
        if !abandoned.is_empty() {
            warn!(
                target: POOL_TARGET,
                dropped = abandoned.len(),
                "dropping queued jobs on shutdown"
            );
        }
        drop(abandoned);

        let workers = self.workers.len();
        let mut first_panic = None;
        for (id, handle) in self.workers.drain(..) {
            if handle.join().is_err() && first_panic.is_none() {
                first_panic = Some(id);
            }
        }
        if let Some(worker) = first_panic {
            return Err(PoolError::WorkerPanic { worker });
        }

        let stats = self.shared.stats.snapshot(workers);
        info!(
            target: POOL_TARGET,
            processed = stats.requests_processed,
            promotions = stats.leader_promotions,
            "worker pool stopped"
        );
        Ok(stats)
    }
}

impl<J> Drop for LeaderFollowerPool<J> {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            drop(self.shared.stop());
        }
    }
}
