//! Lock-free counters describing pool activity.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

#[derive(Debug, Default)]
pub(crate) struct PoolStats {
    submitted: AtomicU64,
    processed: AtomicU64,
    promotions: AtomicU64,
    processing_micros: AtomicU64,
    leader_waiters: AtomicUsize,
    peak_leader_waiters: AtomicUsize,
    stray_wakeups: AtomicU64,
}

impl PoolStats {
    pub(crate) fn record_submitted(&self) {
        self.submitted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_processed(&self, elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.processing_micros.fetch_add(micros, Ordering::Relaxed);
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_promotion(&self) {
        self.promotions.fetch_add(1, Ordering::Relaxed);
    }

    /// Counts a follower that woke while the leader slot held someone else.
    pub(crate) fn record_stray_wakeup(&self) {
        self.stray_wakeups.fetch_add(1, Ordering::Relaxed);
    }

    /// Marks the caller as waiting on the leader condition variable until the
    /// returned guard drops.
    pub(crate) fn enter_leader_wait(&self) -> LeaderWait<'_> {
        let waiting = self.leader_waiters.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_leader_waiters
            .fetch_max(waiting, Ordering::SeqCst);
        LeaderWait { stats: self }
    }

    pub(crate) fn snapshot(&self, workers: usize) -> StatsSnapshot {
        StatsSnapshot {
            workers,
            requests_submitted: self.submitted.load(Ordering::Relaxed),
            requests_processed: self.processed.load(Ordering::Relaxed),
            leader_promotions: self.promotions.load(Ordering::Relaxed),
            total_processing: Duration::from_micros(self.processing_micros.load(Ordering::Relaxed)),
            peak_leader_waiters: self.peak_leader_waiters.load(Ordering::SeqCst),
            stray_wakeups: self.stray_wakeups.load(Ordering::Relaxed),
        }
    }
}

pub(crate) struct LeaderWait<'a> {
    stats: &'a PoolStats,
}

impl Drop for LeaderWait<'_> {
    fn drop(&mut self) {
        self.stats.leader_waiters.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Point-in-time copy of the pool counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Number of worker threads in the pool.
    pub workers: usize,
    /// Jobs accepted by [`PoolHandle::submit`](super::PoolHandle::submit).
    pub requests_submitted: u64,
    /// Jobs whose processing has finished.
    pub requests_processed: u64,
    /// Times a worker claimed or was handed leadership.
    pub leader_promotions: u64,
    /// Time spent inside the job processor, summed over every job.
    pub total_processing: Duration,
    /// Most workers ever observed waiting on the queue at once.
    pub peak_leader_waiters: usize,
    /// Follower wake-ups that did not carry leadership, spurious ones
    /// included.
    pub stray_wakeups: u64,
}

impl StatsSnapshot {
    /// Mean processing time per job, or `None` before the first job
    /// completes.
    #[must_use]
    pub fn average_processing(&self) -> Option<Duration> {
        let total = u64::try_from(self.total_processing.as_micros()).unwrap_or(u64::MAX);
        total
            .checked_div(self.requests_processed)
            .map(Duration::from_micros)
    }
}
