//! Error types for the worker pool.

use std::io;

use thiserror::Error;

use super::WorkerId;

/// Errors surfaced while starting, feeding or stopping the pool.
#[derive(Debug, Error)]
pub enum PoolError<J> {
    /// The operating system refused to spawn a worker thread.
    #[error("failed to spawn worker thread {index}: {source}")]
    Spawn {
        /// Zero-based index of the worker that failed to start.
        index: usize,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// The pool has begun shutting down; the rejected job is handed back.
    #[error("worker pool is shutting down")]
    ShuttingDown(J),
    /// A worker thread panicked and could not be joined cleanly.
    #[error("worker {worker} panicked")]
    WorkerPanic {
        /// Worker whose thread panicked.
        worker: WorkerId,
    },
}

impl<J> PoolError<J> {
    /// Returns the rejected job when submission failed during shutdown.
    pub fn into_job(self) -> Option<J> {
        match self {
            Self::ShuttingDown(job) => Some(job),
            Self::Spawn { .. } | Self::WorkerPanic { .. } => None,
        }
    }
}
