//! Error types for client sessions.

use std::io;

use thiserror::Error;

/// Failures that end one client session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading the next request line failed.
    #[error("failed to read from client: {source}")]
    Read {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
    /// Writing a reply failed, usually because the client went away.
    #[error("failed to write to client: {source}")]
    Write {
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },
}
