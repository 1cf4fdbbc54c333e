//! Failures that stop the daemon process.

use thiserror::Error;

use crate::bootstrap::BootstrapError;
use crate::dispatch::GraphJob;
use crate::pool::PoolError;
use crate::transport::ListenerError;

use super::shutdown::ShutdownError;

/// Reasons [`run_daemon`](super::run_daemon) returns early or exits with an
/// error. Each wraps the failing component's own error.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// Configuration, validation, telemetry or socket preparation failed.
    #[error("daemon bootstrap failed: {source}")]
    Bootstrap {
        /// Bootstrap stage error.
        #[from]
        source: BootstrapError,
    },
    /// Workers could not be spawned, or one panicked before shutdown.
    #[error("worker pool failed: {source}")]
    Pool {
        /// Pool error.
        #[from]
        source: PoolError<GraphJob>,
    },
    /// The session listener could not bind, start or be joined.
    #[error("session listener failed: {source}")]
    Listener {
        /// Listener error.
        #[from]
        source: ListenerError,
    },
    /// Signal handlers could not be installed.
    #[error("failed to await shutdown signal: {source}")]
    Shutdown {
        /// Signal error.
        #[from]
        source: ShutdownError,
    },
}
