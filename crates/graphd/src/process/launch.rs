//! Supervises daemon launch sequencing and runtime orchestration.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::dispatch::GraphJobProcessor;
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::pool::LeaderFollowerPool;
use crate::session::SessionHandler;
use crate::transport::SocketListener;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Collaborators required to launch the daemon runtime.
pub struct LaunchPlan<L, S> {
    /// Source of the daemon configuration.
    pub loader: L,
    /// Observer for lifecycle events.
    pub reporter: Arc<dyn HealthReporter>,
    /// Blocks until the daemon should stop.
    pub shutdown: S,
}

/// Runs the daemon using the production collaborators.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap, pool start-up, socket binding or
/// signal installation fails.
pub fn run_daemon() -> Result<(), LaunchError> {
    run_daemon_with(LaunchPlan {
        loader: SystemConfigLoader,
        reporter: Arc::new(StructuredHealthReporter::new()),
        shutdown: SystemShutdownSignal::new(),
    })
}

/// Runs the daemon with injected collaborators.
///
/// The listener and pool are always stopped once the shutdown signal
/// returns, even when waiting for it failed.
///
/// # Errors
///
/// See [`run_daemon`].
pub fn run_daemon_with<L, S>(plan: LaunchPlan<L, S>) -> Result<(), LaunchError>
where
    L: ConfigLoader,
    S: ShutdownSignal,
{
    let LaunchPlan {
        loader,
        reporter,
        shutdown,
    } = plan;

    info!(target: PROCESS_TARGET, "starting daemon runtime");
    let daemon = bootstrap_with(&loader, Arc::clone(&reporter))?;
    let config = daemon.config();

    let processor = Arc::new(GraphJobProcessor::new(config));
    let pool = LeaderFollowerPool::start(config.workers(), processor)?;
    let pool_handle = pool.handle();
    reporter.pool_started(pool_handle.workers());

    let listener = SocketListener::bind(config.daemon_socket())?;
    let endpoint = listener.bound_endpoint();
    let listener_handle = listener.start(Arc::new(SessionHandler::new(pool_handle)))?;
    reporter.listener_ready(&endpoint);

    let waited = shutdown.wait();
    info!(target: PROCESS_TARGET, "stopping listener and worker pool");
    listener_handle.shutdown();
    let joined = listener_handle.join();
    let stats = pool.shutdown()?;
    reporter.shutdown_completed(&stats);
    waited?;
    joined?;

    info!(
        target: PROCESS_TARGET,
        "shutdown sequence completed"
    );
    Ok(())
}
