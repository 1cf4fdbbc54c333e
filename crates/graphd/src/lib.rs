//! The `graphd` daemon.
//!
//! `graphd` accepts newline-delimited graph descriptions over TCP or a Unix
//! domain socket and answers each with the results of five exact graph
//! algorithms computed by [`graphd_engine`].
//!
//! Requests are executed by a leader/follower worker pool: one worker waits
//! on the request queue, and as soon as it takes a job it promotes a waiting
//! follower to take its place before processing. Every connection runs its
//! own session thread that feeds the shared queue and waits for the reply
//! addressed to it.
//!
//! The launch sequence loads layered configuration through
//! [`graphd_config`], installs structured telemetry, starts the pool and the
//! socket listener, then blocks until a termination signal arrives. Health
//! reporting hooks emit structured events at each stage.

mod bootstrap;
mod dispatch;
mod health;
mod pool;
mod process;
mod response;
mod session;
pub mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Daemon, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use dispatch::{ClientId, GraphJob, GraphJobProcessor};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use pool::{
    JobProcessor, LeaderFollowerPool, PoolError, PoolHandle, PoolSnapshot, StatsSnapshot, WorkerId,
};
pub use process::{
    LaunchError, LaunchPlan, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_daemon,
    run_daemon_with,
};
pub use session::SessionError;
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::ListenerError;

#[cfg(test)]
mod tests;
