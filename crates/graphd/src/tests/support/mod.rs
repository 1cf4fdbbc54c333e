//! Shared doubles for the daemon behavioural suites.

mod client;
mod config_loader;
mod reporter;
mod shutdown;

pub use client::TestClient;
pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use shutdown::TestShutdownSignal;

use std::time::{Duration, Instant};

pub const WAIT_TIMEOUT: Duration = Duration::from_secs(2);
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Polls `predicate` until it holds or [`WAIT_TIMEOUT`] elapses.
pub fn wait_until(mut predicate: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + WAIT_TIMEOUT;
    while Instant::now() < deadline {
        if predicate() {
            return true;
        }
        std::thread::sleep(POLL_INTERVAL);
    }
    predicate()
}
