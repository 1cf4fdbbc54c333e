//! Health reporter double that records lifecycle events.

use std::sync::Mutex;

use graphd_config::{Config, SocketEndpoint};

use crate::bootstrap::BootstrapError;
use crate::health::HealthReporter;
use crate::pool::StatsSnapshot;

/// Records health events for assertions.
#[derive(Default)]
pub struct RecordingHealthReporter {
    events: Mutex<Vec<HealthEvent>>,
}

impl RecordingHealthReporter {
    /// Captures a copy of the recorded events.
    pub fn events(&self) -> Vec<HealthEvent> {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .clone()
    }

    /// Event names in the order they were reported.
    pub fn event_names(&self) -> Vec<&'static str> {
        self.events().iter().map(HealthEvent::name).collect()
    }

    /// Endpoint announced by the most recent `listener_ready` event.
    pub fn ready_endpoint(&self) -> Option<SocketEndpoint> {
        self.events()
            .into_iter()
            .rev()
            .find_map(|event| match event {
                HealthEvent::ListenerReady(endpoint) => Some(endpoint),
                _ => None,
            })
    }

    fn record(&self, event: HealthEvent) {
        self.events
            .lock()
            .expect("health reporter mutex poisoned")
            .push(event);
    }
}

impl HealthReporter for RecordingHealthReporter {
    fn bootstrap_starting(&self) {
        self.record(HealthEvent::BootstrapStarting);
    }

    fn bootstrap_succeeded(&self, _config: &Config) {
        self.record(HealthEvent::BootstrapSucceeded);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        self.record(HealthEvent::BootstrapFailed(error.to_string()));
    }

    fn pool_started(&self, workers: usize) {
        self.record(HealthEvent::PoolStarted(workers));
    }

    fn listener_ready(&self, endpoint: &SocketEndpoint) {
        self.record(HealthEvent::ListenerReady(endpoint.clone()));
    }

    fn shutdown_completed(&self, stats: &StatsSnapshot) {
        self.record(HealthEvent::ShutdownCompleted {
            processed: stats.requests_processed,
        });
    }
}

/// Structured health events tracked during scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthEvent {
    BootstrapStarting,
    BootstrapSucceeded,
    BootstrapFailed(String),
    PoolStarted(usize),
    ListenerReady(SocketEndpoint),
    ShutdownCompleted { processed: u64 },
}

impl HealthEvent {
    /// Name matching the `event` field emitted by the structured reporter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BootstrapStarting => "bootstrap_starting",
            Self::BootstrapSucceeded => "bootstrap_succeeded",
            Self::BootstrapFailed(_) => "bootstrap_failed",
            Self::PoolStarted(_) => "pool_started",
            Self::ListenerReady(_) => "listener_ready",
            Self::ShutdownCompleted { .. } => "shutdown_completed",
        }
    }
}
