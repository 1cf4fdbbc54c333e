//! Structured health reporting for daemon lifecycle events.

use std::sync::Arc;

use graphd_config::{Config, SocketEndpoint};

use crate::bootstrap::BootstrapError;
use crate::pool::StatsSnapshot;

const HEALTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::health");

/// Observer trait used to surface lifecycle events to telemetry sinks.
pub trait HealthReporter: Send + Sync {
    /// Invoked before configuration loading begins.
    fn bootstrap_starting(&self);

    /// Invoked after bootstrap completes successfully.
    fn bootstrap_succeeded(&self, config: &Config);

    /// Invoked when bootstrap fails.
    fn bootstrap_failed(&self, error: &BootstrapError);

    /// Invoked once every worker thread is running.
    fn pool_started(&self, workers: usize);

    /// Invoked when the listener starts accepting on `endpoint`.
    fn listener_ready(&self, endpoint: &SocketEndpoint);

    /// Invoked after the listener and pool have stopped.
    fn shutdown_completed(&self, stats: &StatsSnapshot);
}

impl<T> HealthReporter for Arc<T>
where
    T: HealthReporter,
{
    fn bootstrap_starting(&self) {
        (**self).bootstrap_starting();
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        (**self).bootstrap_succeeded(config);
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        (**self).bootstrap_failed(error);
    }

    fn pool_started(&self, workers: usize) {
        (**self).pool_started(workers);
    }

    fn listener_ready(&self, endpoint: &SocketEndpoint) {
        (**self).listener_ready(endpoint);
    }

    fn shutdown_completed(&self, stats: &StatsSnapshot) {
        (**self).shutdown_completed(stats);
    }
}

/// Default reporter that records lifecycle events using `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredHealthReporter;

impl StructuredHealthReporter {
    /// Builds a new reporter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl HealthReporter for StructuredHealthReporter {
    fn bootstrap_starting(&self) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_starting",
            "starting daemon bootstrap"
        );
    }

    fn bootstrap_succeeded(&self, config: &Config) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "bootstrap_succeeded",
            socket = %config.daemon_socket(),
            workers = config.workers(),
            max_vertices = config.max_vertices(),
            log_format = %config.log_format(),
            "daemon bootstrap completed"
        );
    }

    fn bootstrap_failed(&self, error: &BootstrapError) {
        tracing::error!(
            target: HEALTH_TARGET,
            event = "bootstrap_failed",
            error = %error,
            "daemon bootstrap failed"
        );
    }

    fn pool_started(&self, workers: usize) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "pool_started",
            workers,
            "worker pool ready"
        );
    }

    fn listener_ready(&self, endpoint: &SocketEndpoint) {
        tracing::info!(
            target: HEALTH_TARGET,
            event = "listener_ready",
            socket = %endpoint,
            "accepting client connections"
        );
    }

    fn shutdown_completed(&self, stats: &StatsSnapshot) {
        let average_us = stats
            .average_processing()
            .map(|average| average.as_micros());
        tracing::info!(
            target: HEALTH_TARGET,
            event = "shutdown_completed",
            requests_processed = stats.requests_processed,
            leader_promotions = stats.leader_promotions,
            workers = stats.workers,
            average_processing_us = ?average_us,
            "daemon stopped"
        );
    }
}
