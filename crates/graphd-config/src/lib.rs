//! Layered configuration for the `graphd` daemon.
//!
//! Values are resolved with `ortho_config`: built-in defaults first, then an
//! optional TOML file (`--config-path`), then `GRAPHD_*` environment
//! variables, and finally command-line flags. The resolved [`Config`] is
//! validated once during bootstrap so that the worker pool and request
//! parser can trust its bounds.

mod defaults;
mod logging;
mod socket;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_MAX_VERTICES, DEFAULT_MST_SEED, DEFAULT_TCP_HOST,
    DEFAULT_TCP_PORT, DEFAULT_WORKERS, MAX_WORKERS, MIN_WORKERS, VERTEX_CEILING,
    default_log_filter, default_log_filter_string, default_log_format, default_socket_endpoint,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved daemon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "GRAPHD")]
pub struct Config {
    /// Endpoint the session listener binds.
    #[ortho_config(default = default_socket_endpoint())]
    #[serde(default = "default_socket_endpoint")]
    pub daemon_socket: SocketEndpoint,
    /// `tracing` filter expression, e.g. `info` or `graphd::pool=debug`.
    #[ortho_config(default = default_log_filter_string())]
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Log line format.
    #[ortho_config(default = default_log_format())]
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Number of leader/follower worker threads.
    #[ortho_config(default = DEFAULT_WORKERS)]
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Largest vertex count a single request may declare.
    #[ortho_config(default = DEFAULT_MAX_VERTICES)]
    #[serde(default = "default_max_vertices")]
    pub max_vertices: usize,
    /// Seed for the reproducible MST edge weights.
    #[ortho_config(default = DEFAULT_MST_SEED)]
    #[serde(default = "default_mst_seed")]
    pub mst_seed: u64,
}

const fn default_workers() -> usize {
    DEFAULT_WORKERS
}

const fn default_max_vertices() -> usize {
    DEFAULT_MAX_VERTICES
}

const fn default_mst_seed() -> u64 {
    DEFAULT_MST_SEED
}

impl Default for Config {
    fn default() -> Self {
        Self {
            daemon_socket: default_socket_endpoint(),
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            workers: DEFAULT_WORKERS,
            max_vertices: DEFAULT_MAX_VERTICES,
            mst_seed: DEFAULT_MST_SEED,
        }
    }
}

impl Config {
    /// Endpoint the daemon listens on.
    #[must_use]
    pub fn daemon_socket(&self) -> &SocketEndpoint {
        &self.daemon_socket
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Log output format.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Worker pool size.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Largest vertex count accepted per request.
    #[must_use]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Seed used for MST edge weights.
    #[must_use]
    pub fn mst_seed(&self) -> u64 {
        self.mst_seed
    }

    /// Checks value ranges that the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the worker count falls outside
    /// `MIN_WORKERS..=MAX_WORKERS` or `max_vertices` is zero or above
    /// [`VERTEX_CEILING`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&self.workers) {
            return Err(ConfigError::Workers {
                value: self.workers,
            });
        }
        if self.max_vertices == 0 || self.max_vertices > VERTEX_CEILING {
            return Err(ConfigError::MaxVertices {
                value: self.max_vertices,
            });
        }
        Ok(())
    }
}

/// Semantic validation failures for a loaded [`Config`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Worker count outside the supported range.
    #[error("workers must be between {MIN_WORKERS} and {MAX_WORKERS}, got {value}")]
    Workers {
        /// Rejected worker count.
        value: usize,
    },
    /// Vertex limit outside the supported range.
    #[error("max_vertices must be between 1 and {VERTEX_CEILING}, got {value}")]
    MaxVertices {
        /// Rejected vertex limit.
        value: usize,
    },
}
