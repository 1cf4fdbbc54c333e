use crate::logging::LogFormat;
use crate::socket::SocketEndpoint;

/// Default TCP port, matching the port operators connect to with `telnet`.
pub const DEFAULT_TCP_PORT: u16 = 8080;

/// Default bind address for the TCP listener.
pub const DEFAULT_TCP_HOST: &str = "127.0.0.1";

/// Default log filter expression used by the daemon.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default number of leader/follower worker threads.
pub const DEFAULT_WORKERS: usize = 4;

/// Smallest worker pool the daemon accepts.
pub const MIN_WORKERS: usize = 1;

/// Largest worker pool the daemon accepts.
pub const MAX_WORKERS: usize = 16;

/// Default largest vertex count accepted in a single request.
pub const DEFAULT_MAX_VERTICES: usize = 50;

/// Hard ceiling on `max_vertices`; graphs never grow beyond this.
pub const VERTEX_CEILING: usize = 10_000;

/// Default seed for the reproducible MST edge weighting.
pub const DEFAULT_MST_SEED: u64 = 42;

/// Default log filter expression used by the daemon.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the daemon.
#[must_use]
pub fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Computes the default socket endpoint for the daemon.
#[must_use]
pub fn default_socket_endpoint() -> SocketEndpoint {
    SocketEndpoint::tcp(DEFAULT_TCP_HOST, DEFAULT_TCP_PORT)
}
