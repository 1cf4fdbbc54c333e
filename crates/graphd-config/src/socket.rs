//! Endpoint the daemon binds for client sessions.
//!
//! On the command line and in the environment an endpoint is written as
//! `tcp://host[:port]`, `unix:///path/to/graphd.sock`, or a bare port number
//! that binds the default host. In configuration files it is a table tagged
//! by `transport`.

use std::fmt;
use std::fs::DirBuilder;
use std::io;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::defaults::{DEFAULT_TCP_HOST, DEFAULT_TCP_PORT};

/// Where graphd accepts client sessions.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "transport", rename_all = "snake_case")]
pub enum SocketEndpoint {
    /// Local clients connect through a socket file.
    Unix {
        /// Socket file; its directory is created on start-up.
        path: Utf8PathBuf,
    },
    /// Clients connect over TCP.
    Tcp {
        /// Host name or address to bind.
        host: String,
        /// Port to bind; `0` lets the OS choose one.
        port: u16,
    },
}

impl SocketEndpoint {
    /// Builds a Unix domain socket endpoint.
    #[must_use]
    pub fn unix(path: impl Into<Utf8PathBuf>) -> Self {
        Self::Unix { path: path.into() }
    }

    /// Builds a TCP socket endpoint.
    #[must_use]
    pub fn tcp(host: impl Into<String>, port: u16) -> Self {
        Self::Tcp {
            host: host.into(),
            port,
        }
    }

    /// Socket file of a Unix endpoint.
    #[must_use]
    pub fn unix_path(&self) -> Option<&Utf8Path> {
        match self {
            Self::Unix { path } => Some(path),
            Self::Tcp { .. } => None,
        }
    }

    /// Creates the directory that will hold a Unix socket file, readable by
    /// the daemon's user only. Nothing happens for TCP endpoints or for a
    /// socket file named relative to the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`SocketPreparationError`] when the path names no file or the
    /// directory cannot be created.
    pub fn prepare_filesystem(&self) -> Result<(), SocketPreparationError> {
        match self.unix_path() {
            Some(path) => match socket_dir(path)? {
                Some(dir) => create_private_dir(dir),
                None => Ok(()),
            },
            None => Ok(()),
        }
    }
}

/// `Ok(None)` for a bare file name, which lives in the working directory.
fn socket_dir(path: &Utf8Path) -> Result<Option<&Utf8Path>, SocketPreparationError> {
    let parent = path
        .parent()
        .ok_or_else(|| SocketPreparationError::MissingParent {
            path: path.to_path_buf(),
        })?;
    Ok((!parent.as_str().is_empty()).then_some(parent))
}

fn create_private_dir(dir: &Utf8Path) -> Result<(), SocketPreparationError> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    std::os::unix::fs::DirBuilderExt::mode(&mut builder, 0o700);
    match builder.create(dir.as_std_path()) {
        Err(source) if source.kind() != io::ErrorKind::AlreadyExists => {
            Err(SocketPreparationError::CreateDirectory {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

impl fmt::Display for SocketEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix { path } => write!(formatter, "unix://{path}"),
            Self::Tcp { host, port } => write!(formatter, "tcp://{host}:{port}"),
        }
    }
}

impl FromStr for SocketEndpoint {
    type Err = SocketParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        if let Ok(port) = input.parse::<u16>() {
            return Ok(Self::tcp(DEFAULT_TCP_HOST, port));
        }
        let url = Url::parse(input)?;
        match url.scheme() {
            "tcp" => parse_tcp(&url, input),
            "unix" => parse_unix(&url, input),
            other => Err(SocketParseError::UnsupportedScheme(other.to_owned())),
        }
    }
}

/// A TCP URL without a port binds the default graphd port.
fn parse_tcp(url: &Url, input: &str) -> Result<SocketEndpoint, SocketParseError> {
    let host = url
        .host_str()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| SocketParseError::MissingHost(input.to_owned()))?;
    Ok(SocketEndpoint::tcp(
        host,
        url.port().unwrap_or(DEFAULT_TCP_PORT),
    ))
}

fn parse_unix(url: &Url, input: &str) -> Result<SocketEndpoint, SocketParseError> {
    match url.path() {
        "" | "/" => Err(SocketParseError::MissingUnixPath(input.to_owned())),
        path => Ok(SocketEndpoint::unix(path)),
    }
}

/// Errors encountered while parsing a [`SocketEndpoint`] from text.
#[derive(Debug, Error)]
pub enum SocketParseError {
    #[error("unsupported endpoint scheme '{0}' (expected tcp or unix)")]
    UnsupportedScheme(String),
    #[error("endpoint '{0}' names no TCP host")]
    MissingHost(String),
    #[error("endpoint '{0}' names no socket file")]
    MissingUnixPath(String),
    #[error("malformed endpoint: {0}")]
    Url(#[from] url::ParseError),
}

/// Errors raised while creating the directory for a Unix socket file.
#[derive(Debug, Error)]
pub enum SocketPreparationError {
    #[error("socket path '{path}' names no file")]
    MissingParent {
        /// Offending socket path.
        path: Utf8PathBuf,
    },
    #[error("failed to create socket directory '{path}': {source}")]
    CreateDirectory {
        /// Directory that could not be created.
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}
