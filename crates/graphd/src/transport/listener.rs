//! Accepts client connections on a background thread.
//!
//! The bound socket is switched to non-blocking mode so the accept loop can
//! poll a stop flag between attempts; accepted streams are switched back to
//! blocking before they reach a session.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use graphd_config::SocketEndpoint;

use super::{ConnectionHandler, ConnectionStream, LISTENER_TARGET, ListenerError};

#[cfg(unix)]
use std::os::unix::net::UnixListener;

const IDLE_POLL: Duration = Duration::from_millis(25);
const FAILURE_PAUSE: Duration = Duration::from_millis(150);

/// Socket bound to an endpoint, not yet accepting.
#[derive(Debug)]
pub(crate) struct SocketListener {
    endpoint: SocketEndpoint,
    socket: BoundSocket,
}

#[derive(Debug)]
enum BoundSocket {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix(UnixListener),
}

impl BoundSocket {
    fn set_nonblocking(&self) -> io::Result<()> {
        match self {
            Self::Tcp(socket) => socket.set_nonblocking(true),
            #[cfg(unix)]
            Self::Unix(socket) => socket.set_nonblocking(true),
        }
    }

    /// Returns `Ok(None)` when no client is waiting.
    fn poll_accept(&self) -> io::Result<Option<ConnectionStream>> {
        let accepted = match self {
            Self::Tcp(socket) => socket.accept().and_then(|(stream, _)| {
                stream.set_nonblocking(false)?;
                Ok(ConnectionStream::Tcp(stream))
            }),
            #[cfg(unix)]
            Self::Unix(socket) => socket.accept().and_then(|(stream, _)| {
                stream.set_nonblocking(false)?;
                Ok(ConnectionStream::Unix(stream))
            }),
        };
        match accepted {
            Ok(stream) => Ok(Some(stream)),
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(error) => Err(error),
        }
    }
}

impl SocketListener {
    pub(crate) fn bind(endpoint: &SocketEndpoint) -> Result<Self, ListenerError> {
        let socket = match endpoint {
            SocketEndpoint::Tcp { host, port } => BoundSocket::Tcp(bind_tcp(host, *port)?),
            #[cfg(unix)]
            SocketEndpoint::Unix { path } => BoundSocket::Unix(unix::bind(path.as_std_path())?),
            #[cfg(not(unix))]
            SocketEndpoint::Unix { .. } => {
                return Err(ListenerError::UnsupportedUnix {
                    endpoint: endpoint.to_string(),
                });
            }
        };
        Ok(Self {
            endpoint: endpoint.clone(),
            socket,
        })
    }

    pub(crate) fn local_addr(&self) -> Option<SocketAddr> {
        match &self.socket {
            BoundSocket::Tcp(socket) => socket.local_addr().ok(),
            #[cfg(unix)]
            BoundSocket::Unix(_) => None,
        }
    }

    /// Endpoint clients should connect to. For TCP this carries the port the
    /// OS picked when the configuration asked for port `0`.
    pub(crate) fn bound_endpoint(&self) -> SocketEndpoint {
        self.local_addr().map_or_else(
            || self.endpoint.clone(),
            |addr| SocketEndpoint::tcp(addr.ip().to_string(), addr.port()),
        )
    }

    /// Spawns the accept loop, handing every connection to `handler` on a
    /// thread of its own.
    pub(crate) fn start(
        self,
        handler: Arc<dyn ConnectionHandler>,
    ) -> Result<ListenerHandle, ListenerError> {
        if let Err(source) = self.socket.set_nonblocking() {
            self.remove_socket_file();
            return Err(ListenerError::NonBlocking { source });
        }
        let stop = Arc::new(AtomicBool::new(false));
        let accept_loop = AcceptLoop {
            listener: self,
            stop: Arc::clone(&stop),
            handler,
            last_failure: None,
        };
        let thread = thread::Builder::new()
            .name("graphd-listener".to_owned())
            .spawn(move || accept_loop.run())
            .map_err(|source| ListenerError::Spawn { source })?;
        Ok(ListenerHandle {
            stop,
            thread: Some(thread),
        })
    }

    #[cfg(unix)]
    fn remove_socket_file(&self) {
        if let Some(path) = self.endpoint.unix_path() {
            unix::remove_socket_file(path.as_std_path());
        }
    }

    #[cfg(not(unix))]
    fn remove_socket_file(&self) {}
}

/// Handle to the background accept loop.
pub(crate) struct ListenerHandle {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl ListenerHandle {
    /// Asks the accept loop to stop. Sessions already running are left alone.
    pub(crate) fn shutdown(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    /// Waits for the accept loop to exit.
    pub(crate) fn join(mut self) -> Result<(), ListenerError> {
        self.thread.take().map_or(Ok(()), |thread| {
            thread.join().map_err(|_| ListenerError::ThreadPanic)
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

struct AcceptLoop {
    listener: SocketListener,
    stop: Arc<AtomicBool>,
    handler: Arc<dyn ConnectionHandler>,
    last_failure: Option<io::ErrorKind>,
}

impl AcceptLoop {
    fn run(mut self) {
        info!(
            target: LISTENER_TARGET,
            endpoint = %self.listener.bound_endpoint(),
            "accepting client connections"
        );
        while !self.stop.load(Ordering::SeqCst) {
            match self.listener.socket.poll_accept() {
                Ok(Some(stream)) => {
                    self.last_failure = None;
                    self.spawn_session(stream);
                }
                Ok(None) => thread::sleep(IDLE_POLL),
                Err(error) => {
                    self.note_failure(&error);
                    thread::sleep(FAILURE_PAUSE);
                }
            }
        }
        info!(target: LISTENER_TARGET, "stopped accepting client connections");
    }

    fn spawn_session(&self, stream: ConnectionStream) {
        let peer = stream.peer();
        let handler = Arc::clone(&self.handler);
        let spawned = thread::Builder::new()
            .name("graphd-session".to_owned())
            .spawn(move || handler.handle(stream));
        if let Err(error) = spawned {
            warn!(
                target: LISTENER_TARGET,
                peer = %peer,
                error = %error,
                "could not start session thread"
            );
        } else {
            debug!(target: LISTENER_TARGET, peer = %peer, "session thread started");
        }
    }

    /// Repeats of the same failure kind are logged once.
    fn note_failure(&mut self, error: &io::Error) {
        let kind = error.kind();
        if self.last_failure != Some(kind) {
            warn!(target: LISTENER_TARGET, error = %error, "accept failed");
        }
        self.last_failure = Some(kind);
    }
}

/// The socket file goes with the loop, whether it ran to a stop request or
/// never started because its thread could not be spawned.
impl Drop for AcceptLoop {
    fn drop(&mut self) {
        self.listener.remove_socket_file();
    }
}

fn bind_tcp(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let mut candidates =
        (host, port)
            .to_socket_addrs()
            .map_err(|source| ListenerError::Resolve {
                host: host.to_owned(),
                port,
                source,
            })?;
    let Some(addr) = candidates.next() else {
        return Err(ListenerError::ResolveEmpty {
            host: host.to_owned(),
            port,
        });
    };
    TcpListener::bind(addr).map_err(|source| ListenerError::BindTcp { addr, source })
}

#[cfg(unix)]
mod unix {
    use std::fs;
    use std::io;
    use std::os::unix::fs::FileTypeExt;
    use std::os::unix::net::{UnixListener, UnixStream};
    use std::path::Path;

    use tracing::{debug, warn};

    use super::{LISTENER_TARGET, ListenerError};

    pub(super) fn bind(path: &Path) -> Result<UnixListener, ListenerError> {
        if path.exists() {
            reclaim(path)?;
        }
        UnixListener::bind(path).map_err(|source| ListenerError::BindUnix {
            path: path.display().to_string(),
            source,
        })
    }

    /// Deletes a socket file nobody is listening on. Live sockets and
    /// regular files are refused.
    fn reclaim(path: &Path) -> Result<(), ListenerError> {
        let shown = path.display().to_string();
        let file_type = fs::symlink_metadata(path)
            .map_err(|source| ListenerError::UnixMetadata {
                path: shown.clone(),
                source,
            })?
            .file_type();
        if !file_type.is_socket() {
            return Err(ListenerError::UnixNotSocket { path: shown });
        }
        match UnixStream::connect(path) {
            Ok(_) => Err(ListenerError::UnixInUse { path: shown }),
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::ConnectionRefused | io::ErrorKind::NotFound
                ) =>
            {
                debug!(target: LISTENER_TARGET, path = %shown, "reclaiming stale socket");
                fs::remove_file(path).map_err(|source| ListenerError::UnixCleanup {
                    path: shown,
                    source,
                })
            }
            Err(source) => Err(ListenerError::UnixConnect {
                path: shown,
                source,
            }),
        }
    }

    pub(super) fn remove_socket_file(path: &Path) {
        if let Err(error) = fs::remove_file(path)
            && error.kind() != io::ErrorKind::NotFound
        {
            warn!(
                target: LISTENER_TARGET,
                path = %path.display(),
                error = %error,
                "could not remove socket file"
            );
        }
    }
}
