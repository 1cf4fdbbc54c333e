//! Per-connection session loop.
//!
//! Each accepted connection runs on its own thread. Control commands are
//! answered inline; every other line becomes a [`GraphJob`] on the worker
//! pool, and the session blocks until the worker's reply arrives.

mod errors;

use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;

use strum::EnumString;
use tracing::{debug, info, warn};

pub use self::errors::SessionError;

use crate::dispatch::{ClientId, GraphJob};
use crate::pool::PoolHandle;
use crate::response::{self, EMPTY_HINT, GOODBYE, PROMPT, SHUTDOWN_NOTICE};
use crate::transport::{ConnectionHandler, ConnectionStream, LineReader};

const SESSION_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::session");

/// Lines answered by the session itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Control {
    Help,
    Stats,
    #[strum(serialize = "quit", serialize = "exit")]
    Quit,
}

/// What a session should do with one line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Empty,
    Control(Control),
    Request(&'a str),
}

impl<'a> Line<'a> {
    fn classify(raw: &'a str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        Control::from_str(trimmed).map_or(Self::Request(trimmed), Self::Control)
    }
}

/// Connection handler that runs the interactive session protocol.
pub(crate) struct SessionHandler {
    pool: PoolHandle<GraphJob>,
    next_client: AtomicU64,
}

impl SessionHandler {
    pub(crate) fn new(pool: PoolHandle<GraphJob>) -> Self {
        Self {
            pool,
            next_client: AtomicU64::new(1),
        }
    }

    fn allocate_client(&self) -> ClientId {
        ClientId::new(self.next_client.fetch_add(1, Ordering::Relaxed))
    }
}

impl ConnectionHandler for SessionHandler {
    fn handle(&self, stream: ConnectionStream) {
        let client = self.allocate_client();
        info!(
            target: SESSION_TARGET,
            client = %client,
            peer = %stream.peer(),
            "client connected"
        );
        let mut session = Session {
            client,
            stream,
            reader: LineReader::new(),
            pool: &self.pool,
        };
        match session.run() {
            Ok(()) => info!(target: SESSION_TARGET, client = %client, "client disconnected"),
            Err(error) => warn!(
                target: SESSION_TARGET,
                client = %client,
                error = %error,
                "session ended with error"
            ),
        }
    }
}

struct Session<'a> {
    client: ClientId,
    stream: ConnectionStream,
    reader: LineReader,
    pool: &'a PoolHandle<GraphJob>,
}

impl Session<'_> {
    fn run(&mut self) -> Result<(), SessionError> {
        self.send(&response::banner(self.client))?;
        while let Some(raw) = self
            .reader
            .read_line(&mut self.stream)
            .map_err(|source| SessionError::Read { source })?
        {
            match Line::classify(&raw) {
                Line::Empty => self.send(EMPTY_HINT)?,
                Line::Control(Control::Help) => self.send(&response::banner(self.client))?,
                Line::Control(Control::Stats) => {
                    let text = response::stats(&self.pool.stats(), &self.pool.snapshot());
                    self.send(&text)?;
                }
                Line::Control(Control::Quit) => {
                    self.send(GOODBYE)?;
                    return Ok(());
                }
                Line::Request(payload) => {
                    let Some(reply) = self.dispatch(payload) else {
                        self.send(SHUTDOWN_NOTICE)?;
                        return Ok(());
                    };
                    self.send(&format!("{reply}\n{PROMPT}"))?;
                }
            }
        }
        Ok(())
    }

    /// Queues `payload` and waits for the rendered reply. Returns `None` when
    /// the pool stopped before answering.
    fn dispatch(&self, payload: &str) -> Option<String> {
        let (reply, replies) = mpsc::channel();
        let job = GraphJob::new(self.client, payload, reply);
        if self.pool.submit(job).is_err() {
            debug!(target: SESSION_TARGET, client = %self.client, "pool rejected request");
            return None;
        }
        debug!(target: SESSION_TARGET, client = %self.client, "request queued");
        replies.recv().ok()
    }

    fn send(&mut self, text: &str) -> Result<(), SessionError> {
        self.stream
            .write_all(text.as_bytes())
            .and_then(|()| self.stream.flush())
            .map_err(|source| SessionError::Write { source })
    }
}
