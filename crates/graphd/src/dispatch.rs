//! Graph jobs and the processor that answers them on pool workers.

use std::fmt;
use std::sync::mpsc::Sender;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use graphd_config::Config;
use graphd_engine::{AlgorithmRegistry, EngineError, RequestParser, SuiteReport, SuiteRunner};

use crate::pool::{JobProcessor, WorkerId};
use crate::response::{self, Analysis};

const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// Identifier assigned to each client connection, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClientId(u64);

impl ClientId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// One request line waiting for a worker.
///
/// The rendered reply travels back to the owning session over `reply`.
/// Dropping an unprocessed job closes that channel, which the session
/// reads as shutdown.
#[derive(Debug)]
pub struct GraphJob {
    client: ClientId,
    payload: String,
    enqueued_at: Instant,
    reply: Sender<String>,
}

impl GraphJob {
    /// Creates a job stamped with the current time.
    #[must_use]
    pub fn new(client: ClientId, payload: impl Into<String>, reply: Sender<String>) -> Self {
        Self {
            client,
            payload: payload.into(),
            enqueued_at: Instant::now(),
            reply,
        }
    }

    /// Client that sent the request.
    #[must_use]
    pub const fn client(&self) -> ClientId {
        self.client
    }

    /// Raw request line.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Parses, evaluates and renders graph jobs.
#[derive(Debug)]
pub struct GraphJobProcessor {
    parser: RequestParser,
    runner: SuiteRunner,
}

impl GraphJobProcessor {
    /// Builds a processor honouring the configured vertex limit and MST seed.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            parser: RequestParser::new(config.max_vertices()),
            runner: SuiteRunner::new(AlgorithmRegistry::new(config.mst_seed())),
        }
    }

    fn evaluate(&self, payload: &str) -> Result<SuiteReport, EngineError> {
        let request = self.parser.parse(payload)?;
        self.runner.run(&request)
    }

    fn render(&self, job: &GraphJob, worker: WorkerId, queue_wait: Duration) -> String {
        match self.evaluate(&job.payload) {
            Ok(report) => response::analysis(&Analysis {
                client: job.client,
                worker,
                queue_wait,
                report: &report,
            }),
            Err(error) => {
                debug!(
                    target: DISPATCH_TARGET,
                    client = %job.client,
                    kind = %error.kind(),
                    error = %error,
                    "request rejected"
                );
                response::error_block(job.client, &error)
            }
        }
    }
}

impl JobProcessor for GraphJobProcessor {
    type Job = GraphJob;

    fn process(&self, job: GraphJob, worker: WorkerId) {
        let queue_wait = job.enqueued_at.elapsed();
        let started = Instant::now();
        let reply = self.render(&job, worker, queue_wait);
        info!(
            target: DISPATCH_TARGET,
            client = %job.client,
            worker = %worker,
            queue_wait_us = queue_wait.as_micros(),
            elapsed_us = started.elapsed().as_micros(),
            "request processed"
        );
        if job.reply.send(reply).is_err() {
            debug!(
                target: DISPATCH_TARGET,
                client = %job.client,
                "client left before the reply was ready"
            );
        }
    }
}
