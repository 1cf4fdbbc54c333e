//! Text rendered back to clients.
//!
//! Every block here is plain text. Replies to graph requests start with a
//! blank line and carry no trailing prompt; the session appends the prompt
//! when it writes them.

use std::fmt::Write as _;
use std::time::Duration;

use graphd_engine::{AlgorithmKind, AlgorithmResult, EngineError, SuiteReport};

use crate::dispatch::ClientId;
use crate::pool::{PoolSnapshot, StatsSnapshot, WorkerId};

pub(crate) const PROMPT: &str = "> ";
pub(crate) const GOODBYE: &str = "Goodbye!\n";
pub(crate) const EMPTY_HINT: &str = "Empty input. Type 'help' for usage.\n> ";
pub(crate) const SHUTDOWN_NOTICE: &str = "Server is shutting down. Goodbye!\n";

const ANALYSIS_HEADER: &str = "=== MULTI-ALGORITHM ANALYSIS ===";
const ANALYSIS_FOOTER: &str = "===============================";
const ERROR_HEADER: &str = "=== ERROR ===";
const ERROR_FOOTER: &str = "=============";

/// Welcome text sent on connect and in answer to `help`.
pub(crate) fn banner(client: ClientId) -> String {
    let keys: Vec<&str> = AlgorithmKind::SUITE.iter().map(|kind| kind.key()).collect();
    format!(
        "=== Leader-Follower Graph Server ===\n\
         Client ID: {client}\n\
         Format: [algorithm] vertices edges edge1 edge2 ...\n\
         \x20       random vertices edges seed\n\
         Algorithms: {keys} (all run when none is named)\n\
         \n\
         Examples:\n\
         \x20 3 3 0-1 1-2 2-0        (triangle)\n\
         \x20 4 4 0-1 1-2 2-3 3-0    (square)\n\
         \x20 scc 3 2 0-1 1-2        (one algorithm only)\n\
         \x20 random 8 12 7          (seeded random graph)\n\
         \n\
         Commands: help, stats, quit\n\
         {PROMPT}",
        keys = keys.join(", "),
    )
}

/// Answer to the `stats` command.
pub(crate) fn stats(stats: &StatsSnapshot, pool: &PoolSnapshot) -> String {
    let average = stats
        .average_processing()
        .map_or_else(|| "N/A".to_owned(), micros);
    format!(
        "\n=== Server Statistics ===\n\
         Requests processed: {}\n\
         Leader promotions: {}\n\
         Worker threads: {}\n\
         Waiting followers: {}\n\
         Queued requests: {}\n\
         Average processing time: {average}\n\
         ========================\n\
         {PROMPT}",
        stats.requests_processed,
        stats.leader_promotions,
        stats.workers,
        pool.waiting_followers,
        pool.queued,
    )
}

/// Everything needed to render one successful analysis.
pub(crate) struct Analysis<'a> {
    pub(crate) client: ClientId,
    pub(crate) worker: WorkerId,
    pub(crate) queue_wait: Duration,
    pub(crate) report: &'a SuiteReport,
}

pub(crate) fn analysis(analysis: &Analysis<'_>) -> String {
    let report = analysis.report;
    let mut text = format!(
        "\n{ANALYSIS_HEADER}\n\
         Client: {}\n\
         Worker: {}\n\
         Algorithms executed: {}\n\
         Total time: {}ms\n\
         Queue wait: {}\n\n",
        analysis.client,
        analysis.worker,
        report.results().len(),
        report.elapsed().as_millis(),
        micros(analysis.queue_wait),
    );
    for result in report.results() {
        push_result_line(&mut text, result);
    }
    text.push_str(ANALYSIS_FOOTER);
    text
}

fn push_result_line(text: &mut String, result: &AlgorithmResult) {
    let key = result.algorithm().key();
    // Writing into a String cannot fail.
    let _ = match result.outcome() {
        Ok(answer) => writeln!(text, "• {key}: {answer} ({})", micros(result.elapsed())),
        Err(error) => writeln!(text, "• {key}: ERROR - {}: {error}", error.kind()),
    };
}

/// Block sent when a request is rejected before any algorithm runs.
pub(crate) fn error_block(client: ClientId, error: &EngineError) -> String {
    format!(
        "\n{ERROR_HEADER}\nClient: {client}\n{}: {error}\n{ERROR_FOOTER}",
        error.kind()
    )
}

fn micros(duration: Duration) -> String {
    format!("{}μs", duration.as_micros())
}
