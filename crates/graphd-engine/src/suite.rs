//! Runs selected algorithms against the graph views of one request.

use std::time::{Duration, Instant};

use crate::algorithm::{AlgorithmKind, AlgorithmRegistry, AlgorithmResult, execute};
use crate::error::EngineError;
use crate::graph::{Graph, Orientation};
use crate::request::{EdgeList, GraphRequest, Selection};

/// Results for one request, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    results: Vec<AlgorithmResult>,
    elapsed: Duration,
}

impl SuiteReport {
    /// Per-algorithm results.
    #[must_use]
    pub fn results(&self) -> &[AlgorithmResult] {
        &self.results
    }

    /// Time spent building graph views and running every algorithm.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Result for `kind`, if it was executed.
    #[must_use]
    pub fn result(&self, kind: AlgorithmKind) -> Option<&AlgorithmResult> {
        self.results.iter().find(|result| result.algorithm() == kind)
    }
}

/// Executes algorithms from a registry.
///
/// Euler, max clique, MST and Hamilton run on the undirected view of the
/// edge list; SCC runs on the directed view. A failing algorithm never stops
/// the others.
#[derive(Debug, Default)]
pub struct SuiteRunner {
    registry: AlgorithmRegistry,
}

impl SuiteRunner {
    /// Creates a runner over `registry`.
    #[must_use]
    pub const fn new(registry: AlgorithmRegistry) -> Self {
        Self { registry }
    }

    /// Underlying registry.
    #[must_use]
    pub const fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    /// Runs whatever `request` selected.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when a graph view cannot be built
    /// from the request's edge list.
    pub fn run(&self, request: &GraphRequest) -> Result<SuiteReport, EngineError> {
        match request.selection() {
            Selection::Suite => self.run_suite(request.edge_list()),
            Selection::Single(kind) => self.run_single(kind, request.edge_list()),
        }
    }

    /// Runs all five algorithms in suite order.
    ///
    /// # Errors
    ///
    /// See [`SuiteRunner::run`].
    pub fn run_suite(&self, edges: &EdgeList) -> Result<SuiteReport, EngineError> {
        let started = Instant::now();
        let undirected = edges.build(Orientation::Undirected)?;
        let directed = edges.build(Orientation::Directed)?;
        let results = AlgorithmKind::SUITE
            .iter()
            .filter_map(|&kind| {
                let graph = match kind.preferred_orientation() {
                    Orientation::Undirected => &undirected,
                    Orientation::Directed => &directed,
                };
                self.run_on(kind, graph)
            })
            .collect();
        Ok(SuiteReport {
            results,
            elapsed: started.elapsed(),
        })
    }

    /// Runs one algorithm on the view it needs.
    ///
    /// # Errors
    ///
    /// See [`SuiteRunner::run`].
    pub fn run_single(
        &self,
        kind: AlgorithmKind,
        edges: &EdgeList,
    ) -> Result<SuiteReport, EngineError> {
        let started = Instant::now();
        let graph = edges.build(kind.preferred_orientation())?;
        let results = self.run_on(kind, &graph).into_iter().collect();
        Ok(SuiteReport {
            results,
            elapsed: started.elapsed(),
        })
    }

    fn run_on(&self, kind: AlgorithmKind, graph: &Graph) -> Option<AlgorithmResult> {
        self.registry
            .get(kind)
            .map(|algorithm| execute(algorithm, graph))
    }
}
