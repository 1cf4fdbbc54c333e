//! Exact graph algorithms and the plumbing that runs them.
//!
//! Every strategy implements [`Algorithm`]. Callers never invoke
//! [`Algorithm::solve`] directly; [`execute`] first checks orientation and
//! size caps, then times the solve and wraps the outcome in an
//! [`AlgorithmResult`].

mod answer;
mod clique;
mod euler;
mod hamilton;
mod mst;
mod registry;
mod scc;

use std::fmt;
use std::time::{Duration, Instant};

use strum::{Display, EnumString, IntoStaticStr};

use crate::error::EngineError;
use crate::graph::{Graph, Orientation};

pub use answer::Answer;
pub use clique::MaxClique;
pub use euler::EulerCircuit;
pub use hamilton::HamiltonCircuit;
pub use mst::{MinimumSpanningTree, WeightedEdge, seeded_weights};
pub use registry::AlgorithmRegistry;
pub use scc::StronglyConnectedComponents;

/// Identifies one of the five supported algorithms.
///
/// Parses from and displays as the wire key (`euler`, `clique`, `mst`,
/// `hamilton`, `scc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum AlgorithmKind {
    /// Euler circuit via Hierholzer's algorithm.
    #[strum(serialize = "euler")]
    Euler,
    /// Maximum clique via branch and bound.
    #[strum(serialize = "clique")]
    MaxClique,
    /// Minimum spanning tree weight via Kruskal's algorithm.
    #[strum(serialize = "mst")]
    Mst,
    /// Hamiltonian circuit via backtracking.
    #[strum(serialize = "hamilton")]
    Hamilton,
    /// Strongly connected components via Kosaraju's algorithm.
    #[strum(serialize = "scc")]
    Scc,
}

impl AlgorithmKind {
    /// Full-suite execution order.
    pub const SUITE: [Self; 5] = [
        Self::Euler,
        Self::MaxClique,
        Self::Mst,
        Self::Hamilton,
        Self::Scc,
    ];

    /// Wire key for this algorithm.
    #[must_use]
    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Graph view the suite runner builds for this algorithm.
    #[must_use]
    pub const fn preferred_orientation(self) -> Orientation {
        match self {
            Self::Scc => Orientation::Directed,
            Self::Euler | Self::MaxClique | Self::Mst | Self::Hamilton => Orientation::Undirected,
        }
    }
}

/// Graph orientation an algorithm accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Either orientation.
    Any,
    /// Undirected graphs only.
    Undirected,
    /// Directed graphs only.
    Directed,
}

impl Requirement {
    /// Returns `true` when a graph with `orientation` satisfies this
    /// requirement.
    #[must_use]
    pub const fn accepts(self, orientation: Orientation) -> bool {
        match self {
            Self::Any => true,
            Self::Undirected => matches!(orientation, Orientation::Undirected),
            Self::Directed => matches!(orientation, Orientation::Directed),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Any => "any",
            Self::Undirected => "undirected",
            Self::Directed => "directed",
        })
    }
}

/// A single exact graph algorithm.
pub trait Algorithm: Send + Sync {
    /// Which algorithm this is.
    fn kind(&self) -> AlgorithmKind;

    /// One-line description for help text.
    fn description(&self) -> &'static str;

    /// Orientation the algorithm accepts.
    fn requirement(&self) -> Requirement {
        Requirement::Any
    }

    /// Largest vertex count the algorithm will attempt, if capped.
    fn vertex_cap(&self) -> Option<usize> {
        None
    }

    /// Computes the answer for an already validated graph.
    ///
    /// "No answer" outcomes, such as a graph without an Euler circuit, are
    /// successful [`Answer`]s.
    ///
    /// # Errors
    ///
    /// Returns an [`EngineError`] only when the graph cannot be processed.
    fn solve(&self, graph: &Graph) -> Result<Answer, EngineError>;
}

/// Outcome of running one algorithm against one graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgorithmResult {
    algorithm: AlgorithmKind,
    outcome: Result<Answer, EngineError>,
    elapsed: Duration,
}

impl AlgorithmResult {
    /// Builds a result from its parts.
    #[must_use]
    pub const fn new(
        algorithm: AlgorithmKind,
        outcome: Result<Answer, EngineError>,
        elapsed: Duration,
    ) -> Self {
        Self {
            algorithm,
            outcome,
            elapsed,
        }
    }

    /// Algorithm that produced this result.
    #[must_use]
    pub const fn algorithm(&self) -> AlgorithmKind {
        self.algorithm
    }

    /// Returns `true` when the algorithm produced an answer.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The answer, when the run succeeded.
    #[must_use]
    pub fn answer(&self) -> Option<&Answer> {
        self.outcome.as_ref().ok()
    }

    /// The error, when the run failed.
    #[must_use]
    pub fn error(&self) -> Option<&EngineError> {
        self.outcome.as_ref().err()
    }

    /// Borrowed view of the full outcome.
    #[must_use]
    pub const fn outcome(&self) -> &Result<Answer, EngineError> {
        &self.outcome
    }

    /// Wall-clock time spent inside the algorithm.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// Validates `graph` against the algorithm's requirements and runs it.
///
/// Orientation is checked before the vertex cap. Neither check nor the
/// solve itself panics; every failure is captured in the returned result.
#[must_use]
pub fn execute(algorithm: &dyn Algorithm, graph: &Graph) -> AlgorithmResult {
    let started = Instant::now();
    let outcome = check_requirements(algorithm, graph).and_then(|()| algorithm.solve(graph));
    AlgorithmResult::new(algorithm.kind(), outcome, started.elapsed())
}

fn check_requirements(algorithm: &dyn Algorithm, graph: &Graph) -> Result<(), EngineError> {
    let requirement = algorithm.requirement();
    if !requirement.accepts(graph.orientation()) {
        return Err(EngineError::validation(format!(
            "Algorithm requires {requirement} graph"
        )));
    }
    if let Some(limit) = algorithm.vertex_cap()
        && graph.vertex_count() > limit
    {
        return Err(EngineError::capacity(limit));
    }
    Ok(())
}
