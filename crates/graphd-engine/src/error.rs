//! Error types for graph construction and algorithm execution.

use std::fmt;

use thiserror::Error;

use crate::graph::Vertex;

/// Errors raised while building or mutating a [`crate::Graph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The requested vertex count is zero or above the supported ceiling.
    #[error("vertex count must be between 1 and {max}, got {count}")]
    VertexCount {
        /// Rejected vertex count.
        count: usize,
        /// Largest supported vertex count.
        max: usize,
    },

    /// An edge endpoint lies outside `[0, vertex_count)`.
    #[error("edge {u}-{v} references a vertex outside 0..{vertex_count}")]
    OutOfRange {
        /// Source endpoint.
        u: Vertex,
        /// Target endpoint.
        v: Vertex,
        /// Vertex count of the graph being mutated.
        vertex_count: usize,
    },

    /// Both endpoints of an edge are the same vertex.
    #[error("self-loop on vertex {vertex} is not allowed")]
    SelfLoop {
        /// Vertex the loop was attached to.
        vertex: Vertex,
    },
}

/// Coarse classification reported alongside every [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be tokenised.
    ParseError,
    /// The request was well-formed but semantically invalid.
    ValidationError,
    /// The input exceeds an exact algorithm's size cap.
    CapacityError,
}

impl ErrorKind {
    /// Stable label used in rendered responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParseError => "ParseError",
            Self::ValidationError => "ValidationError",
            Self::CapacityError => "CapacityError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Failures surfaced by request parsing and algorithm execution.
///
/// None of these ever escape a single request: they are rendered into the
/// reply for the client that sent it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The request text does not follow the wire grammar.
    #[error("{0}")]
    Parse(String),

    /// Counts, indices or graph orientation are unacceptable.
    #[error("{0}")]
    Validation(String),

    /// The graph is too large for an exact algorithm.
    #[error("{message}")]
    Capacity {
        /// Human-readable description.
        message: String,
        /// Vertex cap the algorithm enforces.
        limit: usize,
    },
}

impl EngineError {
    /// Creates a new `Parse` error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a new `Capacity` error for an algorithm capped at `limit`
    /// vertices.
    #[must_use]
    pub fn capacity(limit: usize) -> Self {
        Self::Capacity {
            message: format!("Graph too large for exact algorithm (max {limit} vertices)"),
            limit,
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(_) => ErrorKind::ParseError,
            Self::Validation(_) => ErrorKind::ValidationError,
            Self::Capacity { .. } => ErrorKind::CapacityError,
        }
    }
}

impl From<GraphError> for EngineError {
    fn from(error: GraphError) -> Self {
        Self::Validation(error.to_string())
    }
}
