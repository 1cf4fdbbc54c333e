//! Exact graph algorithms for the `graphd` daemon.
//!
//! This crate is pure computation: it parses request lines into edge lists,
//! builds [`Graph`] views from them and runs a fixed suite of exact
//! algorithms. It performs no I/O.
//!
//! # Core Types
//!
//! - [`Graph`] - adjacency-list graph with Euler circuit support
//! - [`Algorithm`] - strategy trait implemented by the five algorithms
//! - [`AlgorithmRegistry`] - lookup from wire keys to strategies
//! - [`SuiteRunner`] - runs the full suite or a single algorithm
//! - [`RequestParser`] - turns a request line into a [`GraphRequest`]
//!
//! # Example
//!
//! ```ignore
//! use graphd_engine::{AlgorithmRegistry, RequestParser, SuiteRunner};
//!
//! let request = RequestParser::new(50).parse("3 3 0-1 1-2 2-0")?;
//! let report = SuiteRunner::new(AlgorithmRegistry::new(42)).run(&request)?;
//! for result in report.results() {
//!     // render result
//! }
//! ```

mod algorithm;
mod error;
mod generator;
mod graph;
mod request;
mod suite;
mod union_find;

pub use algorithm::{
    Algorithm, AlgorithmKind, AlgorithmRegistry, AlgorithmResult, Answer, EulerCircuit,
    HamiltonCircuit, MaxClique, MinimumSpanningTree, Requirement, StronglyConnectedComponents,
    WeightedEdge, execute, seeded_weights,
};
pub use error::{EngineError, ErrorKind, GraphError};
pub use generator::GraphGenerator;
pub use graph::{EulerObstruction, Graph, Orientation, Vertex};
pub use request::{EdgeList, GraphRequest, RequestParser, Selection};
pub use suite::{SuiteReport, SuiteRunner};

#[cfg(test)]
mod tests;
