//! Wire grammar for graph requests.
//!
//! One request per line:
//!
//! ```text
//! request  := [selector] V E edge*
//!           | "random" V E SEED
//! selector := "euler" | "clique" | "mst" | "hamilton" | "scc"
//! edge     := u "-" v
//! ```
//!
//! Tokens are whitespace separated. Counts that are not integers, and edge
//! tokens that are not `u-v`, are parse errors. Everything that tokenises but
//! is out of range is a validation error.

use std::str::FromStr;

use crate::algorithm::AlgorithmKind;
use crate::error::{EngineError, GraphError};
use crate::generator::GraphGenerator;
use crate::graph::{Graph, Orientation, Vertex};

const RANDOM_KEYWORD: &str = "random";

/// Vertex count plus the raw edges a request declared.
///
/// Both graph views used by the suite are built from the same list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    vertex_count: usize,
    edges: Vec<(Vertex, Vertex)>,
}

impl EdgeList {
    /// Wraps a vertex count and its edges.
    #[must_use]
    pub const fn new(vertex_count: usize, edges: Vec<(Vertex, Vertex)>) -> Self {
        Self {
            vertex_count,
            edges,
        }
    }

    /// Declared vertex count.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Edges in declaration order.
    #[must_use]
    pub fn edges(&self) -> &[(Vertex, Vertex)] {
        &self.edges
    }

    /// Number of declared edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` when no edges were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Builds a graph view with the given orientation. Repeated edges
    /// collapse into one.
    ///
    /// # Errors
    ///
    /// Propagates [`GraphError`] for invalid counts, endpoints or self-loops.
    pub fn build(&self, orientation: Orientation) -> Result<Graph, GraphError> {
        let mut graph = Graph::new(self.vertex_count, orientation)?;
        for &(u, v) in &self.edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }
}

/// Which algorithms a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Every algorithm, in suite order.
    Suite,
    /// One named algorithm.
    Single(AlgorithmKind),
}

/// A fully parsed and validated request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphRequest {
    selection: Selection,
    edges: EdgeList,
    seed: Option<u64>,
}

impl GraphRequest {
    /// Algorithms requested.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Edge list the graph views are built from.
    #[must_use]
    pub const fn edge_list(&self) -> &EdgeList {
        &self.edges
    }

    /// Generator seed, for `random` requests.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Parses request lines against a configured vertex limit.
#[derive(Debug, Clone, Copy)]
pub struct RequestParser {
    max_vertices: usize,
}

impl RequestParser {
    /// Creates a parser accepting up to `max_vertices` vertices per request,
    /// clamped to `1..=Graph::MAX_VERTICES`.
    #[must_use]
    pub fn new(max_vertices: usize) -> Self {
        Self {
            max_vertices: max_vertices.clamp(1, Graph::MAX_VERTICES),
        }
    }

    /// Largest vertex count this parser accepts.
    #[must_use]
    pub const fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    /// Parses one request line.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parse`] for tokens that do not fit the grammar
    /// and [`EngineError::Validation`] for out-of-range counts, endpoints,
    /// self-loops or an edge count that disagrees with the declared `E`.
    pub fn parse(&self, line: &str) -> Result<GraphRequest, EngineError> {
        let mut tokens = line.split_whitespace().peekable();
        let Some(&first) = tokens.peek() else {
            return Err(EngineError::parse("empty request"));
        };

        if first == RANDOM_KEYWORD {
            tokens.next();
            return self.parse_random(tokens);
        }

        let selection = if first.starts_with(|c: char| c.is_ascii_alphabetic()) {
            tokens.next();
            let kind = AlgorithmKind::from_str(first)
                .map_err(|_| EngineError::parse(format!("unknown command '{first}'")))?;
            Selection::Single(kind)
        } else {
            Selection::Suite
        };

        let vertices = self.vertex_count(tokens.next())?;
        let declared = edge_count(tokens.next(), vertices)?;

        // Sized from the tokens present; `declared` is client input.
        let edges = tokens
            .map(|token| parse_edge(token, vertices))
            .collect::<Result<Vec<_>, _>>()?;
        if edges.len() != declared {
            return Err(EngineError::validation(format!(
                "edge count mismatch: declared {declared}, found {}",
                edges.len()
            )));
        }

        Ok(GraphRequest {
            selection,
            edges: EdgeList::new(vertices, edges),
            seed: None,
        })
    }

    fn parse_random<'a>(
        &self,
        mut tokens: impl Iterator<Item = &'a str>,
    ) -> Result<GraphRequest, EngineError> {
        let vertices = self.vertex_count(tokens.next())?;
        let edges = edge_count(tokens.next(), vertices)?;
        let seed_token = tokens
            .next()
            .ok_or_else(|| EngineError::parse("missing seed"))?;
        let seed = seed_token
            .parse::<u64>()
            .map_err(|_| EngineError::parse(format!("invalid seed '{seed_token}'")))?;
        if let Some(extra) = tokens.next() {
            return Err(EngineError::parse(format!("unexpected token '{extra}'")));
        }

        let list = GraphGenerator::new(Orientation::Undirected).random(vertices, edges, seed)?;
        Ok(GraphRequest {
            selection: Selection::Suite,
            edges: list,
            seed: Some(seed),
        })
    }

    fn vertex_count(&self, token: Option<&str>) -> Result<usize, EngineError> {
        let value = parse_count(token, "vertex count")?;
        usize::try_from(value)
            .ok()
            .filter(|count| (1..=self.max_vertices).contains(count))
            .ok_or_else(|| {
                EngineError::validation(format!(
                    "vertex count must be between 1 and {}, got {value}",
                    self.max_vertices
                ))
            })
    }
}

fn edge_count(token: Option<&str>, vertices: usize) -> Result<usize, EngineError> {
    let value = parse_count(token, "edge count")?;
    let limit = Graph::max_edges(vertices, Orientation::Undirected);
    usize::try_from(value)
        .ok()
        .filter(|count| *count <= limit)
        .ok_or_else(|| {
            EngineError::validation(format!(
                "edge count must be between 0 and {limit} for {vertices} vertices, got {value}"
            ))
        })
}

fn parse_count(token: Option<&str>, what: &str) -> Result<i64, EngineError> {
    let text = token.ok_or_else(|| EngineError::parse(format!("missing {what}")))?;
    text.parse::<i64>()
        .map_err(|_| EngineError::parse(format!("invalid {what} '{text}'")))
}

fn parse_edge(token: &str, vertices: usize) -> Result<(Vertex, Vertex), EngineError> {
    let malformed = || EngineError::parse(format!("invalid edge '{token}'"));
    let (left, right) = token.split_once('-').ok_or_else(malformed)?;
    let u = left.parse::<Vertex>().map_err(|_| malformed())?;
    let v = right.parse::<Vertex>().map_err(|_| malformed())?;
    if u >= vertices || v >= vertices {
        return Err(EngineError::validation(format!(
            "vertex out of range in edge '{token}' (vertices: {vertices})"
        )));
    }
    if u == v {
        return Err(EngineError::validation(format!(
            "self-loop in edge '{token}'"
        )));
    }
    Ok((u, v))
}
