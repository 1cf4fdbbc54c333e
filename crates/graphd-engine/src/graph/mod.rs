//! Adjacency-list graph model shared by every algorithm.
//!
//! A [`Graph`] is built once per request from a parsed edge list and is never
//! shared across requests. Algorithms only read it; anything that needs to
//! consume edges (such as Euler circuit extraction) works on private cursors
//! instead of mutating the graph.

mod circuit;
mod traversal;

use std::fmt;

use crate::error::GraphError;

pub use circuit::EulerObstruction;

/// Index of a vertex within `[0, vertex_count)`.
pub type Vertex = usize;

/// Whether edges are one-way or symmetric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Every edge is stored in both endpoints' adjacency lists.
    Undirected,
    /// Edges run from source to target only.
    Directed,
}

impl Orientation {
    /// Returns `true` for [`Orientation::Directed`].
    #[must_use]
    pub const fn is_directed(self) -> bool {
        matches!(self, Self::Directed)
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undirected => formatter.write_str("undirected"),
            Self::Directed => formatter.write_str("directed"),
        }
    }
}

/// Simple graph without self-loops or parallel edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    orientation: Orientation,
    adjacency: Vec<Vec<Vertex>>,
    edge_count: usize,
}

impl Graph {
    /// Largest vertex count a graph may be created with.
    pub const MAX_VERTICES: usize = 10_000;

    /// Creates an edgeless graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::VertexCount`] when `vertex_count` is zero or
    /// larger than [`Graph::MAX_VERTICES`].
    pub fn new(vertex_count: usize, orientation: Orientation) -> Result<Self, GraphError> {
        if vertex_count == 0 || vertex_count > Self::MAX_VERTICES {
            return Err(GraphError::VertexCount {
                count: vertex_count,
                max: Self::MAX_VERTICES,
            });
        }
        Ok(Self {
            orientation,
            adjacency: vec![Vec::new(); vertex_count],
            edge_count: 0,
        })
    }

    /// Creates an edgeless undirected graph.
    ///
    /// # Errors
    ///
    /// See [`Graph::new`].
    pub fn undirected(vertex_count: usize) -> Result<Self, GraphError> {
        Self::new(vertex_count, Orientation::Undirected)
    }

    /// Creates an edgeless directed graph.
    ///
    /// # Errors
    ///
    /// See [`Graph::new`].
    pub fn directed(vertex_count: usize) -> Result<Self, GraphError> {
        Self::new(vertex_count, Orientation::Directed)
    }

    /// Upper bound on the number of edges a simple graph may hold.
    #[must_use]
    pub fn max_edges(vertex_count: usize, orientation: Orientation) -> usize {
        let ordered_pairs = vertex_count.saturating_mul(vertex_count.saturating_sub(1));
        match orientation {
            Orientation::Directed => ordered_pairs,
            Orientation::Undirected => ordered_pairs.checked_div(2).unwrap_or(0),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Edge orientation of this graph.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns `true` when edges are directed.
    #[must_use]
    pub const fn is_directed(&self) -> bool {
        self.orientation.is_directed()
    }

    /// Number of distinct edges. Undirected edges count once.
    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` when at least one edge exists.
    #[must_use]
    pub const fn has_edges(&self) -> bool {
        self.edge_count > 0
    }

    /// Inserts the edge `u`-`v`. Inserting an existing edge is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::OutOfRange`] for an invalid endpoint and
    /// [`GraphError::SelfLoop`] when `u == v`.
    pub fn add_edge(&mut self, u: Vertex, v: Vertex) -> Result<(), GraphError> {
        let vertex_count = self.vertex_count();
        if u >= vertex_count || v >= vertex_count {
            return Err(GraphError::OutOfRange { u, v, vertex_count });
        }
        if u == v {
            return Err(GraphError::SelfLoop { vertex: u });
        }
        if self.has_edge(u, v) {
            return Ok(());
        }

        if let Some(list) = self.adjacency.get_mut(u) {
            list.push(v);
        }
        if !self.is_directed()
            && let Some(list) = self.adjacency.get_mut(v)
        {
            list.push(u);
        }
        self.edge_count = self.edge_count.saturating_add(1);
        Ok(())
    }

    /// Removes the edge `u`-`v` if present. Invalid indices are ignored.
    pub fn remove_edge(&mut self, u: Vertex, v: Vertex) {
        if !self.has_edge(u, v) {
            return;
        }
        if let Some(list) = self.adjacency.get_mut(u) {
            list.retain(|&neighbour| neighbour != v);
        }
        if !self.is_directed()
            && let Some(list) = self.adjacency.get_mut(v)
        {
            list.retain(|&neighbour| neighbour != u);
        }
        self.edge_count = self.edge_count.saturating_sub(1);
    }

    /// Returns `true` when the edge `u`-`v` exists.
    #[must_use]
    pub fn has_edge(&self, u: Vertex, v: Vertex) -> bool {
        self.neighbors(u).contains(&v)
    }

    /// Neighbours of `vertex` in insertion order, or an empty slice when the
    /// index is invalid.
    #[must_use]
    pub fn neighbors(&self, vertex: Vertex) -> &[Vertex] {
        self.adjacency.get(vertex).map_or(&[], Vec::as_slice)
    }

    /// Out-degree of `vertex` (plain degree for undirected graphs).
    #[must_use]
    pub fn degree(&self, vertex: Vertex) -> usize {
        self.neighbors(vertex).len()
    }

    /// In-degree of every vertex, indexed by vertex.
    #[must_use]
    pub fn in_degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0_usize; self.vertex_count()];
        for &target in self.adjacency.iter().flatten() {
            if let Some(slot) = degrees.get_mut(target) {
                *slot = slot.saturating_add(1);
            }
        }
        degrees
    }

    /// Lists every edge once. Undirected edges are reported as `(u, v)` with
    /// `u < v`, ordered by `u` and then by adjacency insertion order.
    #[must_use]
    pub fn edges(&self) -> Vec<(Vertex, Vertex)> {
        let directed = self.is_directed();
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, list)| list.iter().map(move |&v| (u, v)))
            .filter(|&(u, v)| directed || u < v)
            .collect()
    }

    /// Returns a graph with every edge reversed. Undirected graphs are
    /// returned unchanged.
    #[must_use]
    pub fn transpose(&self) -> Self {
        if !self.is_directed() {
            return self.clone();
        }
        let mut reversed = vec![Vec::new(); self.vertex_count()];
        for (source, targets) in self.adjacency.iter().enumerate() {
            for &target in targets {
                if let Some(list) = reversed.get_mut(target) {
                    list.push(source);
                }
            }
        }
        Self {
            orientation: self.orientation,
            adjacency: reversed,
            edge_count: self.edge_count,
        }
    }

    /// Iterates over `(vertex, neighbours)` pairs.
    pub fn adjacency(&self) -> impl Iterator<Item = (Vertex, &[Vertex])> {
        self.adjacency
            .iter()
            .enumerate()
            .map(|(vertex, list)| (vertex, list.as_slice()))
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            formatter,
            "{} graph: {} vertices, {} edges",
            self.orientation,
            self.vertex_count(),
            self.edge_count
        )?;
        let incoming = self.in_degrees();
        for (vertex, neighbours) in self.adjacency() {
            write!(formatter, "  {vertex}:")?;
            if neighbours.is_empty() && incoming.get(vertex).is_none_or(|&count| count == 0) {
                writeln!(formatter, " (isolated)")?;
                continue;
            }
            for neighbour in neighbours {
                write!(formatter, " {neighbour}")?;
            }
            writeln!(formatter)?;
        }
        Ok(())
    }
}
