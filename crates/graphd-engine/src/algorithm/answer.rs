//! Typed algorithm answers and their human-readable rendering.

use std::fmt;

use crate::graph::{EulerObstruction, Vertex};

/// Successful outcome of an algorithm.
///
/// The `Display` form is the payload shown to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// An Euler circuit, as a closed vertex walk.
    EulerCircuit(Vec<Vertex>),
    /// The graph has no Euler circuit.
    NoEulerCircuit(EulerObstruction),
    /// A maximum clique, in ascending vertex order.
    MaxClique(Vec<Vertex>),
    /// Total weight of a minimum spanning tree.
    SpanningTree {
        /// Sum of the selected edge weights.
        weight: u64,
        /// Number of edges in the tree.
        edges: usize,
    },
    /// The graph has no edges, so the spanning tree weighs nothing.
    EmptySpanningTree,
    /// The graph is disconnected, so no spanning tree exists.
    NoSpanningTree,
    /// A Hamiltonian circuit starting and ending at vertex 0.
    HamiltonCircuit(Vec<Vertex>),
    /// Backtracking exhausted the search without a circuit.
    NoHamiltonCircuit,
    /// Fewer than three vertices cannot form a Hamiltonian circuit.
    HamiltonTooSmall,
    /// Strongly connected components, each sorted ascending.
    Components(Vec<Vec<Vertex>>),
}

impl fmt::Display for Answer {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EulerCircuit(circuit) => write!(
                formatter,
                "Euler circuit: {} (length: {})",
                Walk(circuit),
                circuit.len()
            ),
            Self::NoEulerCircuit(reason) => write!(formatter, "No Euler circuit ({reason})"),
            Self::MaxClique(members) => write!(
                formatter,
                "Max clique size: {}, vertices: {}",
                members.len(),
                VertexSet(members)
            ),
            Self::SpanningTree { weight, edges } => {
                write!(formatter, "MST weight: {weight} (edges: {edges})")
            }
            Self::EmptySpanningTree => formatter.write_str("MST weight: 0 (no edges)"),
            Self::NoSpanningTree => formatter.write_str("No MST (graph not connected)"),
            Self::HamiltonCircuit(circuit) => {
                write!(formatter, "Hamilton circuit: {}", Walk(circuit))
            }
            Self::NoHamiltonCircuit => formatter.write_str("No Hamilton circuit exists"),
            Self::HamiltonTooSmall => {
                formatter.write_str("Hamilton circuit requires at least 3 vertices")
            }
            Self::Components(components) => {
                write!(formatter, "SCCs: {} components:", components.len())?;
                for component in components {
                    write!(formatter, " {}", VertexSet(component))?;
                }
                Ok(())
            }
        }
    }
}

struct Walk<'a>(&'a [Vertex]);

impl fmt::Display for Walk<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, vertex) in self.0.iter().enumerate() {
            if position > 0 {
                formatter.write_str("→")?;
            }
            write!(formatter, "{vertex}")?;
        }
        Ok(())
    }
}

struct VertexSet<'a>(&'a [Vertex]);

impl fmt::Display for VertexSet<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("{")?;
        for (position, vertex) in self.0.iter().enumerate() {
            if position > 0 {
                formatter.write_str(",")?;
            }
            write!(formatter, "{vertex}")?;
        }
        formatter.write_str("}")
    }
}
