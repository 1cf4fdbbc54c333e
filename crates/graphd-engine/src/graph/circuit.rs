//! Euler circuit detection and extraction.

use std::collections::HashMap;
use std::fmt;

use super::{Graph, Vertex};

/// Why a graph has no Euler circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EulerObstruction {
    /// Edges span more than one connected component.
    Disconnected,
    /// An undirected vertex has odd degree.
    OddDegree,
    /// A directed vertex has in-degree different from its out-degree.
    UnbalancedDegree,
}

impl fmt::Display for EulerObstruction {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Disconnected => "graph not connected",
            Self::OddDegree => "not all vertices have even degree",
            Self::UnbalancedDegree => "in-degree ≠ out-degree for some vertices",
        })
    }
}

impl Graph {
    /// Returns `true` when the graph admits an Euler circuit.
    #[must_use]
    pub fn has_euler_circuit(&self) -> bool {
        self.euler_obstruction().is_none()
    }

    /// Explains why no Euler circuit exists, or `None` when one does.
    ///
    /// Connectivity is checked first, then the degree condition.
    #[must_use]
    pub fn euler_obstruction(&self) -> Option<EulerObstruction> {
        if !self.is_connected() {
            return Some(EulerObstruction::Disconnected);
        }
        if self.is_directed() {
            let incoming = self.in_degrees();
            let balanced = incoming
                .iter()
                .enumerate()
                .all(|(vertex, &count)| self.degree(vertex) == count);
            return (!balanced).then_some(EulerObstruction::UnbalancedDegree);
        }
        let even = (0..self.vertex_count()).all(|vertex| self.degree(vertex).is_multiple_of(2));
        (!even).then_some(EulerObstruction::OddDegree)
    }

    /// Builds an Euler circuit with Hierholzer's algorithm.
    ///
    /// Returns an empty vector when no circuit exists. The walk starts at the
    /// first vertex with a positive degree (vertex 0 for an edgeless graph),
    /// uses every edge exactly once and ends where it started.
    #[must_use]
    pub fn find_euler_circuit(&self) -> Vec<Vertex> {
        if !self.has_euler_circuit() {
            return Vec::new();
        }
        let start = self.first_active_vertex().unwrap_or(0);
        let mut walk = EdgeCursor::new(self);

        let mut stack = vec![start];
        let mut circuit = Vec::with_capacity(self.edge_count().saturating_add(1));
        while let Some(&top) = stack.last() {
            if let Some(next) = walk.advance(top) {
                stack.push(next);
            } else {
                stack.pop();
                circuit.push(top);
            }
        }
        circuit.reverse();
        circuit
    }
}

/// Per-vertex cursors over incident edges with a shared "used" flag per edge.
///
/// Undirected edges appear in both endpoints' lists under one id, so
/// consuming an edge from either side retires it for both.
struct EdgeCursor {
    incident: Vec<Vec<(Vertex, usize)>>,
    cursors: Vec<usize>,
    used: Vec<bool>,
}

impl EdgeCursor {
    fn new(graph: &Graph) -> Self {
        let ids: HashMap<(Vertex, Vertex), usize> = graph
            .edges()
            .into_iter()
            .enumerate()
            .map(|(id, edge)| (edge, id))
            .collect();
        let directed = graph.is_directed();
        let incident = graph
            .adjacency()
            .map(|(vertex, neighbours)| {
                neighbours
                    .iter()
                    .filter_map(|&next| {
                        let key = if directed || vertex < next {
                            (vertex, next)
                        } else {
                            (next, vertex)
                        };
                        ids.get(&key).map(|&id| (next, id))
                    })
                    .collect()
            })
            .collect();
        Self {
            incident,
            cursors: vec![0; graph.vertex_count()],
            used: vec![false; ids.len()],
        }
    }

    /// Consumes the next unused edge leaving `vertex` and returns its other
    /// endpoint.
    fn advance(&mut self, vertex: Vertex) -> Option<Vertex> {
        let edges = self.incident.get(vertex)?;
        let cursor = self.cursors.get_mut(vertex)?;
        while let Some(&(next, id)) = edges.get(*cursor) {
            *cursor = cursor.saturating_add(1);
            if let Some(used) = self.used.get_mut(id)
                && !*used
            {
                *used = true;
                return Some(next);
            }
        }
        None
    }
}
