use crate::algorithm::{Algorithm, AlgorithmKind, Answer};
use crate::error::EngineError;
use crate::graph::{Graph, Vertex};

/// Largest graph the exact Hamiltonian search accepts.
const HAMILTON_VERTEX_CAP: usize = 12;
const START: Vertex = 0;

/// Hamiltonian circuit search by backtracking from vertex 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct HamiltonCircuit;

impl Algorithm for HamiltonCircuit {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Hamilton
    }

    fn description(&self) -> &'static str {
        "Hamiltonian circuit (backtracking, up to 12 vertices)"
    }

    fn vertex_cap(&self) -> Option<usize> {
        Some(HAMILTON_VERTEX_CAP)
    }

    fn solve(&self, graph: &Graph) -> Result<Answer, EngineError> {
        let vertex_count = graph.vertex_count();
        if vertex_count < 3 {
            return Ok(Answer::HamiltonTooSmall);
        }

        let mut visited = vec![false; vertex_count];
        if let Some(start) = visited.get_mut(START) {
            *start = true;
        }
        let mut path = Vec::with_capacity(vertex_count + 1);
        path.push(START);

        if extend_path(graph, &mut path, &mut visited) {
            path.push(START);
            return Ok(Answer::HamiltonCircuit(path));
        }
        Ok(Answer::NoHamiltonCircuit)
    }
}

// Recursion depth is bounded by the vertex cap.
fn extend_path(graph: &Graph, path: &mut Vec<Vertex>, visited: &mut [bool]) -> bool {
    let Some(&last) = path.last() else {
        return false;
    };
    if path.len() == graph.vertex_count() {
        return graph.has_edge(last, START);
    }

    for next in 1..graph.vertex_count() {
        if !graph.has_edge(last, next) {
            continue;
        }
        let Some(seen) = visited.get_mut(next) else {
            continue;
        };
        if *seen {
            continue;
        }
        *seen = true;
        path.push(next);
        if extend_path(graph, path, visited) {
            return true;
        }
        path.pop();
        if let Some(slot) = visited.get_mut(next) {
            *slot = false;
        }
    }
    false
}
