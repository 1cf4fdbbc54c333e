use crate::algorithm::{Algorithm, AlgorithmKind, Answer, Requirement};
use crate::error::EngineError;
use crate::graph::{Graph, Vertex};

/// Largest graph the exact clique search accepts.
const CLIQUE_VERTEX_CAP: usize = 15;

/// Exact maximum clique search using branch and bound.
///
/// Candidates are tried in ascending index order and a branch is abandoned
/// once it cannot beat the best clique found so far, so ties resolve to the
/// lexicographically smallest clique.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxClique;

impl Algorithm for MaxClique {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::MaxClique
    }

    fn description(&self) -> &'static str {
        "Maximum clique (branch and bound, up to 15 vertices)"
    }

    fn requirement(&self) -> Requirement {
        Requirement::Undirected
    }

    fn vertex_cap(&self) -> Option<usize> {
        Some(CLIQUE_VERTEX_CAP)
    }

    fn solve(&self, graph: &Graph) -> Result<Answer, EngineError> {
        let mut search = CliqueSearch {
            graph,
            current: Vec::with_capacity(graph.vertex_count()),
            best: Vec::new(),
        };
        search.extend(0);
        Ok(Answer::MaxClique(search.best))
    }
}

struct CliqueSearch<'a> {
    graph: &'a Graph,
    current: Vec<Vertex>,
    best: Vec<Vertex>,
}

impl CliqueSearch<'_> {
    // Recursion depth is bounded by the vertex cap.
    fn extend(&mut self, first_candidate: Vertex) {
        if self.current.len() > self.best.len() {
            self.best.clone_from(&self.current);
        }
        let vertex_count = self.graph.vertex_count();
        for candidate in first_candidate..vertex_count {
            let remaining = vertex_count - candidate;
            if self.current.len() + remaining <= self.best.len() {
                return;
            }
            let adjacent_to_all = self
                .current
                .iter()
                .all(|&member| self.graph.has_edge(member, candidate));
            if adjacent_to_all {
                self.current.push(candidate);
                self.extend(candidate + 1);
                self.current.pop();
            }
        }
    }
}
