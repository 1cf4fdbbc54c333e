use crate::algorithm::{Algorithm, AlgorithmKind, Answer, Requirement};
use crate::error::EngineError;
use crate::graph::{Graph, Vertex};

/// Strongly connected components via an iterative Kosaraju pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct StronglyConnectedComponents;

impl Algorithm for StronglyConnectedComponents {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Scc
    }

    fn description(&self) -> &'static str {
        "Strongly connected components (Kosaraju)"
    }

    fn requirement(&self) -> Requirement {
        Requirement::Directed
    }

    fn solve(&self, graph: &Graph) -> Result<Answer, EngineError> {
        let order = finish_order(graph);
        let transposed = graph.transpose();

        let mut visited = vec![false; graph.vertex_count()];
        let mut components = Vec::new();
        for &root in order.iter().rev() {
            if !mark(&mut visited, root) {
                continue;
            }
            let mut component = vec![root];
            let mut stack = vec![root];
            while let Some(vertex) = stack.pop() {
                for &next in transposed.neighbors(vertex) {
                    if mark(&mut visited, next) {
                        component.push(next);
                        stack.push(next);
                    }
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        Ok(Answer::Components(components))
    }
}

/// Marks `vertex` visited, returning `true` if it was not visited before.
fn mark(visited: &mut [bool], vertex: Vertex) -> bool {
    match visited.get_mut(vertex) {
        Some(seen) if !*seen => {
            *seen = true;
            true
        }
        _ => false,
    }
}

/// Vertices in depth-first finish order, matching a recursive traversal
/// that visits roots and neighbours in index order.
fn finish_order(graph: &Graph) -> Vec<Vertex> {
    let mut visited = vec![false; graph.vertex_count()];
    let mut order = Vec::with_capacity(graph.vertex_count());
    let mut stack: Vec<(Vertex, usize)> = Vec::new();

    for root in 0..graph.vertex_count() {
        if !mark(&mut visited, root) {
            continue;
        }
        stack.push((root, 0));
        while let Some(frame) = stack.last_mut() {
            let (vertex, cursor) = *frame;
            if let Some(&next) = graph.neighbors(vertex).get(cursor) {
                frame.1 = cursor + 1;
                if mark(&mut visited, next) {
                    stack.push((next, 0));
                }
            } else {
                stack.pop();
                order.push(vertex);
            }
        }
    }
    order
}
