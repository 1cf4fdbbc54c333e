//! Shared helpers for engine tests.

use std::collections::HashMap;

use crate::{Graph, Orientation, Vertex};

pub(super) fn build(orientation: Orientation, vertices: usize, edges: &[(Vertex, Vertex)]) -> Graph {
    let mut graph = Graph::new(vertices, orientation).expect("graph");
    for &(u, v) in edges {
        graph.add_edge(u, v).expect("edge");
    }
    graph
}

/// Checks that `circuit` is closed, walks only existing edges and uses every
/// edge of `graph` exactly once.
pub(super) fn euler_walk_is_valid(graph: &Graph, circuit: &[Vertex]) -> bool {
    if circuit.first() != circuit.last() || circuit.is_empty() {
        return false;
    }
    let key = |u: Vertex, v: Vertex| {
        if graph.is_directed() {
            (u, v)
        } else {
            (u.min(v), u.max(v))
        }
    };
    let mut remaining: HashMap<(Vertex, Vertex), usize> = HashMap::new();
    for (u, v) in graph.edges() {
        *remaining.entry(key(u, v)).or_default() += 1;
    }
    for pair in circuit.windows(2) {
        let [u, v] = pair else {
            return false;
        };
        match remaining.get_mut(&key(*u, *v)) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }
    remaining.values().all(|&count| count == 0)
}

/// Returns `true` when `target` is reachable from `source` along directed
/// edges.
pub(super) fn reachable(graph: &Graph, source: Vertex, target: Vertex) -> bool {
    let mut seen = vec![false; graph.vertex_count()];
    let mut stack = vec![source];
    while let Some(vertex) = stack.pop() {
        if vertex == target {
            return true;
        }
        match seen.get_mut(vertex) {
            Some(flag) if !*flag => *flag = true,
            _ => continue,
        }
        stack.extend_from_slice(graph.neighbors(vertex));
    }
    false
}
