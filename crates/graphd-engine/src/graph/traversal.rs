//! Connectivity queries.

use super::{Graph, Vertex};

impl Graph {
    /// Returns `true` when every vertex with at least one incident edge is
    /// reachable from every other such vertex.
    ///
    /// Isolated vertices are ignored, so an edgeless graph is vacuously
    /// connected. Directed graphs are traversed through their underlying
    /// undirected graph, which makes this a weak-connectivity test.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        let transposed = self.is_directed().then(|| self.transpose());
        let incoming = transposed.as_ref();
        let active = |vertex: Vertex| {
            self.degree(vertex) > 0 || incoming.is_some_and(|reverse| reverse.degree(vertex) > 0)
        };

        let Some(start) = (0..self.vertex_count()).find(|&vertex| active(vertex)) else {
            return true;
        };

        let mut visited = vec![false; self.vertex_count()];
        if let Some(seen) = visited.get_mut(start) {
            *seen = true;
        }
        let mut stack = vec![start];
        while let Some(vertex) = stack.pop() {
            let reverse = incoming.map_or(&[][..], |graph| graph.neighbors(vertex));
            for &next in self.neighbors(vertex).iter().chain(reverse) {
                if let Some(seen) = visited.get_mut(next)
                    && !*seen
                {
                    *seen = true;
                    stack.push(next);
                }
            }
        }

        (0..self.vertex_count())
            .filter(|&vertex| active(vertex))
            .all(|vertex| visited.get(vertex).copied().unwrap_or(false))
    }

    /// First vertex with a positive out-degree, if any.
    pub(crate) fn first_active_vertex(&self) -> Option<Vertex> {
        (0..self.vertex_count()).find(|&vertex| self.degree(vertex) > 0)
    }
}
