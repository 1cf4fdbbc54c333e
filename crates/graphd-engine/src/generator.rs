//! Seeded random graph generation.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::error::EngineError;
use crate::graph::{Graph, Orientation};
use crate::request::EdgeList;

/// Sampling attempts allowed per requested edge before giving up.
const ATTEMPTS_PER_EDGE: usize = 20;

/// Produces random simple graphs from a seed.
#[derive(Debug, Clone, Copy)]
pub struct GraphGenerator {
    orientation: Orientation,
}

impl GraphGenerator {
    /// Creates a generator for graphs of the given orientation.
    #[must_use]
    pub const fn new(orientation: Orientation) -> Self {
        Self { orientation }
    }

    /// Samples up to `edges` distinct edges over `vertices` vertices.
    ///
    /// Endpoints are drawn uniformly; self-loops and duplicates are
    /// rejected and redrawn. Sampling stops after `edges * 20` draws, so a
    /// nearly saturated graph may come back with fewer edges than asked for.
    /// The same arguments always produce the same edge list.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Validation`] when `vertices` is outside
    /// `1..=Graph::MAX_VERTICES` or `edges` exceeds [`Graph::max_edges`].
    pub fn random(&self, vertices: usize, edges: usize, seed: u64) -> Result<EdgeList, EngineError> {
        let mut graph = Graph::new(vertices, self.orientation)?;
        let limit = Graph::max_edges(vertices, self.orientation);
        if edges > limit {
            return Err(EngineError::validation(format!(
                "edge count must be between 0 and {limit} for {vertices} vertices, got {edges}"
            )));
        }

        let mut rng = Pcg64::seed_from_u64(seed);
        let mut accepted = Vec::with_capacity(edges);
        let max_attempts = edges.saturating_mul(ATTEMPTS_PER_EDGE);
        let mut attempts = 0_usize;
        while accepted.len() < edges && attempts < max_attempts {
            attempts += 1;
            let u = rng.random_range(0..vertices);
            let v = rng.random_range(0..vertices);
            if u == v || graph.has_edge(u, v) {
                continue;
            }
            graph.add_edge(u, v)?;
            accepted.push((u, v));
        }
        Ok(EdgeList::new(vertices, accepted))
    }
}

impl Default for GraphGenerator {
    fn default() -> Self {
        Self::new(Orientation::Undirected)
    }
}
