use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use crate::algorithm::{Algorithm, AlgorithmKind, Answer, Requirement};
use crate::error::EngineError;
use crate::graph::{Graph, Vertex};
use crate::union_find::DisjointSet;

/// Seed used when none is configured.
pub const DEFAULT_WEIGHT_SEED: u64 = 42;

const MIN_WEIGHT: u64 = 1;
const MAX_WEIGHT: u64 = 10;

/// Undirected edge with its generated weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WeightedEdge {
    /// Edge weight in `[1, 10]`.
    pub weight: u64,
    /// Lower endpoint.
    pub u: Vertex,
    /// Higher endpoint.
    pub v: Vertex,
}

/// Assigns reproducible weights to every edge of `graph`.
///
/// Weights are drawn in [`Graph::edges`] order from a PCG generator seeded
/// with `seed`, so the same graph and seed always yield the same weights.
#[must_use]
pub fn seeded_weights(graph: &Graph, seed: u64) -> Vec<WeightedEdge> {
    let mut rng = Pcg64::seed_from_u64(seed);
    graph
        .edges()
        .into_iter()
        .map(|(u, v)| WeightedEdge {
            weight: rng.random_range(MIN_WEIGHT..=MAX_WEIGHT),
            u,
            v,
        })
        .collect()
}

/// Minimum spanning tree weight using Kruskal's algorithm over seeded
/// pseudo-random edge weights.
#[derive(Debug, Clone, Copy)]
pub struct MinimumSpanningTree {
    seed: u64,
}

impl MinimumSpanningTree {
    /// Creates the strategy with a fixed weight seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed used for edge weights.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for MinimumSpanningTree {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_SEED)
    }
}

impl Algorithm for MinimumSpanningTree {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Mst
    }

    fn description(&self) -> &'static str {
        "Minimum spanning tree weight (Kruskal, seeded weights 1-10)"
    }

    fn requirement(&self) -> Requirement {
        Requirement::Undirected
    }

    fn solve(&self, graph: &Graph) -> Result<Answer, EngineError> {
        if !graph.has_edges() {
            return Ok(Answer::EmptySpanningTree);
        }
        if !graph.is_connected() {
            return Ok(Answer::NoSpanningTree);
        }

        let mut edges = seeded_weights(graph, self.seed);
        edges.sort_unstable();

        let target = graph.vertex_count().saturating_sub(1);
        let mut sets = DisjointSet::new(graph.vertex_count());
        let mut weight = 0_u64;
        let mut used = 0_usize;
        for edge in edges {
            if used == target {
                break;
            }
            if sets.union(edge.u, edge.v) {
                weight = weight.saturating_add(edge.weight);
                used += 1;
            }
        }
        Ok(Answer::SpanningTree {
            weight,
            edges: used,
        })
    }
}
