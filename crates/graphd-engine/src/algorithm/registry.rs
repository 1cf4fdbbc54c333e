//! Lookup table from algorithm keys to strategies.

use std::str::FromStr;

use crate::algorithm::mst::DEFAULT_WEIGHT_SEED;
use crate::algorithm::{
    Algorithm, AlgorithmKind, EulerCircuit, HamiltonCircuit, MaxClique, MinimumSpanningTree,
    StronglyConnectedComponents,
};
use crate::error::EngineError;

/// Owns one boxed strategy per [`AlgorithmKind`], stored in suite order.
pub struct AlgorithmRegistry {
    strategies: Vec<Box<dyn Algorithm>>,
}

impl AlgorithmRegistry {
    /// Builds the registry with every supported algorithm. `mst_seed` feeds
    /// the spanning-tree edge weights.
    #[must_use]
    pub fn new(mst_seed: u64) -> Self {
        let strategies: Vec<Box<dyn Algorithm>> = AlgorithmKind::SUITE
            .iter()
            .map(|&kind| -> Box<dyn Algorithm> {
                match kind {
                    AlgorithmKind::Euler => Box::new(EulerCircuit),
                    AlgorithmKind::MaxClique => Box::new(MaxClique),
                    AlgorithmKind::Mst => Box::new(MinimumSpanningTree::new(mst_seed)),
                    AlgorithmKind::Hamilton => Box::new(HamiltonCircuit),
                    AlgorithmKind::Scc => Box::new(StronglyConnectedComponents),
                }
            })
            .collect();
        Self { strategies }
    }

    /// Returns the strategy for `kind`.
    #[must_use]
    pub fn get(&self, kind: AlgorithmKind) -> Option<&dyn Algorithm> {
        self.strategies
            .iter()
            .find(|strategy| strategy.kind() == kind)
            .map(|strategy| -> &dyn Algorithm { strategy.as_ref() })
    }

    /// Resolves a wire key such as `mst` to its strategy.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Parse`] for unknown keys.
    pub fn resolve(&self, key: &str) -> Result<&dyn Algorithm, EngineError> {
        AlgorithmKind::from_str(key)
            .ok()
            .and_then(|kind| self.get(kind))
            .ok_or_else(|| EngineError::parse(format!("unknown algorithm '{key}'")))
    }

    /// Iterates over every strategy in suite order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Algorithm> {
        self.strategies
            .iter()
            .map(|strategy| -> &dyn Algorithm { strategy.as_ref() })
    }

    /// Number of registered strategies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Returns `true` when no strategy is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_SEED)
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_list()
            .entries(self.iter().map(Algorithm::kind))
            .finish()
    }
}
