//! Disjoint-set forest used by Kruskal's algorithm.

/// Union-find over `0..len` with union by rank and path compression.
#[derive(Debug, Clone)]
pub(crate) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    fn parent_of(&self, element: usize) -> usize {
        self.parent.get(element).copied().unwrap_or(element)
    }

    /// Returns the representative of `element`, compressing the path walked.
    pub(crate) fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while self.parent_of(root) != root {
            root = self.parent_of(root);
        }

        let mut current = element;
        while current != root {
            let next = self.parent_of(current);
            if let Some(slot) = self.parent.get_mut(current) {
                *slot = root;
            }
            current = next;
        }
        root
    }

    /// Merges the sets containing `a` and `b`. Returns `false` when they were
    /// already joined.
    pub(crate) fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        let rank_a = self.rank.get(root_a).copied().unwrap_or(0);
        let rank_b = self.rank.get(root_b).copied().unwrap_or(0);
        let (child, parent) = if rank_a < rank_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        if let Some(slot) = self.parent.get_mut(child) {
            *slot = parent;
        }
        if rank_a == rank_b
            && let Some(rank) = self.rank.get_mut(parent)
        {
            *rank = rank.saturating_add(1);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::DisjointSet;

    #[test]
    fn union_joins_sets_once() {
        let mut sets = DisjointSet::new(4);
        assert!(sets.union(0, 1));
        assert!(sets.union(2, 3));
        assert!(!sets.union(1, 0));
        assert_ne!(sets.find(0), sets.find(2));
        assert!(sets.union(1, 3));
        assert_eq!(sets.find(0), sets.find(2));
    }

    #[test]
    fn long_chains_collapse_to_one_root() {
        let mut sets = DisjointSet::new(64);
        for element in 1..64 {
            sets.union(element - 1, element);
        }
        let root = sets.find(63);
        assert!((0..64).all(|element| sets.find(element) == root));
    }
}
