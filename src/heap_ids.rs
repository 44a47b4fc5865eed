//! Heap identities inside a forest
//!
//! Each heap gets a [`HeapId`] when it is created, and each node records the id
//! of the heap it was inserted into. Union merges the sets of the two ids, so a
//! node belongs to a heap exactly when both ids share a representative.
//!
//! Path compression in [`HeapIds::find`] and union by rank in
//! [`HeapIds::union`] keep both operations amortized O(α(n)).

use std::cmp::Ordering;

/// Identity of one heap of a forest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapId(usize);

/// Disjoint sets of heap ids
#[derive(Debug, Clone, Default)]
pub struct HeapIds {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl HeapIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new id in a singleton set
    pub fn fresh(&mut self) -> HeapId {
        let id = self.parent.len();
        self.parent.push(id);
        self.rank.push(0);
        HeapId(id)
    }

    /// Representative of the set containing `id`, compressing the path to it
    pub fn find(&mut self, id: HeapId) -> HeapId {
        let root = self.find_root(id);
        let mut current = id.0;
        while current != root.0 {
            let next = self.parent[current];
            self.parent[current] = root.0;
            current = next;
        }
        root
    }

    /// Representative of the set containing `id`, without touching the sets
    pub fn find_root(&self, id: HeapId) -> HeapId {
        let mut current = id.0;
        while self.parent[current] != current {
            current = self.parent[current];
        }
        HeapId(current)
    }

    pub fn same(&mut self, a: HeapId, b: HeapId) -> bool {
        self.find(a) == self.find(b)
    }

    /// Merges the sets of `a` and `b`, returning the new representative
    pub fn union(&mut self, a: HeapId, b: HeapId) -> HeapId {
        let root_a = self.find(a).0;
        let root_b = self.find(b).0;
        if root_a == root_b {
            return HeapId(root_a);
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            Ordering::Less => {
                self.parent[root_a] = root_b;
                HeapId(root_b)
            }
            Ordering::Greater => {
                self.parent[root_b] = root_a;
                HeapId(root_a)
            }
            Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
                HeapId(root_a)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_ids_are_disjoint() {
        let mut ids = HeapIds::new();
        let a = ids.fresh();
        let b = ids.fresh();
        assert_ne!(a, b);
        assert!(!ids.same(a, b));
        assert!(ids.same(a, a));
    }

    #[test]
    fn test_union_is_transitive() {
        let mut ids = HeapIds::new();
        let a = ids.fresh();
        let b = ids.fresh();
        let c = ids.fresh();
        let d = ids.fresh();

        let ab = ids.union(a, b);
        assert!(ab == a || ab == b);
        ids.union(c, d);
        assert!(!ids.same(a, c));

        let all = ids.union(b, d);
        for id in [a, b, c, d] {
            assert_eq!(ids.find(id), all);
            assert_eq!(ids.find_root(id), all);
        }
        assert_eq!(ids.union(a, c), all);
    }

    #[test]
    fn test_long_chain_compresses() {
        let mut ids = HeapIds::new();
        let first = ids.fresh();
        let mut acc = first;
        for _ in 0..1000 {
            let next = ids.fresh();
            acc = ids.union(next, acc);
        }
        assert_eq!(ids.find(first), acc);
        assert_eq!(ids.find_root(HeapId(500)), acc);
    }
}
