//! Arena storage for heap nodes
//!
//! Nodes live in a [`slotmap::SlotMap`] and are addressed by [`NodeKey`], a
//! generational key. Links between nodes (parent, child, siblings) are plain
//! keys, so restructuring a tree is a matter of rewriting keys inside the arena
//! rather than juggling owning pointers.
//!
//! # Characteristics
//! - Contiguous memory allocation (better cache locality than one box per node)
//! - Generational keys detect stale references: a key to a removed node never
//!   resolves, even after its slot is reused
//! - Removal is explicit; nothing is freed behind the heap's back
//!
//! Indexing with a key that does not resolve panics. Heap code only indexes
//! with keys it reached by following links, which are live by construction;
//! keys that come from callers go through [`NodeArena::get`] first.

use slotmap::{new_key_type, SlotMap};
use std::ops::{Index, IndexMut};

new_key_type! {
    /// Generational key addressing a node in a [`NodeArena`]
    pub struct NodeKey;
}

/// Generational arena owning every node of a forest
#[derive(Debug, Clone)]
pub struct NodeArena<N> {
    nodes: SlotMap<NodeKey, N>,
}

impl<N> Default for NodeArena<N> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }
}

impl<N> NodeArena<N> {
    /// Creates an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` nodes
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Inserts a node built from its own key.
    ///
    /// Used to create self-referential nodes such as singleton rings.
    pub fn insert_with_key<F>(&mut self, build: F) -> NodeKey
    where
        F: FnOnce(NodeKey) -> N,
    {
        self.nodes.insert_with_key(build)
    }

    /// Removes a node, returning it if the key was live
    pub fn remove(&mut self, key: NodeKey) -> Option<N> {
        self.nodes.remove(key)
    }

    pub fn get(&self, key: NodeKey) -> Option<&N> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }
}

impl<N> Index<NodeKey> for NodeArena<N> {
    type Output = N;

    #[inline]
    fn index(&self, key: NodeKey) -> &N {
        &self.nodes[key]
    }
}

impl<N> IndexMut<NodeKey> for NodeArena<N> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut N {
        &mut self.nodes[key]
    }
}
