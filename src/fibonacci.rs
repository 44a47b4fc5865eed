//! Fibonacci Heap implementation
//!
//! [`FibonacciHeap`] is a single heap that owns its own
//! [`FibonacciForest`](crate::forest::FibonacciForest). It implements the
//! crate's [`Heap`] and [`DecreaseKeyHeap`] traits, so it can be used anywhere
//! a plain priority queue is expected.
//!
//! Since each `FibonacciHeap` has a private arena, [`Heap::merge`] first moves
//! the other heap's nodes into this arena (O(m)) and then splices the root
//! rings in O(1). Code that merges often should keep its heaps in one shared
//! forest and call [`FibonacciForest::union`](crate::forest::FibonacciForest::union)
//! directly.

use crate::forest::{FibonacciForest, FibonacciHandle, HeapRoot, InvariantViolation};
use crate::traits::{DecreaseKeyHeap, Heap, HeapError};

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use fibonacci_forest::fibonacci::FibonacciHeap;
/// use fibonacci_forest::{DecreaseKeyHeap, Heap};
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(5, "item");
/// heap.decrease_key(&handle, 1).unwrap();
/// assert_eq!(heap.peek(), Some((&1, &"item")));
/// ```
#[derive(Debug)]
pub struct FibonacciHeap<T, P: Ord> {
    forest: FibonacciForest<T, P>,
    root: HeapRoot,
}

impl<T, P: Ord> Default for FibonacciHeap<T, P> {
    fn default() -> Self {
        <Self as Heap<T, P>>::new()
    }
}

impl<T, P: Ord> Heap<T, P> for FibonacciHeap<T, P> {
    fn new() -> Self {
        let mut forest = FibonacciForest::new();
        let root = forest.new_heap();
        Self { forest, root }
    }

    fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    fn len(&self) -> usize {
        self.root.len()
    }

    fn push(&mut self, priority: P, item: T) {
        let _ = self.push_with_handle(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.forest.peek(&self.root)
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.forest.extract_min(&mut self.root)
    }

    fn merge(&mut self, other: Self) {
        if other.is_empty() {
            return;
        }

        if self.is_empty() {
            *self = other;
            return;
        }

        let FibonacciHeap {
            forest: mut other_forest,
            root: other_root,
        } = other;
        let moved = self.forest.transplant(&mut other_forest, other_root);
        let mine = std::mem::replace(&mut self.root, self.forest.new_heap());
        self.root = self.forest.union(mine, moved);
    }
}

impl<T, P: Ord> DecreaseKeyHeap<T, P> for FibonacciHeap<T, P> {
    type Handle = FibonacciHandle;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.forest.insert(&mut self.root, priority, item)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        self.forest.decrease_key(&mut self.root, handle, new_priority)
    }
}

impl<T, P: Ord> FibonacciHeap<T, P> {
    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        let mut forest = FibonacciForest::with_capacity(capacity);
        let root = forest.new_heap();
        Self { forest, root }
    }

    /// Removes an arbitrary element by handle
    pub fn remove(&mut self, handle: &FibonacciHandle) -> Result<(P, T), HeapError> {
        self.forest.remove(&mut self.root, handle)
    }

    /// Priority and item behind a handle, if the element is still stored
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&P, &T)> {
        self.forest.get(handle)
    }

    /// Drops every element; the heap stays usable
    pub fn clear(&mut self) {
        self.forest.clear(&mut self.root);
    }

    /// Number of trees currently in the root list
    pub fn root_count(&self) -> usize {
        self.forest.root_count(&self.root)
    }

    /// Full structural check; see [`FibonacciForest::check_invariants`]
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.forest.check_invariants(&self.root)
    }

    /// Pops every element, returning them in ascending priority order
    pub fn into_sorted_vec(mut self) -> Vec<(P, T)> {
        let mut sorted = Vec::with_capacity(self.len());
        while let Some(entry) = self.pop() {
            sorted.push(entry);
        }
        sorted
    }
}
