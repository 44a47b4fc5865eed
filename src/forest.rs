//! Fibonacci heaps sharing one node arena
//!
//! A Fibonacci heap is a collection of heap-ordered trees whose roots form a
//! circular doubly linked list, with a pointer to the minimal root. It offers:
//! - O(1) amortized insert, decrease_key and union
//! - O(log n) amortized extract_min
//!
//! [`FibonacciForest`] owns the nodes of any number of heaps in a single
//! generational arena. Each heap is described by a small [`HeapRoot`] value
//! (minimum pointer and length). Because all heaps of a forest live in the same
//! arena, [`FibonacciForest::union`] splices two root rings by rewriting four
//! links and never copies a node.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_forest::forest::FibonacciForest;
//!
//! let mut forest = FibonacciForest::new();
//! let mut a = forest.new_heap();
//! let mut b = forest.new_heap();
//!
//! forest.insert(&mut a, 7, "seven");
//! let handle = forest.insert(&mut b, 9, "nine");
//! forest.decrease_key(&mut b, &handle, 1).unwrap();
//!
//! let mut merged = forest.union(a, b);
//! assert_eq!(forest.extract_min(&mut merged), Some((1, "nine")));
//! assert_eq!(forest.extract_min(&mut merged), Some((7, "seven")));
//! assert_eq!(forest.extract_min(&mut merged), None);
//! ```

use crate::heap_ids::{HeapId, HeapIds};
use crate::ring::{self, RingLinks};
use crate::storage::{NodeArena, NodeKey};
use crate::traits::{Handle, HeapError};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, trace};

static NEXT_FOREST_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a forest, stamped on every heap root and handle it hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ForestId(u64);

impl ForestId {
    fn fresh() -> Self {
        ForestId(NEXT_FOREST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an element stored in a [`FibonacciForest`]
///
/// Handles are generation-checked: once the element is extracted, removed or
/// cleared, every operation taking the handle reports
/// [`HeapError::InvalidHandle`] instead of touching a reused slot. The same
/// error is reported when the handle is passed along with a heap that does not
/// contain its element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FibonacciHandle {
    key: NodeKey,
    forest: ForestId,
}

impl Handle for FibonacciHandle {}

/// One heap inside a forest: its minimum root and element count
///
/// A `HeapRoot` is not `Clone`. Operations that restructure a heap take it by
/// `&mut`, and [`FibonacciForest::union`] consumes both inputs.
#[derive(Debug)]
pub struct HeapRoot {
    min: Option<NodeKey>,
    len: usize,
    id: HeapId,
    forest: ForestId,
}

impl HeapRoot {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }
}

#[derive(Debug)]
struct Node<T, P> {
    item: T,
    priority: P,
    parent: Option<NodeKey>,
    child: Option<NodeKey>,
    left: NodeKey,
    right: NodeKey,
    degree: usize,
    marked: bool,
    /// Heap the node was inserted into; unions merge ids in [`HeapIds`]
    heap: HeapId,
}

impl<T, P> RingLinks for Node<T, P> {
    #[inline]
    fn left(&self) -> NodeKey {
        self.left
    }

    #[inline]
    fn right(&self) -> NodeKey {
        self.right
    }

    #[inline]
    fn set_left(&mut self, key: NodeKey) {
        self.left = key;
    }

    #[inline]
    fn set_right(&mut self, key: NodeKey) {
        self.right = key;
    }
}

/// Structural property found broken by [`FibonacciForest::check_invariants`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("heap root belongs to a different forest")]
    ForeignHeap,
    #[error("node {0:?} is reachable from a heap it does not belong to")]
    ForeignNode(NodeKey),
    #[error("link to {0:?} does not resolve to a live node")]
    DanglingLink(NodeKey),
    #[error("sibling links around {0:?} are inconsistent")]
    BrokenRing(NodeKey),
    #[error("root {0:?} has a parent")]
    RootHasParent(NodeKey),
    #[error("root {0:?} is marked")]
    MarkedRoot(NodeKey),
    #[error("child {child:?} does not point back to its parent {parent:?}")]
    WrongParent { parent: NodeKey, child: NodeKey },
    #[error("child {child:?} has a smaller priority than its parent {parent:?}")]
    HeapOrder { parent: NodeKey, child: NodeKey },
    #[error("node {node:?} records degree {recorded} but has {actual} children")]
    DegreeMismatch {
        node: NodeKey,
        recorded: usize,
        actual: usize,
    },
    #[error("min pointer does not reference a root with minimal priority")]
    MinNotMinimal,
    #[error("heap records {recorded} elements but {actual} are reachable")]
    LenMismatch { recorded: usize, actual: usize },
}

/// Arena of Fibonacci heap nodes shared by any number of heaps
#[derive(Debug)]
pub struct FibonacciForest<T, P> {
    nodes: NodeArena<Node<T, P>>,
    heaps: HeapIds,
    id: ForestId,
}

impl<T, P: Ord> Default for FibonacciForest<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Slots needed by the degree table for a heap of `len` elements:
/// `floor(log2(len)) + 2`. The table still grows on demand, since cuts can
/// leave a tree whose degree exceeds `log2` of its size.
#[inline]
fn degree_bound(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize + 1
}

impl<T, P: Ord> FibonacciForest<T, P> {
    pub fn new() -> Self {
        Self {
            nodes: NodeArena::new(),
            heaps: HeapIds::new(),
            id: ForestId::fresh(),
        }
    }

    /// Creates a forest with room for `capacity` nodes before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodeArena::with_capacity(capacity),
            heaps: HeapIds::new(),
            id: ForestId::fresh(),
        }
    }

    /// Creates an empty heap stored in this forest
    pub fn new_heap(&mut self) -> HeapRoot {
        HeapRoot {
            min: None,
            len: 0,
            id: self.heaps.fresh(),
            forest: self.id,
        }
    }

    /// Number of live nodes across every heap of the forest
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn assert_owns(&self, heap: &HeapRoot) {
        assert!(
            heap.forest == self.id,
            "heap root belongs to a different forest"
        );
    }

    /// Resolves a handle to a live node of `heap`
    fn resolve(
        &mut self,
        heap: &HeapRoot,
        handle: &FibonacciHandle,
    ) -> Result<NodeKey, HeapError> {
        if handle.forest != self.id {
            return Err(HeapError::InvalidHandle);
        }
        let owner = self
            .nodes
            .get(handle.key)
            .ok_or(HeapError::InvalidHandle)?
            .heap;
        if self.heaps.same(owner, heap.id) {
            Ok(handle.key)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    fn create_node(&mut self, heap: HeapId, priority: P, item: T) -> NodeKey {
        self.nodes.insert_with_key(|key| Node {
            item,
            priority,
            parent: None,
            child: None,
            left: key,
            right: key,
            degree: 0,
            marked: false,
            heap,
        })
    }

    /// Splices a singleton into the root ring next to the minimum.
    /// Does not compare priorities; see [`Self::update_min`].
    fn add_root(&mut self, heap: &mut HeapRoot, key: NodeKey) {
        match heap.min {
            Some(min) => ring::insert_after(&mut self.nodes, min, key),
            None => heap.min = Some(key),
        }
    }

    fn update_min(&self, heap: &mut HeapRoot, key: NodeKey) {
        match heap.min {
            Some(min) if self.nodes[key].priority < self.nodes[min].priority => {
                heap.min = Some(key)
            }
            None => heap.min = Some(key),
            _ => {}
        }
    }

    /// Inserts an element, returning a handle usable with
    /// [`Self::decrease_key`] and [`Self::remove`].
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, heap: &mut HeapRoot, priority: P, item: T) -> FibonacciHandle {
        self.assert_owns(heap);
        let key = self.create_node(heap.id, priority, item);
        self.add_root(heap, key);
        self.update_min(heap, key);
        heap.len += 1;
        FibonacciHandle {
            key,
            forest: self.id,
        }
    }

    /// Returns the minimum priority and its item, or `None` if the heap is empty
    pub fn peek(&self, heap: &HeapRoot) -> Option<(&P, &T)> {
        self.assert_owns(heap);
        heap.min.map(|min| {
            let node = &self.nodes[min];
            (&node.priority, &node.item)
        })
    }

    /// Removes and returns the minimum, or `None` if the heap is empty
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self, heap: &mut HeapRoot) -> Option<(P, T)> {
        self.assert_owns(heap);
        let min = heap.min?;

        // Promote the whole child ring to the root ring in one splice
        if let Some(child) = self.nodes[min].child.take() {
            for key in ring::walk(&self.nodes, child) {
                let node = &mut self.nodes[key];
                node.parent = None;
                node.marked = false;
            }
            ring::splice(&mut self.nodes, Some(min), Some(child));
            self.nodes[min].degree = 0;
        }

        match ring::unlink(&mut self.nodes, min) {
            None => heap.min = None,
            Some(next) => {
                heap.min = Some(next);
                self.consolidate(heap, next);
            }
        }

        heap.len -= 1;
        let node = self.nodes.remove(min)?;
        Some((node.priority, node.item))
    }

    /// Links roots of equal degree until every degree occurs at most once,
    /// then rebuilds the root ring and recomputes the minimum.
    fn consolidate(&mut self, heap: &mut HeapRoot, start: NodeKey) {
        let roots = ring::walk(&self.nodes, start);
        let mut table: Vec<Option<NodeKey>> = vec![None; degree_bound(heap.len)];

        for &root in &roots {
            let mut x = root;
            let mut degree = self.nodes[x].degree;
            loop {
                if degree >= table.len() {
                    table.resize(degree + 1, None);
                }
                let Some(mut y) = table[degree].take() else {
                    break;
                };
                // Ties keep x on top
                if self.nodes[y].priority < self.nodes[x].priority {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                degree += 1;
            }
            table[degree] = Some(x);
        }

        heap.min = None;
        let mut trees = 0usize;
        for root in table.into_iter().flatten() {
            ring::make_singleton(&mut self.nodes, root);
            self.add_root(heap, root);
            self.update_min(heap, root);
            trees += 1;
        }
        trace!(roots = roots.len(), trees, "consolidated root list");
    }

    /// Makes `child` a child of `parent`.
    ///
    /// The caller guarantees `child.priority >= parent.priority`.
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        ring::unlink(&mut self.nodes, child);
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.marked = false;
        }

        match self.nodes[parent].child {
            Some(first) => ring::insert_after(&mut self.nodes, first, child),
            None => self.nodes[parent].child = Some(child),
        }
        self.nodes[parent].degree += 1;
    }

    /// Detaches `node` from `parent` and moves it to the root ring
    fn cut(&mut self, heap: &mut HeapRoot, node: NodeKey, parent: NodeKey) {
        let sibling = ring::unlink(&mut self.nodes, node);
        {
            let p = &mut self.nodes[parent];
            if p.child == Some(node) {
                p.child = sibling;
            }
            p.degree -= 1;
        }
        {
            let n = &mut self.nodes[node];
            n.parent = None;
            n.marked = false;
        }
        self.add_root(heap, node);
    }

    /// Walks up from `node`: an unmarked non-root gets marked and the walk
    /// stops, a marked one is cut and the walk continues with its parent.
    fn cascading_cut(&mut self, heap: &mut HeapRoot, mut node: NodeKey) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                return;
            }
            self.cut(heap, node, parent);
            node = parent;
        }
    }

    /// Lowers the priority of the element behind `handle`
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the element is gone or not part of `heap`
    /// - [`HeapError::PriorityNotDecreased`] if `new_priority` is not smaller
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(
        &mut self,
        heap: &mut HeapRoot,
        handle: &FibonacciHandle,
        new_priority: P,
    ) -> Result<(), HeapError> {
        self.assert_owns(heap);
        let key = self.resolve(heap, handle)?;

        let parent = {
            let node = &mut self.nodes[key];
            if new_priority >= node.priority {
                return Err(HeapError::PriorityNotDecreased);
            }
            node.priority = new_priority;
            node.parent
        };

        if let Some(parent) = parent {
            if self.nodes[key].priority < self.nodes[parent].priority {
                self.cut(heap, key, parent);
                self.cascading_cut(heap, parent);
            }
        }
        self.update_min(heap, key);
        Ok(())
    }

    /// Removes the element behind `handle` regardless of its priority
    ///
    /// # Errors
    /// [`HeapError::InvalidHandle`] if the element is gone or not part of `heap`
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn remove(
        &mut self,
        heap: &mut HeapRoot,
        handle: &FibonacciHandle,
    ) -> Result<(P, T), HeapError> {
        self.assert_owns(heap);
        let key = self.resolve(heap, handle)?;

        if let Some(parent) = self.nodes[key].parent {
            self.cut(heap, key, parent);
            self.cascading_cut(heap, parent);
        }
        // Treat the node as the minimum; consolidation recomputes the real one
        heap.min = Some(key);
        self.extract_min(heap).ok_or(HeapError::InvalidHandle)
    }

    /// Looks up the priority and item behind a handle
    pub fn get(&self, handle: &FibonacciHandle) -> Option<(&P, &T)> {
        if handle.forest != self.id {
            return None;
        }
        self.nodes
            .get(handle.key)
            .map(|node| (&node.priority, &node.item))
    }

    /// Returns true while the element behind `handle` is still stored in
    /// some heap of this forest
    pub fn contains(&self, handle: &FibonacciHandle) -> bool {
        handle.forest == self.id && self.nodes.contains(handle.key)
    }

    /// Returns true if the element behind `handle` is stored in `heap`
    pub fn heap_contains(&mut self, heap: &HeapRoot, handle: &FibonacciHandle) -> bool {
        self.assert_owns(heap);
        self.resolve(heap, handle).is_ok()
    }

    /// Joins two heaps of this forest into one
    ///
    /// The root rings are spliced by relinking four sibling links; no node is
    /// copied, and the two heap ids are merged in near-constant time. An empty
    /// input yields the other heap unchanged.
    ///
    /// # Panics
    /// If either heap belongs to another forest.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn union(&mut self, a: HeapRoot, b: HeapRoot) -> HeapRoot {
        self.assert_owns(&a);
        self.assert_owns(&b);

        let (a_min, b_min) = match (a.min, b.min) {
            (None, _) => return b,
            (_, None) => return a,
            (Some(a_min), Some(b_min)) => (a_min, b_min),
        };

        ring::splice(&mut self.nodes, Some(a_min), Some(b_min));
        let min = if self.nodes[b_min].priority < self.nodes[a_min].priority {
            b_min
        } else {
            a_min
        };

        HeapRoot {
            min: Some(min),
            len: a.len + b.len,
            id: self.heaps.union(a.id, b.id),
            forest: self.id,
        }
    }

    /// Frees every node of `heap` and leaves it empty
    ///
    /// # Time Complexity
    /// O(n)
    pub fn clear(&mut self, heap: &mut HeapRoot) {
        self.assert_owns(heap);
        let Some(min) = heap.min.take() else {
            heap.len = 0;
            return;
        };

        // Each ring is walked once from a single entry point
        let mut pending = vec![min];
        let mut freed = 0usize;
        while let Some(start) = pending.pop() {
            for key in ring::walk(&self.nodes, start) {
                if let Some(node) = self.nodes.remove(key) {
                    if let Some(child) = node.child {
                        pending.push(child);
                    }
                    freed += 1;
                }
            }
        }

        debug_assert_eq!(freed, heap.len, "clear freed an unexpected number of nodes");
        debug!(freed, "cleared heap");
        heap.len = 0;
    }

    /// Moves `heap` out of `source` and into this forest
    ///
    /// Handles into the moved elements become invalid. The returned root can
    /// be [`union`](Self::union)ed with heaps of this forest.
    ///
    /// # Panics
    /// If `heap` does not belong to `source`.
    ///
    /// # Time Complexity
    /// O(m) in the size of the moved heap
    pub fn transplant(&mut self, source: &mut FibonacciForest<T, P>, heap: HeapRoot) -> HeapRoot {
        source.assert_owns(&heap);
        let Some(min) = heap.min else {
            return self.new_heap();
        };

        let mut moved: FxHashMap<NodeKey, NodeKey> = FxHashMap::default();
        moved.reserve(heap.len);

        let mut pending = vec![min];
        while let Some(start) = pending.pop() {
            for old in ring::walk(&source.nodes, start) {
                if let Some(node) = source.nodes.remove(old) {
                    if let Some(child) = node.child {
                        pending.push(child);
                    }
                    let new = self.nodes.insert_with_key(|_| node);
                    moved.insert(old, new);
                }
            }
        }

        // Every link stays inside the moved trees
        let id = self.heaps.fresh();
        for &new in moved.values() {
            let node = &mut self.nodes[new];
            node.heap = id;
            node.left = moved[&node.left];
            node.right = moved[&node.right];
            node.parent = node.parent.map(|p| moved[&p]);
            node.child = node.child.map(|c| moved[&c]);
        }

        debug!(nodes = moved.len(), "transplanted heap");
        HeapRoot {
            min: Some(moved[&min]),
            len: heap.len,
            id,
            forest: self.id,
        }
    }

    /// Number of trees in the root ring
    pub fn root_count(&self, heap: &HeapRoot) -> usize {
        self.assert_owns(heap);
        heap.min.map_or(0, |min| ring::count(&self.nodes, min))
    }

    /// Degrees of the roots, in ring order starting at the minimum
    pub fn root_degrees(&self, heap: &HeapRoot) -> Vec<usize> {
        self.assert_owns(heap);
        heap.min.map_or_else(Vec::new, |min| {
            ring::walk(&self.nodes, min)
                .into_iter()
                .map(|key| self.nodes[key].degree)
                .collect()
        })
    }

    /// Verifies every structural invariant of `heap` by full traversal:
    /// ring consistency, parent links, heap order, degrees, unmarked roots,
    /// node ownership, minimality of the min pointer and the recorded length.
    pub fn check_invariants(&self, heap: &HeapRoot) -> Result<(), InvariantViolation> {
        if heap.forest != self.id {
            return Err(InvariantViolation::ForeignHeap);
        }
        let Some(min) = heap.min else {
            return match heap.len {
                0 => Ok(()),
                recorded => Err(InvariantViolation::LenMismatch {
                    recorded,
                    actual: 0,
                }),
            };
        };

        let owner = self.heaps.find_root(heap.id);
        let roots = self.checked_ring(min)?;
        let mut pending = Vec::with_capacity(roots.len());
        for &root in &roots {
            let node = &self.nodes[root];
            if node.parent.is_some() {
                return Err(InvariantViolation::RootHasParent(root));
            }
            if node.marked {
                return Err(InvariantViolation::MarkedRoot(root));
            }
            if node.priority < self.nodes[min].priority {
                return Err(InvariantViolation::MinNotMinimal);
            }
            pending.push(root);
        }

        let mut reachable = 0usize;
        while let Some(key) = pending.pop() {
            reachable += 1;
            if reachable > self.nodes.len() {
                // Some ring is reachable twice
                return Err(InvariantViolation::BrokenRing(key));
            }

            let node = &self.nodes[key];
            if self.heaps.find_root(node.heap) != owner {
                return Err(InvariantViolation::ForeignNode(key));
            }
            let actual = match node.child {
                None => 0,
                Some(child) => {
                    let children = self.checked_ring(child)?;
                    for &c in &children {
                        let child_node = &self.nodes[c];
                        if child_node.parent != Some(key) {
                            return Err(InvariantViolation::WrongParent { parent: key, child: c });
                        }
                        if child_node.priority < node.priority {
                            return Err(InvariantViolation::HeapOrder { parent: key, child: c });
                        }
                        pending.push(c);
                    }
                    children.len()
                }
            };
            if actual != node.degree {
                return Err(InvariantViolation::DegreeMismatch {
                    node: key,
                    recorded: node.degree,
                    actual,
                });
            }
        }

        if reachable != heap.len {
            return Err(InvariantViolation::LenMismatch {
                recorded: heap.len,
                actual: reachable,
            });
        }
        Ok(())
    }

    /// Ring walk that tolerates corruption: every link is resolved through
    /// the arena and the walk is bounded by the arena size.
    fn checked_ring(&self, start: NodeKey) -> Result<Vec<NodeKey>, InvariantViolation> {
        let limit = self.nodes.len();
        let mut members = Vec::new();
        let mut current = start;
        loop {
            let node = self
                .nodes
                .get(current)
                .ok_or(InvariantViolation::DanglingLink(current))?;
            let right = node.right;
            let right_node = self
                .nodes
                .get(right)
                .ok_or(InvariantViolation::DanglingLink(right))?;
            if right_node.left != current {
                return Err(InvariantViolation::BrokenRing(current));
            }

            members.push(current);
            if members.len() > limit {
                return Err(InvariantViolation::BrokenRing(start));
            }
            current = right;
            if current == start {
                return Ok(members);
            }
        }
    }
}
