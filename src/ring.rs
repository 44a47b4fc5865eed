//! Circular doubly-linked rings inside a [`NodeArena`]
//!
//! A ring has no head or tail: any member is an entry point, a lone node
//! points to itself in both directions, and two rings can be spliced into one
//! in O(1). The Fibonacci heap uses one ring for its roots and one ring per
//! parent for that parent's children.
//!
//! Every function here only rewrites `left`/`right` links. Parent and child
//! bookkeeping is left to the caller.

use crate::storage::{NodeArena, NodeKey};

/// Access to the sibling links of an arena node
pub trait RingLinks {
    fn left(&self) -> NodeKey;
    fn right(&self) -> NodeKey;
    fn set_left(&mut self, key: NodeKey);
    fn set_right(&mut self, key: NodeKey);
}

/// Turns `key` into a ring of one, discarding its old links.
///
/// Only valid when no other node still points at `key`.
#[inline]
pub fn make_singleton<N: RingLinks>(arena: &mut NodeArena<N>, key: NodeKey) {
    let node = &mut arena[key];
    node.set_left(key);
    node.set_right(key);
}

#[inline]
pub fn is_singleton<N: RingLinks>(arena: &NodeArena<N>, key: NodeKey) -> bool {
    arena[key].right() == key
}

/// Inserts the singleton `new` right after `at`.
#[inline]
pub fn insert_after<N: RingLinks>(arena: &mut NodeArena<N>, at: NodeKey, new: NodeKey) {
    debug_assert!(is_singleton(arena, new), "inserted node is still linked");

    let next = arena[at].right();
    arena[at].set_right(new);
    arena[new].set_left(at);
    arena[new].set_right(next);
    arena[next].set_left(new);
}

/// Removes `key` from its ring and leaves it as a singleton.
///
/// Returns a surviving member of the old ring, or `None` if `key` was alone.
#[inline]
pub fn unlink<N: RingLinks>(arena: &mut NodeArena<N>, key: NodeKey) -> Option<NodeKey> {
    let left = arena[key].left();
    let right = arena[key].right();
    if right == key {
        return None;
    }

    arena[left].set_right(right);
    arena[right].set_left(left);
    make_singleton(arena, key);
    Some(right)
}

/// Joins two disjoint rings into one.
///
/// Before:
///   Ring A: ... <-> a <-> a_right <-> ...
///   Ring B: ... <-> b_left <-> b <-> ...
///
/// After:
///   ... <-> a <-> b <-> ... <-> b_left <-> a_right <-> ...
///
/// Either side may be empty, in which case the other is returned unchanged.
#[inline]
pub fn splice<N: RingLinks>(
    arena: &mut NodeArena<N>,
    a: Option<NodeKey>,
    b: Option<NodeKey>,
) -> Option<NodeKey> {
    match (a, b) {
        (None, None) => None,
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (Some(a), Some(b)) => {
            let a_right = arena[a].right();
            let b_left = arena[b].left();

            arena[a].set_right(b);
            arena[b].set_left(a);
            arena[b_left].set_right(a_right);
            arena[a_right].set_left(b_left);

            Some(a)
        }
    }
}

/// Snapshot of the ring starting at `start`, walking rightwards.
pub fn walk<N: RingLinks>(arena: &NodeArena<N>, start: NodeKey) -> Vec<NodeKey> {
    let mut members = vec![start];
    let mut current = arena[start].right();
    while current != start {
        members.push(current);
        current = arena[current].right();
    }
    members
}

/// Number of members in the ring containing `start`. O(n).
pub fn count<N: RingLinks>(arena: &NodeArena<N>, start: NodeKey) -> usize {
    let mut count = 1;
    let mut current = arena[start].right();
    while current != start {
        count += 1;
        current = arena[current].right();
    }
    count
}
