//! Priority queue traits implemented by [`FibonacciHeap`](crate::fibonacci::FibonacciHeap)
//!
//! - [`Heap`]: min-heap of `(priority, item)` pairs with push/peek/pop/merge
//! - [`DecreaseKeyHeap`]: adds handles and `decrease_key`
//!
//! An empty heap answers `None`; no priority value is reserved.

use std::fmt::Debug;
use std::hash::Hash;
use thiserror::Error;

/// Error for handle-based operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    #[error("new priority is not less than current priority")]
    PriorityNotDecreased,
    /// The element was extracted, removed or cleared, or is not in this heap
    #[error("handle does not refer to an element of this heap")]
    InvalidHandle,
}

/// Small copyable reference to one stored element
pub trait Handle: Copy + Eq + Hash + Debug {}

/// Min-heap of `(priority, item)` pairs
///
/// ```rust
/// use fibonacci_forest::Heap;
/// use fibonacci_forest::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    fn new() -> Self;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    /// O(1)
    fn push(&mut self, priority: P, item: T);

    /// Smallest priority and its item. O(1)
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes the smallest priority. Among equal priorities the order is
    /// unspecified. O(log n) amortized
    fn pop(&mut self) -> Option<(P, T)>;

    /// Moves every element of `other` into `self`
    fn merge(&mut self, other: Self);
}

/// Heap whose elements can be lowered in place through handles
///
/// ```rust
/// use fibonacci_forest::{DecreaseKeyHeap, Heap};
/// use fibonacci_forest::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    type Handle: Handle;

    /// Like [`Heap::push`], returning a handle to the new element
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority behind `handle`. O(1) amortized
    ///
    /// # Errors
    /// - [`HeapError::InvalidHandle`] if the element is no longer in this heap
    /// - [`HeapError::PriorityNotDecreased`] unless `new_priority` is strictly smaller
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;
}
