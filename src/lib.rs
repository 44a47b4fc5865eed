//! Arena-backed Fibonacci heaps
//!
//! This crate provides a Fibonacci heap whose nodes live in a generational
//! arena instead of behind raw pointers:
//!
//! - **O(1) amortized** insert, decrease_key and union
//! - **O(log n) amortized** extract_min and remove
//! - Lazy consolidation of equal-degree trees and cascading cuts
//! - Empty heaps answer `None`, so every priority value is usable
//!
//! Two entry points are provided:
//!
//! - [`forest::FibonacciForest`]: one arena shared by many heaps, with a true
//!   O(1) [`union`](forest::FibonacciForest::union)
//! - [`fibonacci::FibonacciHeap`]: a self-contained heap implementing the
//!   [`Heap`] and [`DecreaseKeyHeap`] traits
//!
//! The [`workload`] module reproduces the classic benchmark: seeded random
//! keys, then timed insert, get-min, extract-min and union phases.
//!
//! # Example
//!
//! ```rust
//! use fibonacci_forest::fibonacci::FibonacciHeap;
//! use fibonacci_forest::{DecreaseKeyHeap, Heap};
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.push_with_handle(5, "item1");
//! heap.push(3, "item2");
//! heap.decrease_key(&handle1, 1).unwrap();
//! assert_eq!(heap.peek(), Some((&1, &"item1")));
//! ```

pub mod fibonacci;
pub mod forest;
mod heap_ids;
pub mod ring;
pub mod storage;
pub mod traits;
pub mod workload;

// Re-export the main traits for convenience
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
