//! Binary min-heap keyed by an `f64` priority.
//!
//! There is no decrease-key: callers push a fresh entry whenever they find
//! a better priority and discard stale entries when they come out.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use thiserror::Error;

/// Returned by [`MinHeap::extract_min`] on an empty heap. Callers are
/// expected to check [`MinHeap::is_empty`] first, so seeing this is a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("extract_min called on an empty queue")]
pub struct EmptyQueueError;

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    priority: f64,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority.total_cmp(&other.priority) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest priority first.
        other.priority.total_cmp(&self.priority)
    }
}

/// A min-priority queue. Ties come out in unspecified order.
#[derive(Debug, Clone)]
pub struct MinHeap<T> {
    heap: BinaryHeap<Entry<T>>,
}

impl<T> MinHeap<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Insert `item` with the given priority. O(log n).
    pub fn insert(&mut self, item: T, priority: f64) {
        self.heap.push(Entry { item, priority });
    }

    /// Remove and return the entry with the smallest priority. O(log n).
    pub fn extract_min(&mut self) -> Result<(T, f64), EmptyQueueError> {
        self.pop().ok_or(EmptyQueueError)
    }

    /// Option-returning form of [`extract_min`](Self::extract_min).
    pub fn pop(&mut self) -> Option<(T, f64)> {
        self.heap.pop().map(|e| (e.item, e.priority))
    }

    /// The smallest priority currently queued.
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.peek().map(|e| e.priority)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}
