//! Deferred-task queue ordered by due time.
//!
//! Entries are stored in a min-heap keyed by `(due, insertion_order)`.
//! Earlier due times are popped first; ties are broken by insertion order
//! (FIFO).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

#[derive(Debug)]
struct Entry<E> {
    event: E,
    due: u64,
    /// Monotonically increasing counter used to break ties.
    seq: u64,
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Wrapped in Reverse for the BinaryHeap, so this is the natural
        // order: earlier due first, then earlier insertion.
        self.due
            .cmp(&other.due)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// A queue of events due at given times, in milliseconds.
///
/// Events with an earlier due time are dequeued first. Among events due at
/// the same time, those pushed earlier are dequeued first.
#[derive(Debug)]
pub struct EventQueue<E> {
    heap: BinaryHeap<Reverse<Entry<E>>>,
    seq: u64,
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Schedule `event` at `due`.
    pub fn push(&mut self, event: E, due: u64) {
        let seq = self.seq;
        self.seq += 1;
        self.heap.push(Reverse(Entry { event, due, seq }));
    }

    /// Pop the earliest event regardless of its due time.
    pub fn pop(&mut self) -> Option<(E, u64)> {
        self.heap
            .pop()
            .map(|Reverse(entry)| (entry.event, entry.due))
    }

    /// Pop the earliest event if it is due at or before `now`.
    pub fn pop_due(&mut self, now: u64) -> Option<(E, u64)> {
        if self.next_due()? > now {
            return None;
        }
        self.pop()
    }

    /// Due time of the earliest event.
    pub fn next_due(&self) -> Option<u64> {
        self.heap.peek().map(|Reverse(entry)| entry.due)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earliest_first() {
        let mut q = EventQueue::new();
        q.push("a", 30);
        q.push("b", 10);
        q.push("c", 20);

        assert_eq!(q.pop(), Some(("b", 10)));
        assert_eq!(q.pop(), Some(("c", 20)));
        assert_eq!(q.pop(), Some(("a", 30)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn fifo_at_same_time() {
        let mut q = EventQueue::new();
        q.push("first", 5);
        q.push("second", 5);
        q.push("third", 5);

        assert_eq!(q.pop().map(|e| e.0), Some("first"));
        assert_eq!(q.pop().map(|e| e.0), Some("second"));
        assert_eq!(q.pop().map(|e| e.0), Some("third"));
    }

    #[test]
    fn pop_due_respects_now() {
        let mut q = EventQueue::new();
        q.push(1, 0);
        q.push(2, 75);
        assert_eq!(q.next_due(), Some(0));
        assert_eq!(q.pop_due(10), Some((1, 0)));
        assert_eq!(q.pop_due(10), None);
        assert_eq!(q.len(), 1);
        assert_eq!(q.pop_due(75), Some((2, 75)));
        assert!(q.is_empty());
    }
}
