//! Min-priority queue yielding events in ascending timestamp order.
//!
//! The comparator lives here rather than on `TranslationEvent`: the record
//! stays a plain value and the queue owns the ordering. Ties among equal
//! timestamps come out in arbitrary order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use glossa_core::{Error, Result, TranslationEvent};

#[derive(Debug)]
struct MinByTimestamp(TranslationEvent);

impl PartialEq for MinByTimestamp {
    fn eq(&self, other: &Self) -> bool {
        self.0.timestamp == other.0.timestamp
    }
}

impl Eq for MinByTimestamp {}

impl PartialOrd for MinByTimestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MinByTimestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap pops its maximum; reversing yields the earliest event.
        other.0.timestamp.cmp(&self.0.timestamp)
    }
}

/// Priority queue over events, earliest timestamp first.
///
/// Insertion may interleave with extraction; the full dataset does not have
/// to be loaded before the first `extract_min`.
#[derive(Default, Debug)]
pub struct EventQueue {
    heap: BinaryHeap<MinByTimestamp>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn insert(&mut self, event: TranslationEvent) {
        self.heap.push(MinByTimestamp(event));
    }

    /// Removes and returns the earliest event; `EmptyCollection` if none remain.
    pub fn extract_min(&mut self) -> Result<TranslationEvent> {
        self.heap.pop().map(|e| e.0).ok_or(Error::EmptyCollection)
    }

    pub fn peek(&self) -> Option<&TranslationEvent> {
        self.heap.peek().map(|e| &e.0)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl FromIterator<TranslationEvent> for EventQueue {
    fn from_iter<I: IntoIterator<Item = TranslationEvent>>(iter: I) -> Self {
        let mut queue = EventQueue::new();
        for event in iter {
            queue.insert(event);
        }
        queue
    }
}
