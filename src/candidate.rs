//! Per-source merge candidates.
//!
//! A [`Candidate`] is the smallest element of one source that has not yet
//! been emitted. The merge keeps at most one live candidate per source.

use std::cmp::Ordering;

/// The smallest unconsumed element of a single source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate<T> {
    /// Element payload, used for ordering.
    pub value: T,
    /// Index of the source this element came from, in `[0, K)`.
    pub source_id: usize,
    /// Zero-based position of `value` within its source.
    pub cursor: usize,
}

impl<T> Candidate<T> {
    #[inline]
    pub fn new(value: T, source_id: usize, cursor: usize) -> Self {
        Self {
            value,
            source_id,
            cursor,
        }
    }

    /// Position of the element that follows this one in the same source.
    #[inline]
    pub fn next_cursor(&self) -> usize {
        self.cursor + 1
    }
}

impl<T: Ord> Candidate<T> {
    /// Merge order: value ascending, then source, then cursor.
    ///
    /// This is a total order, so two live candidates never compare equal
    /// (they always differ in `source_id`).
    #[inline]
    pub fn merge_order(&self, other: &Self) -> Ordering {
        self.value
            .cmp(&other.value)
            .then(self.source_id.cmp(&other.source_id))
            .then(self.cursor.cmp(&other.cursor))
    }
}

/// Heap slot with reversed ordering (BinaryHeap is max-heap by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MinSlot<T>(pub(crate) Candidate<T>);

impl<T: Ord> Ord for MinSlot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.merge_order(&self.0)
    }
}

impl<T: Ord> PartialOrd for MinSlot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
