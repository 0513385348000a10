//! Min-ordered priority structure over merge candidates.
//!
//! Wraps `BinaryHeap` with reversed ordering so that `extract_min` returns
//! the candidate with the smallest value. Insert and extract are O(log K)
//! where K is the number of live candidates.

use crate::candidate::{Candidate, MinSlot};
use std::collections::BinaryHeap;

/// Priority structure holding at most one live candidate per source.
#[derive(Debug, Clone)]
pub struct CandidateHeap<T> {
    heap: BinaryHeap<MinSlot<T>>,
}

impl<T: Ord> Default for CandidateHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> CandidateHeap<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    /// Create a heap sized for `k` sources.
    pub fn with_capacity(k: usize) -> Self {
        Self {
            heap: BinaryHeap::with_capacity(k),
        }
    }

    /// Add a candidate. Equal values from different sources are all kept.
    #[inline]
    pub fn insert(&mut self, candidate: Candidate<T>) {
        self.heap.push(MinSlot(candidate));
    }

    /// Remove and return the smallest candidate.
    ///
    /// `None` means the heap is empty, which is how a merge terminates.
    #[inline]
    pub fn extract_min(&mut self) -> Option<Candidate<T>> {
        self.heap.pop().map(|slot| slot.0)
    }

    /// Smallest candidate without removing it.
    #[inline]
    pub fn peek_min(&self) -> Option<&Candidate<T>> {
        self.heap.peek().map(|slot| &slot.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_in_value_order() {
        let mut heap = CandidateHeap::new();
        heap.insert(Candidate::new(5i64, 0, 0));
        heap.insert(Candidate::new(-2i64, 1, 0));
        heap.insert(Candidate::new(3i64, 2, 0));

        let values: Vec<i64> = std::iter::from_fn(|| heap.extract_min())
            .map(|c| c.value)
            .collect();
        assert_eq!(values, vec![-2, 3, 5]);
    }

    #[test]
    fn test_empty_signals_none() {
        let mut heap: CandidateHeap<i64> = CandidateHeap::with_capacity(4);
        assert!(heap.is_empty());
        assert!(heap.peek_min().is_none());
        assert!(heap.extract_min().is_none());
    }

    #[test]
    fn test_duplicates_kept_and_ordered_by_source() {
        let mut heap = CandidateHeap::new();
        heap.insert(Candidate::new(0i64, 2, 1));
        heap.insert(Candidate::new(0i64, 0, 2));
        heap.insert(Candidate::new(0i64, 1, 0));
        assert_eq!(heap.len(), 3);

        let sources: Vec<usize> = std::iter::from_fn(|| heap.extract_min())
            .map(|c| c.source_id)
            .collect();
        assert_eq!(sources, vec![0, 1, 2]);
    }

    #[test]
    fn test_extreme_values() {
        let mut heap = CandidateHeap::new();
        heap.insert(Candidate::new(i64::MAX, 0, 0));
        heap.insert(Candidate::new(i64::MIN, 1, 0));
        heap.insert(Candidate::new(0i64, 2, 0));

        assert_eq!(heap.peek_min().map(|c| c.value), Some(i64::MIN));
        assert_eq!(heap.extract_min().map(|c| c.value), Some(i64::MIN));
        assert_eq!(heap.extract_min().map(|c| c.value), Some(0));
        assert_eq!(heap.extract_min().map(|c| c.value), Some(i64::MAX));
        assert!(heap.is_empty());
    }
}
