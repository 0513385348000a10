//! K-way merge engine.
//!
//! Merges K individually sorted sources into one non-decreasing sequence in
//! O(M log K) time, where M is the total number of elements.
//!
//! # Algorithm
//!
//! 1. Seed: push the first element of every non-empty source onto a min-heap
//! 2. Drain: pop the minimum, emit it, and push the next element of the
//!    source it came from (if that source has one left)
//! 3. Done: the heap is empty and every element has been emitted
//!
//! Equal values from different sources come out lowest `source_id` first.
//!
//! The engine is an [`Iterator`], so output can be pulled one value at a
//! time. Abandoning it between calls leaves it in a consistent state that
//! can still be inspected through [`MergeEngine::state`],
//! [`MergeEngine::pending`] and [`MergeEngine::emitted`].
//!
//! Sources are borrowed read-only and never validated: an unsorted source
//! still yields exactly M elements, but their relative order is unspecified.

use crate::candidate::Candidate;
use crate::heap::CandidateHeap;
use crate::sink::SequenceSink;
use std::fmt;
use std::iter::FusedIterator;

/// Lifecycle of a merge. No state is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeState {
    /// Sources not yet loaded into the heap.
    Seeding,
    /// Extract / emit / reinsert loop in progress.
    Draining,
    /// Heap exhausted; all elements emitted.
    Done,
}

/// Counters collected over one merge.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub sources: usize,
    pub empty_sources: usize,
    pub elements: usize,
    /// Largest number of live candidates seen at once (at most `sources`).
    pub peak_pending: usize,
}

impl MergeStats {
    /// Combine counters of independent merges.
    pub fn accumulate(&mut self, other: &MergeStats) {
        self.sources += other.sources;
        self.empty_sources += other.empty_sources;
        self.elements += other.elements;
        self.peak_pending = self.peak_pending.max(other.peak_pending);
    }
}

impl fmt::Display for MergeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elements from {} sources ({} empty), peak heap size {}",
            self.elements, self.sources, self.empty_sources, self.peak_pending
        )
    }
}

/// Single-pass merge over borrowed sorted sources.
///
/// A fresh engine is needed for every merge.
#[derive(Debug)]
pub struct MergeEngine<'a, T, S> {
    sources: &'a [S],
    heap: CandidateHeap<T>,
    state: MergeState,
    total: usize,
    stats: MergeStats,
}

impl<'a, T, S> MergeEngine<'a, T, S>
where
    T: Ord + Clone,
    S: AsRef<[T]>,
{
    pub fn new(sources: &'a [S]) -> Self {
        let total = sources.iter().map(|s| s.as_ref().len()).sum();
        Self {
            sources,
            heap: CandidateHeap::with_capacity(sources.len()),
            state: MergeState::Seeding,
            total,
            stats: MergeStats {
                sources: sources.len(),
                ..MergeStats::default()
            },
        }
    }

    /// Load the first element of each non-empty source.
    ///
    /// Called automatically on the first `next()`. Does nothing once the
    /// engine has left the seeding state.
    pub fn seed(&mut self) {
        if self.state != MergeState::Seeding {
            return;
        }

        for (source_id, source) in self.sources.iter().enumerate() {
            match source.as_ref().first() {
                Some(first) => self.heap.insert(Candidate::new(first.clone(), source_id, 0)),
                None => self.stats.empty_sources += 1,
            }
        }

        self.stats.peak_pending = self.heap.len();
        self.state = if self.heap.is_empty() {
            MergeState::Done
        } else {
            MergeState::Draining
        };
    }

    pub fn state(&self) -> MergeState {
        self.state
    }

    /// Number of live candidates in the heap.
    pub fn pending(&self) -> usize {
        self.heap.len()
    }

    /// Number of values emitted so far.
    pub fn emitted(&self) -> usize {
        self.stats.elements
    }

    /// Total number of values this merge will emit.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Smallest candidate that has not been emitted yet.
    pub fn peek(&self) -> Option<&Candidate<T>> {
        self.heap.peek_min()
    }

    pub fn stats(&self) -> MergeStats {
        self.stats
    }

    /// Drive the merge to completion, pushing every value into `sink`.
    ///
    /// Stops at the first sink error; values already pushed form a sorted
    /// prefix of the full output.
    pub fn drain_into<K>(&mut self, sink: &mut K) -> Result<MergeStats, K::Error>
    where
        K: SequenceSink<T>,
    {
        for value in self.by_ref() {
            sink.push(value)?;
        }
        sink.finish()?;
        Ok(self.stats)
    }
}

impl<T, S> Iterator for MergeEngine<'_, T, S>
where
    T: Ord + Clone,
    S: AsRef<[T]>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.seed();

        let candidate = self.heap.extract_min()?;
        self.stats.elements += 1;

        // Refill from the same source; an exhausted source simply adds nothing.
        let next_cursor = candidate.next_cursor();
        if let Some(value) = self.sources[candidate.source_id].as_ref().get(next_cursor) {
            self.heap
                .insert(Candidate::new(value.clone(), candidate.source_id, next_cursor));
        }

        if self.heap.is_empty() {
            self.state = MergeState::Done;
        }

        Some(candidate.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.stats.elements;
        (remaining, Some(remaining))
    }
}

impl<T, S> ExactSizeIterator for MergeEngine<'_, T, S>
where
    T: Ord + Clone,
    S: AsRef<[T]>,
{
}

impl<T, S> FusedIterator for MergeEngine<'_, T, S>
where
    T: Ord + Clone,
    S: AsRef<[T]>,
{
}

/// Merge sorted sources into a new vector.
pub fn merge<T, S>(sources: &[S]) -> Vec<T>
where
    T: Ord + Clone,
    S: AsRef<[T]>,
{
    merge_with_stats(sources).0
}

/// Merge sorted sources into a new vector, also returning merge counters.
pub fn merge_with_stats<T, S>(sources: &[S]) -> (Vec<T>, MergeStats)
where
    T: Ord + Clone,
    S: AsRef<[T]>,
{
    let mut engine = MergeEngine::new(sources);
    let mut output = Vec::with_capacity(engine.total());
    output.extend(engine.by_ref());
    (output, engine.stats())
}

/// Merge sorted sources straight into a sink without buffering the output.
pub fn merge_into<T, S, K>(sources: &[S], sink: &mut K) -> Result<MergeStats, K::Error>
where
    T: Ord + Clone,
    S: AsRef<[T]>,
    K: SequenceSink<T>,
{
    MergeEngine::new(sources).drain_into(sink)
}
