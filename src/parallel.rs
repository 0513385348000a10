//! Parallel processing utilities using Rayon.
//!
//! Each merge is single threaded and owns its own heap, so independent
//! merges share nothing mutable and run one per task with no locking.

use crate::engine::{merge_with_stats, MergeStats};
use rayon::prelude::*;

/// Minimum number of jobs before enabling parallelization.
/// Below this threshold, sequential processing is faster due to
/// thread spawn overhead.
pub const PARALLEL_THRESHOLD: usize = 2;

/// Merge many independent inputs, preserving job order in the result.
pub fn merge_batch<S>(jobs: &[Vec<S>]) -> Vec<Vec<i64>>
where
    S: AsRef<[i64]> + Sync,
{
    merge_batch_with_stats(jobs).0
}

/// Merge many independent inputs and sum their counters.
pub fn merge_batch_with_stats<S>(jobs: &[Vec<S>]) -> (Vec<Vec<i64>>, MergeStats)
where
    S: AsRef<[i64]> + Sync,
{
    let results: Vec<(Vec<i64>, MergeStats)> = if jobs.len() < PARALLEL_THRESHOLD {
        jobs.iter().map(|job| merge_with_stats::<i64, S>(job)).collect()
    } else {
        jobs.par_iter().map(|job| merge_with_stats::<i64, S>(job)).collect()
    };

    let mut total = MergeStats::default();
    let outputs = results
        .into_iter()
        .map(|(output, stats)| {
            total.accumulate(&stats);
            output
        })
        .collect();

    (outputs, total)
}
