//! Sort validation for merge input.
//!
//! The merge engine trusts its input. This module lets callers check that
//! every list is non-decreasing before merging, and report the first
//! violation precisely.

use thiserror::Error;

/// A list that is not in non-decreasing order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "List {} not sorted: value {value} at position {position} comes after {previous}",
        .source_id + 1
    )]
    Unsorted {
        source_id: usize,
        position: usize,
        previous: i64,
        value: i64,
    },
}

/// Verify that every list is sorted ascending (duplicates allowed).
///
/// Returns the first violation found, scanning lists in order.
///
/// # Example
///
/// ```
/// use nway_merge::validation::verify_sorted;
///
/// assert!(verify_sorted(&[vec![1i64, 2, 2], vec![]]).is_ok());
/// assert!(verify_sorted(&[vec![3i64, 1]]).is_err());
/// ```
pub fn verify_sorted<S: AsRef<[i64]>>(sources: &[S]) -> Result<(), ValidationError> {
    for (source_id, source) in sources.iter().enumerate() {
        verify_list(source_id, source.as_ref())?;
    }
    Ok(())
}

/// Verify a single list.
pub fn verify_list(source_id: usize, list: &[i64]) -> Result<(), ValidationError> {
    match list.windows(2).position(|w| w[1] < w[0]) {
        Some(i) => Err(ValidationError::Unsorted {
            source_id,
            position: i + 1,
            previous: list[i],
            value: list[i + 1],
        }),
        None => Ok(()),
    }
}
