//! nway-merge: N-way merge of sorted integer sequences.
//!
//! Merges K individually sorted sequences into one sorted sequence with a
//! min-heap, in O(M log K) time for M total elements. Duplicates and
//! negative values are preserved.
//!
//! # Layout
//!
//! - [`engine`]: the merge itself, over any `T: Ord + Clone`
//! - [`heap`] and [`candidate`]: the priority structure the engine drives
//! - [`source`] and [`sink`]: text input and output adapters
//! - [`validation`]: optional check that inputs are sorted
//! - [`parallel`]: many independent merges at once with Rayon
//!
//! # Example
//!
//! ```rust
//! use nway_merge::merge;
//!
//! let lists = vec![vec![1, 4, 5], vec![2, 6, 8, 9], vec![0, 3, 7, 10, 11]];
//! let merged = merge(&lists);
//! assert_eq!(merged, (0..=11).collect::<Vec<i64>>());
//! ```
//!
//! Reading and writing files:
//!
//! ```rust,no_run
//! use nway_merge::{merge, read_sources, write_sequence};
//!
//! let lists = read_sources("input.txt").unwrap();
//! write_sequence("output.txt", &merge(&lists)).unwrap();
//! ```

pub mod candidate;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod heap;
pub mod parallel;
pub mod sink;
pub mod source;
pub mod validation;

// Re-export commonly used types
pub use candidate::Candidate;
pub use engine::{merge, merge_into, merge_with_stats, MergeEngine, MergeState, MergeStats};
pub use error::Error;
pub use heap::CandidateHeap;
pub use sink::{write_sequence, write_sequence_to, SequenceSink, SequenceWriter, SinkWriteError};
pub use source::{parse_sources, read_sources, SourceReadError, SourceReader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{BatchCommand, GenerateCommand, MergeCommand};
    pub use crate::engine::{merge, merge_into, MergeEngine, MergeStats};
    pub use crate::sink::{SequenceSink, SequenceWriter};
    pub use crate::source::{parse_sources, read_sources};
    pub use crate::validation::verify_sorted;
}
