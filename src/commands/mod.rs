//! Command implementations for the `nway` binary.

pub mod batch;
pub mod generate;
pub mod merge;

pub use batch::{BatchCommand, BatchStats};
pub use generate::{
    write_sources, write_sources_file, GenerateCommand, GenerateConfig, GenerateStats,
};
pub use merge::MergeCommand;
