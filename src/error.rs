//! Top-level error type for commands that read, validate and write.

use crate::sink::SinkWriteError;
use crate::source::SourceReadError;
use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Source(#[from] SourceReadError),

    #[error(transparent)]
    Sink(#[from] SinkWriteError),

    #[error("{0} (use --assume-sorted to skip this check)")]
    Unsorted(#[from] ValidationError),

    #[error("Output file '{}' already exists (use --force to overwrite)", .0.display())]
    OutputExists(PathBuf),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
