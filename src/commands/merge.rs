//! Merge command: read K sorted lists, write one sorted line.
//!
//! # Pipeline
//!
//! 1. Parse the input into lists (any parse failure stops here, nothing
//!    is written)
//! 2. Verify each list is sorted, unless `assume_sorted` is set
//! 3. Stream the merge straight into the output writer
//!
//! The merged sequence is never buffered in full; values go from the heap
//! to the output buffer one at a time.

use crate::engine::{merge_into, MergeStats};
use crate::error::Result;
use crate::sink::SequenceWriter;
use crate::source::SourceReader;
use crate::validation::verify_sorted;
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};

/// Merge command configuration.
#[derive(Debug, Clone, Default)]
pub struct MergeCommand {
    /// Skip sorted validation (faster for trusted input)
    pub assume_sorted: bool,
}

impl MergeCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set assume_sorted flag (builder pattern).
    pub fn with_assume_sorted(mut self, assume_sorted: bool) -> Self {
        self.assume_sorted = assume_sorted;
        self
    }

    /// Merge an input file into `output`.
    pub fn run<P: AsRef<Path>, W: Write>(&self, input: P, output: &mut W) -> Result<MergeStats> {
        let reader = SourceReader::from_path(input)?;
        self.run_reader(reader, output)
    }

    /// Merge lists read from stdin.
    pub fn run_stdin<W: Write>(&self, output: &mut W) -> Result<MergeStats> {
        let stdin = io::stdin();
        let reader = SourceReader::new(stdin.lock());
        self.run_reader(reader, output)
    }

    /// Merge an input file into an output file.
    ///
    /// The output file is only created once the input has been read and
    /// validated successfully.
    pub fn run_files<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<MergeStats> {
        let reader = SourceReader::from_path(input)?;
        self.run_reader_to_file(reader, output)
    }

    /// Merge lists from any reader into an output file.
    pub fn run_reader_to_file<R: Read, Q: AsRef<Path>>(
        &self,
        mut reader: SourceReader<R>,
        output: Q,
    ) -> Result<MergeStats> {
        let sources = reader.read_sources()?;
        self.check(&sources)?;

        let mut writer = SequenceWriter::create(output.as_ref())?;
        let stats = merge_into(&sources, &mut writer)?;
        info!(output = %output.as_ref().display(), %stats, "merge complete");
        Ok(stats)
    }

    /// Core pipeline over any reader and writer.
    pub fn run_reader<R: Read, W: Write>(
        &self,
        mut reader: SourceReader<R>,
        output: &mut W,
    ) -> Result<MergeStats> {
        let sources = reader.read_sources()?;
        self.check(&sources)?;

        let mut writer = SequenceWriter::new(output);
        let stats = merge_into(&sources, &mut writer)?;
        info!(%stats, "merge complete");
        Ok(stats)
    }

    fn check(&self, sources: &[Vec<i64>]) -> Result<()> {
        if self.assume_sorted {
            debug!("skipping sort validation");
            return Ok(());
        }
        verify_sorted(sources)?;
        Ok(())
    }
}
