//! Batch command: merge many input files in parallel.
//!
//! Every input file is an independent merge job. Inputs are read and
//! validated in parallel, merged with [`merge_batch_with_stats`], and each
//! result is written to `<output_dir>/<stem>.merged.txt`.

use crate::engine::MergeStats;
use crate::error::{Error, Result};
use crate::parallel::merge_batch_with_stats;
use crate::sink::{write_sequence, SinkWriteError};
use crate::source::read_sources;
use crate::validation::verify_sorted;
use rayon::prelude::*;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Statistics from a batch run.
#[derive(Debug, Default, Clone)]
pub struct BatchStats {
    pub files: usize,
    pub merge: MergeStats,
}

impl fmt::Display for BatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} files: {}", self.files, self.merge)
    }
}

/// Batch command configuration.
#[derive(Debug, Clone)]
pub struct BatchCommand {
    pub output_dir: PathBuf,
    /// Skip sorted validation (faster for trusted input)
    pub assume_sorted: bool,
    /// Overwrite existing output files
    pub force: bool,
}

impl BatchCommand {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            assume_sorted: false,
            force: false,
        }
    }

    /// Set assume_sorted flag (builder pattern).
    pub fn with_assume_sorted(mut self, assume_sorted: bool) -> Self {
        self.assume_sorted = assume_sorted;
        self
    }

    /// Set force flag (builder pattern).
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Output path for a given input.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "input".to_string());
        self.output_dir.join(format!("{}.merged.txt", stem))
    }

    /// Merge every input. Nothing is written unless all inputs are valid.
    pub fn run<P: AsRef<Path> + Sync>(&self, inputs: &[P]) -> Result<BatchStats> {
        let outputs = self.plan_outputs(inputs)?;

        let jobs: Vec<Vec<Vec<i64>>> = inputs
            .par_iter()
            .map(|input| -> Result<Vec<Vec<i64>>> {
                let sources = read_sources(input)?;
                if !self.assume_sorted {
                    verify_sorted(&sources)?;
                }
                Ok(sources)
            })
            .collect::<Result<_>>()?;
        debug!(jobs = jobs.len(), "inputs loaded");

        let (merged, stats) = merge_batch_with_stats(&jobs);

        fs::create_dir_all(&self.output_dir).map_err(|source| SinkWriteError::Create {
            path: self.output_dir.clone(),
            source,
        })?;

        outputs
            .par_iter()
            .zip(merged.par_iter())
            .try_for_each(|(path, values)| write_sequence(path, values))?;

        let stats = BatchStats {
            files: inputs.len(),
            merge: stats,
        };
        info!(%stats, "batch complete");
        Ok(stats)
    }

    /// Resolve output paths, rejecting collisions and existing files.
    fn plan_outputs<P: AsRef<Path>>(&self, inputs: &[P]) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::with_capacity(inputs.len());
        let mut outputs = Vec::with_capacity(inputs.len());

        for input in inputs {
            let path = self.output_path(input.as_ref());
            if !seen.insert(path.clone()) {
                return Err(Error::InvalidArgument(format!(
                    "Two inputs map to the same output file '{}'",
                    path.display()
                )));
            }
            if !self.force && path.exists() {
                return Err(Error::OutputExists(path));
            }
            outputs.push(path);
        }

        Ok(outputs)
    }
}
