//! Generate synthetic merge inputs.
//!
//! Writes a file in the list format read by [`crate::source`]: a count line
//! followed by K sorted lists. Output is deterministic for a given seed.

use crate::error::{Error, Result};
use crate::sink::SinkWriteError;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Buffer size for output (1MB)
const BUF_SIZE: usize = 1024 * 1024;

/// Configuration for the generate command.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub output: PathBuf,
    /// Number of lists (K)
    pub lists: usize,
    pub min_len: usize,
    pub max_len: usize,
    pub min_value: i64,
    pub max_value: i64,
    /// Probability that a list is empty, in [0, 1]
    pub empty_frac: f64,
    pub seed: u64,
    pub force: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("nway_input.txt"),
            lists: 8,
            min_len: 0,
            max_len: 1000,
            min_value: -1_000_000,
            max_value: 1_000_000,
            empty_frac: 0.0,
            seed: 42,
            force: false,
        }
    }
}

impl GenerateConfig {
    fn validate(&self) -> Result<()> {
        if self.min_len > self.max_len {
            return Err(Error::InvalidArgument(format!(
                "--min-len ({}) is greater than --max-len ({})",
                self.min_len, self.max_len
            )));
        }
        if self.min_value > self.max_value {
            return Err(Error::InvalidArgument(format!(
                "--min-value ({}) is greater than --max-value ({})",
                self.min_value, self.max_value
            )));
        }
        if !(0.0..=1.0).contains(&self.empty_frac) {
            return Err(Error::InvalidArgument(format!(
                "--empty-frac must be between 0 and 1, got {}",
                self.empty_frac
            )));
        }
        Ok(())
    }
}

/// Statistics from generate operation.
#[derive(Debug, Default, Clone)]
pub struct GenerateStats {
    pub lists: usize,
    pub empty_lists: usize,
    pub elements: usize,
    pub elapsed_secs: f64,
}

impl fmt::Display for GenerateStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} elements in {} lists ({} empty, {:.2}s)",
            self.elements, self.lists, self.empty_lists, self.elapsed_secs
        )
    }
}

/// Generate command.
pub struct GenerateCommand {
    config: GenerateConfig,
}

impl GenerateCommand {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    /// Generate the lists described by the configuration.
    pub fn generate(&self) -> Result<Vec<Vec<i64>>> {
        self.config.validate()?;
        let cfg = &self.config;
        let mut rng = SmallRng::seed_from_u64(cfg.seed);

        let sources = (0..cfg.lists)
            .map(|_| {
                if cfg.empty_frac > 0.0 && rng.gen_bool(cfg.empty_frac) {
                    return Vec::new();
                }
                let len = rng.gen_range(cfg.min_len..=cfg.max_len);
                let mut list: Vec<i64> = (0..len)
                    .map(|_| rng.gen_range(cfg.min_value..=cfg.max_value))
                    .collect();
                list.sort_unstable();
                list
            })
            .collect();

        Ok(sources)
    }

    /// Generate and write the input file.
    pub fn run(&self) -> Result<GenerateStats> {
        let start = Instant::now();
        let cfg = &self.config;

        if !cfg.force && cfg.output.exists() {
            return Err(Error::OutputExists(cfg.output.clone()));
        }

        let sources = self.generate()?;
        write_sources_file(&cfg.output, &sources)?;

        let stats = GenerateStats {
            lists: sources.len(),
            empty_lists: sources.iter().filter(|s| s.is_empty()).count(),
            elements: sources.iter().map(Vec::len).sum(),
            elapsed_secs: start.elapsed().as_secs_f64(),
        };
        info!(output = %cfg.output.display(), %stats, "generated input");
        Ok(stats)
    }
}

/// Write lists in the input format: count line, then one line per list.
pub fn write_sources<W: Write>(
    output: W,
    sources: &[Vec<i64>],
) -> std::result::Result<(), SinkWriteError> {
    let mut writer = BufWriter::with_capacity(BUF_SIZE, output);
    let mut itoa_buf = itoa::Buffer::new();

    writer.write_all(itoa_buf.format(sources.len()).as_bytes())?;
    writer.write_all(b"\n")?;

    for list in sources {
        for (i, &v) in list.iter().enumerate() {
            if i > 0 {
                writer.write_all(b" ")?;
            }
            writer.write_all(itoa_buf.format(v).as_bytes())?;
        }
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Write lists to a file, creating or truncating it.
pub fn write_sources_file<P: AsRef<Path>>(
    path: P,
    sources: &[Vec<i64>],
) -> std::result::Result<(), SinkWriteError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| SinkWriteError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_sources(file, sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::parse_sources;
    use crate::validation::verify_sorted;
    use serial_test::serial;

    fn config(seed: u64) -> GenerateConfig {
        GenerateConfig {
            lists: 16,
            min_len: 0,
            max_len: 50,
            min_value: -100,
            max_value: 100,
            empty_frac: 0.25,
            seed,
            ..GenerateConfig::default()
        }
    }

    #[test]
    fn test_generated_lists_are_sorted() {
        let sources = GenerateCommand::new(config(7)).generate().unwrap();
        assert_eq!(sources.len(), 16);
        assert!(verify_sorted(&sources).is_ok());
        for list in &sources {
            assert!(list.len() <= 50);
            assert!(list.iter().all(|v| (-100..=100).contains(v)));
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let a = GenerateCommand::new(config(99)).generate().unwrap();
        let b = GenerateCommand::new(config(99)).generate().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_ranges() {
        let cfg = GenerateConfig {
            min_len: 10,
            max_len: 1,
            ..GenerateConfig::default()
        };
        assert!(matches!(
            GenerateCommand::new(cfg).generate(),
            Err(Error::InvalidArgument(_))
        ));

        let cfg = GenerateConfig {
            empty_frac: 1.5,
            ..GenerateConfig::default()
        };
        assert!(GenerateCommand::new(cfg).generate().is_err());
    }

    #[test]
    #[serial]
    fn test_written_file_parses_back() {
        let sources = vec![vec![-5, 0, 5], vec![], vec![i64::MIN, i64::MAX]];
        let mut output = Vec::new();
        write_sources(&mut output, &sources).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            format!("3\n-5 0 5\n\n{} {}\n", i64::MIN, i64::MAX)
        );
        assert_eq!(parse_sources(&text).unwrap(), sources);
    }

    #[test]
    fn test_run_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("in.txt");
        std::fs::write(&output, "existing\n").unwrap();

        let cfg = GenerateConfig {
            output: output.clone(),
            ..config(1)
        };
        assert!(matches!(
            GenerateCommand::new(cfg.clone()).run(),
            Err(Error::OutputExists(_))
        ));

        let stats = GenerateCommand::new(GenerateConfig { force: true, ..cfg })
            .run()
            .unwrap();
        assert_eq!(stats.lists, 16);
        assert!(std::fs::read_to_string(&output).unwrap().starts_with("16\n"));
    }
}
