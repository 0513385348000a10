//! Source adapter: parse K sorted lists from text.
//!
//! Format:
//!
//! ```text
//! 3
//! 1 4 5
//!
//! 0 3 7 10 11
//! ```
//!
//! The first non-blank line holds the list count K. Only the leading integer
//! of that line is read: `2abc` counts two lists, and a negative count means
//! zero lists. Each of the next K lines holds one list of whitespace-separated
//! integers; a blank line is an empty list. Lines after the K-th are ignored.
//! An empty (or whitespace-only) input yields zero lists.

use crate::config::is_lenient;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while reading merge input.
#[derive(Error, Debug)]
pub enum SourceReadError {
    #[error("Cannot open input file '{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid list count at line {line}: '{token}'")]
    InvalidCount { line: usize, token: String },

    #[error("Invalid integer at line {line}: '{token}'")]
    InvalidValue { line: usize, token: String },

    #[error("Unexpected end of input: expected {expected} lists, found {found}")]
    MissingSources { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, SourceReadError>;

/// Line-oriented reader for the list format.
pub struct SourceReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
}

impl SourceReader<File> {
    /// Open an input file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SourceReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "opened input");
        Ok(Self::new(file))
    }
}

impl<R: Read> SourceReader<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, 64 * 1024)
    }

    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            line_number: 0,
            buffer: String::with_capacity(1024),
        }
    }

    /// Read the count line and all K lists.
    pub fn read_sources(&mut self) -> Result<Vec<Vec<i64>>> {
        let count = match self.read_count()? {
            Some(count) => count,
            None => return Ok(Vec::new()),
        };

        // Cap the up-front allocation; the count is untrusted input.
        let mut sources = Vec::with_capacity(count.min(1024));
        while sources.len() < count {
            if !self.next_line()? {
                return Err(SourceReadError::MissingSources {
                    expected: count,
                    found: sources.len(),
                });
            }
            sources.push(self.parse_list()?);
        }

        debug!(
            lists = sources.len(),
            elements = sources.iter().map(Vec::len).sum::<usize>(),
            "parsed input"
        );
        Ok(sources)
    }

    /// Lines consumed so far.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Returns false at end of input.
    fn next_line(&mut self) -> Result<bool> {
        self.buffer.clear();
        let bytes_read = self.reader.read_line(&mut self.buffer)?;
        if bytes_read == 0 {
            return Ok(false);
        }
        self.line_number += 1;
        Ok(true)
    }

    /// Skip blank lines, then parse the leading integer of the next line.
    fn read_count(&mut self) -> Result<Option<usize>> {
        loop {
            if !self.next_line()? {
                return Ok(None);
            }
            let Some(token) = self.buffer.split_ascii_whitespace().next() else {
                continue;
            };
            return parse_count(token)
                .map(Some)
                .ok_or_else(|| SourceReadError::InvalidCount {
                    line: self.line_number,
                    token: token.to_string(),
                });
        }
    }

    fn parse_list(&self) -> Result<Vec<i64>> {
        let lenient = is_lenient();
        let mut values = Vec::new();
        for token in self.buffer.split_ascii_whitespace() {
            match token.parse::<i64>() {
                Ok(v) => values.push(v),
                Err(_) if lenient => break,
                Err(_) => {
                    return Err(SourceReadError::InvalidValue {
                        line: self.line_number,
                        token: token.to_string(),
                    })
                }
            }
        }
        Ok(values)
    }
}

/// Parse the signed integer prefix of a count token.
///
/// Trailing non-digits are ignored and negative counts clamp to zero.
/// Returns `None` when the token has no leading digits or overflows.
fn parse_count(token: &str) -> Option<usize> {
    let sign = usize::from(token.starts_with(['+', '-']));
    let end = token[sign..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(token.len(), |i| sign + i);
    let n: i64 = token[..end].parse().ok()?;
    if n < 0 {
        return Some(0);
    }
    usize::try_from(n).ok()
}

/// Read all lists from a file.
pub fn read_sources<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<i64>>> {
    SourceReader::from_path(path)?.read_sources()
}

/// Parse lists from a string.
pub fn parse_sources(content: &str) -> Result<Vec<Vec<i64>>> {
    SourceReader::new(content.as_bytes()).read_sources()
}
