//! Sequence sinks: where merged output goes.
//!
//! The merge engine pushes values into any [`SequenceSink`]. A `Vec` collects
//! them in memory; [`SequenceWriter`] streams them as text using itoa for
//! integer formatting, so no intermediate `String` is allocated per value.
//!
//! Text format: values separated by a single space, terminated by one `\n`.
//! An empty sequence renders as a lone newline.

use std::convert::Infallible;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Buffer size for SequenceWriter (1MB default).
const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Errors raised while writing merged output.
#[derive(Error, Debug)]
pub enum SinkWriteError {
    #[error("Cannot create output file '{}': {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Consumer of a merged sequence, fed one value at a time in output order.
pub trait SequenceSink<T> {
    type Error;

    /// Append the next value.
    fn push(&mut self, value: T) -> Result<(), Self::Error>;

    /// Called once after the last value.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<T> SequenceSink<T> for Vec<T> {
    type Error = Infallible;

    #[inline]
    fn push(&mut self, value: T) -> Result<(), Infallible> {
        Vec::push(self, value);
        Ok(())
    }
}

/// Streaming text sink for integer sequences.
pub struct SequenceWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    written: usize,
    finished: bool,
}

impl SequenceWriter<File> {
    /// Create (or truncate) an output file.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, SinkWriteError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SinkWriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(file))
    }
}

impl<W: Write> SequenceWriter<W> {
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_SIZE, output)
    }

    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            itoa_buf: itoa::Buffer::new(),
            written: 0,
            finished: false,
        }
    }

    /// Write one integer, preceded by a separator unless it is the first.
    #[inline]
    pub fn write_value<I: itoa::Integer>(&mut self, n: I) -> Result<(), SinkWriteError> {
        if self.written > 0 {
            self.writer.write_all(b" ")?;
        }
        self.writer.write_all(self.itoa_buf.format(n).as_bytes())?;
        self.written += 1;
        Ok(())
    }

    /// Number of values written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Terminate the line and flush. Safe to call more than once.
    pub fn finish(&mut self) -> Result<(), SinkWriteError> {
        if !self.finished {
            self.writer.write_all(b"\n")?;
            self.finished = true;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write, I: itoa::Integer> SequenceSink<I> for SequenceWriter<W> {
    type Error = SinkWriteError;

    #[inline]
    fn push(&mut self, value: I) -> Result<(), SinkWriteError> {
        self.write_value(value)
    }

    fn finish(&mut self) -> Result<(), SinkWriteError> {
        SequenceWriter::finish(self)
    }
}

/// Render a complete sequence to any writer.
pub fn write_sequence_to<W: Write>(output: W, values: &[i64]) -> Result<(), SinkWriteError> {
    let mut writer = SequenceWriter::new(output);
    for &v in values {
        writer.write_value(v)?;
    }
    writer.finish()
}

/// Render a complete sequence to a file, creating or truncating it.
pub fn write_sequence<P: AsRef<Path>>(path: P, values: &[i64]) -> Result<(), SinkWriteError> {
    let mut writer = SequenceWriter::create(path)?;
    for &v in values {
        writer.write_value(v)?;
    }
    writer.finish()
}
