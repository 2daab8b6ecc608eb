//! Streaming UCD file reader.
//!
//! [`UcdReader`] scans a byte source line by line into one reused
//! [`Line`]. [`parse`] drives a handler over every line and stops at the
//! first fault the handler leaves on a line.

use crate::buffers::{DEFAULT_INPUT_BUFFER, DEFAULT_LINE_BUFFER};
use crate::config::CodepointMode;
use crate::line::{FieldError, Line};
use crate::tokenizer::tokenize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur while reading or fetching UCD files.
#[derive(Error, Debug)]
pub enum UcdError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("error in line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: FieldError,
    },

    #[error("bad GET status for '{url}': '{status}'")]
    Download { url: String, status: String },

    #[error("HTTP GET: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not create file '{}': {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl UcdError {
    /// Line number for parse faults.
    pub fn line(&self) -> Option<usize> {
        match self {
            UcdError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, UcdError>;

/// A streaming reader over the lines of a UCD file.
///
/// This is a lending reader: each [`next_line`](Self::next_line) call
/// borrows the shared line until the caller is done with it. A fault left
/// on that line is reported by the next call, after which the reader is
/// exhausted.
///
/// Lines are scanned as raw bytes. A line that is not valid UTF-8 is
/// still delivered, with invalid sequences replaced by U+FFFD.
pub struct UcdReader<R: Read> {
    reader: BufReader<R>,
    raw: Vec<u8>,
    line: Line,
    done: bool,
}

impl UcdReader<File> {
    /// Open a UCD file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(file))
    }
}

impl<R: Read> UcdReader<R> {
    /// Create a new reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_INPUT_BUFFER)
    }

    /// Create a reader with custom input buffer capacity.
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        let mut line = Line::new();
        line.text.reserve(DEFAULT_LINE_BUFFER);
        Self {
            reader: BufReader::with_capacity(capacity, reader),
            raw: Vec::with_capacity(DEFAULT_LINE_BUFFER),
            line,
            done: false,
        }
    }

    /// Reject codepoints above U+10FFFF in this reader's accessors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.line.mode = CodepointMode::from_strict(strict);
        self
    }

    /// Number of lines scanned so far.
    #[inline]
    pub fn lines_read(&self) -> usize {
        self.line.index()
    }

    /// Scan and tokenize the next line.
    ///
    /// Returns `Ok(None)` at end of input. If the previously returned line
    /// was left with a fault, that fault is returned instead and no more
    /// lines are scanned.
    pub fn next_line(&mut self) -> Result<Option<&Line>> {
        if self.done {
            return Ok(None);
        }
        self.check_fault()?;

        self.raw.clear();
        let bytes_read = match self.reader.read_until(b'\n', &mut self.raw) {
            Ok(n) => n,
            Err(e) => {
                self.done = true;
                return Err(e.into());
            }
        };
        if bytes_read == 0 {
            debug!(lines = self.line.index(), "end of input");
            self.done = true;
            return Ok(None);
        }

        self.line.text.clear();
        match std::str::from_utf8(&self.raw) {
            Ok(text) => self.line.text.push_str(text),
            Err(_) => {
                debug!(line = self.line.index() + 1, "invalid UTF-8, decoding lossily");
                self.line
                    .text
                    .push_str(&String::from_utf8_lossy(&self.raw));
            }
        }
        tokenize(&mut self.line);
        trace!(
            line = self.line.index(),
            fields = self.line.len(),
            "scanned line"
        );
        Ok(Some(&self.line))
    }

    /// Report a fault left on the last line returned, if any.
    ///
    /// Call this after the final `next_line` when stopping early; a fault
    /// on the very last line of input is otherwise also reported by the
    /// `next_line` call that would return `Ok(None)`.
    pub fn finish(mut self) -> Result<()> {
        self.check_fault()
    }

    fn check_fault(&mut self) -> Result<()> {
        match self.line.take_err() {
            Some(source) => {
                self.done = true;
                debug!(line = self.line.index(), error = %source, "aborting on fault");
                Err(UcdError::Parse {
                    line: self.line.index(),
                    source,
                })
            }
            None => Ok(()),
        }
    }
}

/// Call `handler` for every line of `reader`, including blank and
/// comment-only lines.
///
/// Stops at the first line the handler leaves faulted and returns the
/// fault with its 1-based line number.
///
/// # Example
///
/// ```
/// use ucd_lines::parse;
///
/// let input = "0041..005A; Lu # LATIN CAPITAL\n";
/// let mut ranges = Vec::new();
/// parse(input.as_bytes(), |line| {
///     if !line.is_empty() {
///         ranges.push((line.codepoint_range(0), line.string(1).to_string()));
///     }
/// })
/// .unwrap();
/// assert_eq!(ranges[0].0.last, 0x5A);
/// ```
pub fn parse<R, F>(reader: R, mut handler: F) -> Result<()>
where
    R: Read,
    F: FnMut(&Line),
{
    let mut reader = UcdReader::new(reader);
    while let Some(line) = reader.next_line()? {
        handler(line);
    }
    Ok(())
}

/// Parse a UCD file from a path.
pub fn parse_file<P, F>(path: P, handler: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&Line),
{
    parse(File::open(path)?, handler)
}

/// Parse a UCD file held in memory (useful for testing).
pub fn parse_str<F>(content: &str, handler: F) -> Result<()>
where
    F: FnMut(&Line),
{
    parse(content.as_bytes(), handler)
}
