//! Text rendering of parsed lines.
//!
//! Data lines are written as `|first..last|field1|field2|...`, with the
//! first field read as a codepoint range and `#comment` appended when a
//! comment is present. Part headers are written as `@Name`.

use crate::buffers::DEFAULT_OUTPUT_BUFFER;
use crate::line::Line;
use crate::reader::UcdError;
use std::io::{BufWriter, Write};

/// Buffered writer for rendered lines.
pub struct LineWriter<W: Write> {
    writer: BufWriter<W>,
    comments: bool,
}

impl<W: Write> LineWriter<W> {
    /// Create a new LineWriter with the default buffer.
    pub fn new(output: W) -> Self {
        Self::with_capacity(DEFAULT_OUTPUT_BUFFER, output)
    }

    /// Create a new LineWriter with specified buffer size.
    pub fn with_capacity(capacity: usize, output: W) -> Self {
        Self {
            writer: BufWriter::with_capacity(capacity, output),
            comments: false,
        }
    }

    /// Also write comment-only lines, as `#comment`.
    pub fn with_comments(mut self, comments: bool) -> Self {
        self.comments = comments;
        self
    }

    /// Render one line. Blank lines (and comment-only lines unless
    /// enabled) produce no output.
    ///
    /// Reading the first field as a range may fault the line; the
    /// fault is left for the reader to report.
    pub fn write_line(&mut self, line: &Line) -> Result<(), UcdError> {
        if !line.part().is_empty() {
            writeln!(self.writer, "@{}", line.part())?;
            return Ok(());
        }

        if line.is_empty() {
            if self.comments && !line.comment().is_empty() {
                writeln!(self.writer, "#{}", line.comment())?;
            }
            return Ok(());
        }

        let range = line.codepoint_range(0);
        if line.err().is_some() {
            return Ok(());
        }
        write!(self.writer, "|{}", range)?;
        for field in line.fields().skip(1) {
            write!(self.writer, "|{}", field)?;
        }
        if !line.comment().is_empty() {
            write!(self.writer, "#{}", line.comment())?;
        }
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    /// Flush the output buffer.
    pub fn flush(&mut self) -> Result<(), UcdError> {
        self.writer.flush()?;
        Ok(())
    }
}
