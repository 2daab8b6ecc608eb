//! Dump command implementation.
//!
//! Renders every data and part line of a UCD file in the
//! `|first..last|field|...#comment` form.

use crate::buffers::{input_buffer_size, output_buffer_size};
use crate::output::LineWriter;
use crate::reader::{UcdError, UcdReader};
use std::io::{Read, Write};

/// Dump command configuration.
#[derive(Debug, Clone, Default)]
pub struct DumpCommand {
    /// Also print comment-only lines
    pub comments: bool,
    /// Use small I/O buffers
    pub low_memory: bool,
    /// Reject codepoints above U+10FFFF
    pub strict: bool,
}

impl DumpCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render all lines of `input` to `output`.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<(), UcdError> {
        let mut reader = UcdReader::with_capacity(input, input_buffer_size(self.low_memory))
            .strict(self.strict);
        let mut writer = LineWriter::with_capacity(output_buffer_size(self.low_memory), output)
            .with_comments(self.comments);

        while let Some(line) = reader.next_line()? {
            writer.write_line(line)?;
        }
        writer.flush()
    }
}
