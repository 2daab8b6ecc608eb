//! Count command implementation.
//!
//! Classifies the lines of one or more UCD files and reports totals.
//! Multiple inputs are parsed in parallel, each with its own reader.

use crate::buffers::input_buffer_size;
use crate::reader::{UcdError, UcdReader};
use rayon::prelude::*;
use std::fmt;
use std::io::Read;

/// Count command configuration.
#[derive(Debug, Clone, Default)]
pub struct CountCommand {
    /// Read the first field of every data line as a codepoint range
    /// and total the codepoints covered
    pub ranges: bool,
    /// Use small input buffers
    pub low_memory: bool,
    /// Reject codepoints above U+10FFFF
    pub strict: bool,
}

/// Per-file line statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountStats {
    /// Lines scanned
    pub lines: usize,
    /// Lines with at least one field
    pub data: usize,
    /// `@` part header lines
    pub parts: usize,
    /// Comment-only lines
    pub comments: usize,
    /// Empty lines
    pub blank: usize,
    /// Largest number of fields on one line
    pub max_fields: usize,
    /// Codepoints covered by first-field ranges (only with `ranges`)
    pub codepoints: u64,
    /// Data lines per part, in document order. Lines before the first
    /// part header are counted under an empty name.
    pub sections: Vec<(String, usize)>,
}

impl fmt::Display for CountStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lines: {}, Data: {}, Parts: {}, Comments: {}, Blank: {}, Max fields: {}",
            self.lines, self.data, self.parts, self.comments, self.blank, self.max_fields
        )?;
        if self.codepoints > 0 {
            write!(f, ", Codepoints: {}", self.codepoints)?;
        }
        Ok(())
    }
}

impl CountCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the lines of a single source.
    pub fn count<R: Read>(&self, input: R) -> Result<CountStats, UcdError> {
        let mut reader = UcdReader::with_capacity(input, input_buffer_size(self.low_memory))
            .strict(self.strict);
        let mut stats = CountStats::default();

        while let Some(line) = reader.next_line()? {
            stats.lines += 1;
            if !line.part().is_empty() {
                stats.parts += 1;
                stats.sections.push((line.part().to_string(), 0));
            } else if !line.is_empty() {
                stats.data += 1;
                stats.max_fields = stats.max_fields.max(line.len());
                match stats.sections.last_mut() {
                    Some((_, n)) => *n += 1,
                    None => stats.sections.push((String::new(), 1)),
                }
                if self.ranges {
                    let range = line.codepoint_range(0);
                    if range.is_empty() {
                        line.fail(format!("inverted range {}", range));
                    }
                    stats.codepoints += range.len();
                }
            } else if !line.comment().is_empty() {
                stats.comments += 1;
            } else {
                stats.blank += 1;
            }
        }

        Ok(stats)
    }

    /// Count several sources in parallel. Results keep input order.
    pub fn count_many<R, I>(&self, inputs: I) -> Vec<Result<CountStats, UcdError>>
    where
        R: Read + Send,
        I: IntoParallelIterator<Item = R>,
    {
        inputs
            .into_par_iter()
            .map(|input| self.count(input))
            .collect()
    }
}
