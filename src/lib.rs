//! ucd-lines: streaming parser for Unicode Character Database text files
//!
//! UCD data files are made of `;`-separated fields, `#` comments and
//! `@`-prefixed part headers. This library scans such a file one line at
//! a time into a single reused [`Line`] and exposes typed accessors for
//! its fields.
//!
//! # Features
//!
//! - **No per-line allocation**: fields are spans into one reused buffer
//! - **Deferred errors**: accessors record the first fault on the line and
//!   the reader aborts the stream with its line number
//! - **Sources**: local files, HTTP URLs and an on-disk cache
//!
//! # Example
//!
//! ```rust
//! use ucd_lines::parse_str;
//!
//! let input = "\
//! ## Blocks-15.1.0.txt
//! 0000..007F; Basic Latin
//! 0080..00FF; Latin-1 Supplement
//! ";
//!
//! let mut blocks = Vec::new();
//! parse_str(input, |line| {
//!     if line.is_empty() {
//!         return;
//!     }
//!     let range = line.codepoint_range(0);
//!     let name = line.string(1).to_string();
//!     blocks.push((range.first, range.last, name));
//! })
//! .unwrap();
//!
//! assert_eq!(blocks[1], (0x80, 0xFF, "Latin-1 Supplement".to_string()));
//! ```

pub mod buffers;
pub mod commands;
pub mod config;
pub mod fetch;
pub mod line;
pub mod output;
pub mod reader;
pub mod tokenizer;

// Re-export commonly used types
pub use line::{CodepointRange, FieldError, FieldKind, Line};
pub use reader::{parse, parse_file, parse_str, Result, UcdError, UcdReader};
pub use tokenizer::split_line;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::commands::{CountCommand, DumpCommand};
    pub use crate::fetch::{fetch, fetch_cached};
    pub use crate::line::{CodepointRange, FieldError, Line};
    pub use crate::output::LineWriter;
    pub use crate::reader::{parse, parse_file, parse_str, UcdError, UcdReader};
}
