//! Command implementations for the `ucd` tool.

pub mod count;
pub mod dump;

pub use count::{CountCommand, CountStats};
pub use dump::DumpCommand;
