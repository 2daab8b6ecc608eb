//! Buffer size constants for reading and writing.
//!
//! These constants control memory usage vs I/O throughput tradeoffs.
//! UCD files are a few megabytes at most, so the defaults stay small.

/// Default output buffer size (256 KB).
pub const DEFAULT_OUTPUT_BUFFER: usize = 256 * 1024;

/// Low-memory output buffer size (16 KB).
pub const LOW_MEMORY_OUTPUT_BUFFER: usize = 16 * 1024;

/// Default input buffer size (64 KB).
pub const DEFAULT_INPUT_BUFFER: usize = 64 * 1024;

/// Low-memory input buffer size (8 KB).
pub const LOW_MEMORY_INPUT_BUFFER: usize = 8 * 1024;

/// Default line buffer capacity (256 bytes).
/// Longer than any line in the published UCD files.
pub const DEFAULT_LINE_BUFFER: usize = 256;

/// Returns the appropriate output buffer size based on low_memory flag.
#[inline]
pub const fn output_buffer_size(low_memory: bool) -> usize {
    if low_memory {
        LOW_MEMORY_OUTPUT_BUFFER
    } else {
        DEFAULT_OUTPUT_BUFFER
    }
}

/// Returns the appropriate input buffer size based on low_memory flag.
#[inline]
pub const fn input_buffer_size(low_memory: bool) -> usize {
    if low_memory {
        LOW_MEMORY_INPUT_BUFFER
    } else {
        DEFAULT_INPUT_BUFFER
    }
}
