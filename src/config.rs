//! Parsing constants and per-reader options.
//!
//! Nothing here is process-wide: every [`UcdReader`](crate::UcdReader)
//! carries its own [`CodepointMode`], so concurrent parses with different
//! modes never affect each other.

/// Root of the latest published UCD plain-text files.
pub const UCD_ROOT: &str = "https://www.unicode.org/Public/UCD/latest/ucd/";

/// Largest Unicode codepoint.
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

/// How codepoint accessors bound parsed values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodepointMode {
    /// Any 32-bit hexadecimal value is accepted.
    #[default]
    Lenient,
    /// Values above [`MAX_CODEPOINT`] are malformed.
    Strict,
}

impl CodepointMode {
    /// `Strict` when `strict` is set, `Lenient` otherwise.
    #[inline]
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            CodepointMode::Strict
        } else {
            CodepointMode::Lenient
        }
    }

    /// Check a parsed codepoint value against this mode.
    ///
    /// # Example
    ///
    /// ```
    /// use ucd_lines::config::CodepointMode;
    ///
    /// assert!(CodepointMode::Lenient.allows(0x110000));
    /// assert!(!CodepointMode::Strict.allows(0x110000));
    /// ```
    #[inline]
    pub fn allows(self, value: u32) -> bool {
        self == CodepointMode::Lenient || value <= MAX_CODEPOINT
    }
}
