//! The per-line record and its typed field accessors.
//!
//! A single [`Line`] is reused for every line of a stream. Its text lives
//! in one buffer and fields are byte spans into it, so once the buffer
//! has grown to the longest line no further allocation happens.
//!
//! Accessors never return errors directly. The first failure is stored
//! on the line and every later accessor call on the same line becomes a
//! no-op returning a zero value, so a handler can chain calls and check
//! [`Line::err`] once at the end.

use crate::config::CodepointMode;
use std::cell::OnceCell;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// The grammar a field was expected to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    UnsignedInteger,
    Codepoint,
    CodepointRange,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Integer => "integer",
            FieldKind::UnsignedInteger => "unsigned integer",
            FieldKind::Codepoint => "codepoint",
            FieldKind::CodepointRange => "codepoint range",
        };
        f.write_str(name)
    }
}

/// A fault raised while reading the fields of one line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("invalid field index {index} ({available} fields available)")]
    IndexOutOfRange { index: usize, available: usize },

    #[error("malformed {kind} in field {index}: '{text}'")]
    Malformed {
        index: usize,
        kind: FieldKind,
        text: String,
    },

    #[error("{0}")]
    Rejected(String),
}

/// An inclusive range of codepoints, `first..last` in UCD notation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CodepointRange {
    pub first: u32,
    pub last: u32,
}

impl CodepointRange {
    pub fn new(first: u32, last: u32) -> Self {
        Self { first, last }
    }

    /// Number of codepoints covered (zero for an inverted range).
    #[inline]
    pub fn len(&self) -> u64 {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first) as u64 + 1
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        self.first <= cp && cp <= self.last
    }
}

impl fmt::Display for CodepointRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}..{:#x}", self.first, self.last)
    }
}

/// One tokenized line of a UCD file.
///
/// Contents are only meaningful until the reader moves to the next line.
#[derive(Debug, Default)]
pub struct Line {
    pub(crate) index: usize,
    pub(crate) text: String,
    pub(crate) fields: Vec<Range<usize>>,
    pub(crate) part: Range<usize>,
    pub(crate) comment: Range<usize>,
    pub(crate) fault: OnceCell<FieldError>,
    pub(crate) mode: CodepointMode,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    /// A line whose codepoint accessors apply `mode`.
    pub fn with_mode(mode: CodepointMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    #[inline]
    pub fn mode(&self) -> CodepointMode {
        self.mode
    }

    /// 1-based number of this line in the stream.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of `;`-separated fields (zero on part, comment-only and blank lines).
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over all trimmed fields in order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.fields.iter().map(move |span| &self.text[span.clone()])
    }

    /// Part header value for `@Name` lines, empty otherwise.
    #[inline]
    pub fn part(&self) -> &str {
        &self.text[self.part.clone()]
    }

    /// Text after the first `#`, trimmed.
    #[inline]
    pub fn comment(&self) -> &str {
        &self.text[self.comment.clone()]
    }

    /// The first fault raised on this line, if any.
    #[inline]
    pub fn err(&self) -> Option<&FieldError> {
        self.fault.get()
    }

    /// Remove and return the fault so the caller can handle it itself.
    pub fn take_err(&mut self) -> Option<FieldError> {
        self.fault.take()
    }

    /// Raise a handler-defined fault on this line.
    ///
    /// Has no effect if a fault is already set.
    pub fn fail(&self, message: impl Into<String>) {
        self.set_fault(FieldError::Rejected(message.into()));
    }

    /// Field `i` verbatim.
    pub fn string(&self, i: usize) -> &str {
        self.field(i).unwrap_or("")
    }

    /// Field `i` as a base-10 signed integer.
    pub fn int(&self, i: usize) -> i64 {
        self.field(i)
            .and_then(|s| self.check(s.parse().ok(), i, FieldKind::Integer, s))
            .unwrap_or(0)
    }

    /// Field `i` as a base-10 unsigned integer. No sign is accepted.
    pub fn uint(&self, i: usize) -> u64 {
        self.field(i)
            .and_then(|s| {
                let value = if s.starts_with('+') { None } else { s.parse().ok() };
                self.check(value, i, FieldKind::UnsignedInteger, s)
            })
            .unwrap_or(0)
    }

    /// Field `i` as a hexadecimal codepoint with optional `U+` or `U` prefix.
    pub fn codepoint(&self, i: usize) -> u32 {
        self.field(i)
            .and_then(|s| self.check(self.parse_cp(s), i, FieldKind::Codepoint, s))
            .unwrap_or(0)
    }

    /// Field `i` as a space-separated codepoint sequence.
    ///
    /// The first malformed token faults the line and the result is empty.
    pub fn codepoints(&self, i: usize) -> Vec<u32> {
        let Some(s) = self.field(i) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for token in s.split(' ').filter(|t| !t.is_empty()) {
            match self.parse_cp(token) {
                Some(cp) => out.push(cp),
                None => {
                    self.malformed(i, FieldKind::Codepoint, token);
                    return Vec::new();
                }
            }
        }
        out
    }

    /// Field `i` as `first..last`, or a single codepoint used for both ends.
    pub fn codepoint_range(&self, i: usize) -> CodepointRange {
        let Some(s) = self.field(i) else {
            return CodepointRange::default();
        };
        let range = match s.find("..") {
            Some(p) => self
                .parse_cp(&s[..p])
                .zip(self.parse_cp(&s[p + 2..]))
                .map(|(first, last)| CodepointRange::new(first, last)),
            None => self.parse_cp(s).map(|cp| CodepointRange::new(cp, cp)),
        };
        self.check(range, i, FieldKind::CodepointRange, s)
            .unwrap_or_default()
    }

    /// Shared preamble: `None` if the line is already faulted or `i` is out of range.
    fn field(&self, i: usize) -> Option<&str> {
        if self.fault.get().is_some() {
            return None;
        }
        match self.fields.get(i) {
            Some(span) => Some(&self.text[span.clone()]),
            None => {
                self.set_fault(FieldError::IndexOutOfRange {
                    index: i,
                    available: self.fields.len(),
                });
                None
            }
        }
    }

    #[inline]
    fn parse_cp(&self, s: &str) -> Option<u32> {
        parse_codepoint(s).filter(|&cp| self.mode.allows(cp))
    }

    fn check<T>(&self, value: Option<T>, i: usize, kind: FieldKind, text: &str) -> Option<T> {
        if value.is_none() {
            self.malformed(i, kind, text);
        }
        value
    }

    fn malformed(&self, index: usize, kind: FieldKind, text: &str) {
        self.set_fault(FieldError::Malformed {
            index,
            kind,
            text: text.to_string(),
        });
    }

    #[inline]
    fn set_fault(&self, err: FieldError) {
        // First fault wins; a later one is dropped.
        let _ = self.fault.set(err);
    }
}

/// Parse `[U+|U]HEX` into a codepoint value.
///
/// Any 32-bit value is accepted; range limits are applied per line by
/// its [`CodepointMode`].
pub fn parse_codepoint(s: &str) -> Option<u32> {
    let digits = s
        .strip_prefix("U+")
        .or_else(|| s.strip_prefix('U'))
        .unwrap_or(s);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::split_line;

    fn line(text: &str) -> Line {
        let mut ln = Line::new();
        split_line(text, &mut ln);
        ln
    }

    #[test]
    fn test_parse_codepoint_prefixes() {
        assert_eq!(parse_codepoint("0041"), Some(0x41));
        assert_eq!(parse_codepoint("U+0041"), Some(0x41));
        assert_eq!(parse_codepoint("U0041"), Some(0x41));
        assert_eq!(parse_codepoint("10FFFF"), Some(0x10FFFF));
        assert_eq!(parse_codepoint("FFFFFFFF"), Some(u32::MAX));
        assert_eq!(parse_codepoint("100000000"), None);
        assert_eq!(parse_codepoint("00e9"), Some(0xE9));
        assert_eq!(parse_codepoint(""), None);
        assert_eq!(parse_codepoint("U+"), None);
        assert_eq!(parse_codepoint("+41"), None);
        assert_eq!(parse_codepoint("XYZ"), None);
    }

    #[test]
    fn test_strict_mode_caps_codepoints() {
        let mut ln = Line::with_mode(CodepointMode::Strict);
        split_line("10FFFF; 110000", &mut ln);
        assert_eq!(ln.codepoint(0), 0x10FFFF);
        assert_eq!(ln.codepoint(1), 0);
        assert!(matches!(
            ln.err(),
            Some(FieldError::Malformed {
                index: 1,
                kind: FieldKind::Codepoint,
                ..
            })
        ));

        // The mode survives re-tokenizing.
        split_line("0041 110000", &mut ln);
        assert_eq!(ln.mode(), CodepointMode::Strict);
        assert!(ln.codepoints(0).is_empty());
        assert!(ln.err().is_some());

        let lenient = line("110000");
        assert_eq!(lenient.codepoint(0), 0x110000);
        assert!(lenient.err().is_none());
    }

    #[test]
    fn test_string_and_numbers() {
        let ln = line("0041; LATIN; -12; 7");
        assert_eq!(ln.string(1), "LATIN");
        assert_eq!(ln.int(2), -12);
        assert_eq!(ln.uint(3), 7);
        assert_eq!(ln.codepoint(0), 0x41);
        assert!(ln.err().is_none());
    }

    #[test]
    fn test_uint_rejects_sign() {
        let ln = line("+5");
        assert_eq!(ln.uint(0), 0);
        assert!(matches!(
            ln.err(),
            Some(FieldError::Malformed {
                kind: FieldKind::UnsignedInteger,
                ..
            })
        ));
    }

    #[test]
    fn test_int_accepts_plus_sign() {
        let ln = line("+5");
        assert_eq!(ln.int(0), 5);
        assert!(ln.err().is_none());
    }

    #[test]
    fn test_codepoint_range() {
        let ln = line("41..5A; 41; U+0030..U+0039");
        assert_eq!(ln.codepoint_range(0), CodepointRange::new(0x41, 0x5A));
        assert_eq!(ln.codepoint_range(1), CodepointRange::new(0x41, 0x41));
        assert_eq!(ln.codepoint_range(2), CodepointRange::new(0x30, 0x39));
        assert!(ln.err().is_none());
    }

    #[test]
    fn test_codepoint_range_missing_operand() {
        let ln = line("41..");
        assert_eq!(ln.codepoint_range(0), CodepointRange::default());
        assert_eq!(
            ln.err(),
            Some(&FieldError::Malformed {
                index: 0,
                kind: FieldKind::CodepointRange,
                text: "41..".to_string(),
            })
        );
    }

    #[test]
    fn test_codepoints_sequence() {
        let ln = line("0 1 2  3; 0006 0007;");
        assert_eq!(ln.codepoints(0), vec![0, 1, 2, 3]);
        assert_eq!(ln.codepoints(1), vec![6, 7]);
        assert_eq!(ln.codepoints(2), Vec::<u32>::new());
        assert!(ln.err().is_none());
    }

    #[test]
    fn test_codepoints_discards_partial_result() {
        let ln = line("0041 zz 0043");
        assert!(ln.codepoints(0).is_empty());
        assert_eq!(
            ln.err(),
            Some(&FieldError::Malformed {
                index: 0,
                kind: FieldKind::Codepoint,
                text: "zz".to_string(),
            })
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let ln = line("a;b");
        assert_eq!(ln.string(2), "");
        assert_eq!(
            ln.err(),
            Some(&FieldError::IndexOutOfRange {
                index: 2,
                available: 2
            })
        );
    }

    #[test]
    fn test_fault_is_sticky() {
        let ln = line("x; 42; 0041");
        assert_eq!(ln.int(0), 0);
        let first = ln.err().cloned();
        assert!(first.is_some());

        // Valid fields now read as zero values and the fault is unchanged.
        assert_eq!(ln.int(1), 0);
        assert_eq!(ln.codepoint(2), 0);
        assert_eq!(ln.string(1), "");
        assert_eq!(ln.string(9), "");
        ln.fail("ignored");
        assert_eq!(ln.err().cloned(), first);
    }

    #[test]
    fn test_fail_and_take_err() {
        let mut ln = line("a");
        ln.fail("unknown property");
        assert_eq!(
            ln.err(),
            Some(&FieldError::Rejected("unknown property".to_string()))
        );
        assert!(ln.take_err().is_some());
        assert_eq!(ln.string(0), "a");
    }

    #[test]
    fn test_error_messages() {
        let ln = line("zz");
        ln.codepoint(0);
        assert_eq!(
            ln.err().map(|e| e.to_string()),
            Some("malformed codepoint in field 0: 'zz'".to_string())
        );
    }

    #[test]
    fn test_range_helpers() {
        let r = CodepointRange::new(0x41, 0x5A);
        assert_eq!(r.len(), 26);
        assert!(r.contains(0x50));
        assert!(!r.contains(0x5B));
        assert!(CodepointRange::new(2, 1).is_empty());
        assert_eq!(r.to_string(), "0x41..0x5a");
        assert_eq!(CodepointRange::new(0, 5).to_string(), "0x0..0x5");
    }
}
