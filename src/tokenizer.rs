//! Line tokenizer.
//!
//! Splits one line of UCD text into a comment, an optional `@` part
//! header and `;`-separated fields. Results are stored as byte spans
//! into the line's own text buffer.
//!
//! Grammar:
//! - the first `#` starts the comment; there is no escape
//! - a body starting with `@` is a part header
//! - any other non-empty body is split on every `;`, each field trimmed

use crate::line::Line;
use memchr::{memchr, memchr_iter};
use std::ops::Range;

/// Copy `text` into `line` and tokenize it.
///
/// Clears the previous fields, part, comment and fault, and advances
/// the line index by one.
pub fn split_line(text: &str, line: &mut Line) {
    line.text.clear();
    line.text.push_str(text);
    tokenize(line);
}

/// Tokenize the text already held in `line.text`.
pub(crate) fn tokenize(line: &mut Line) {
    line.index += 1;
    line.fields.clear();
    line.part = 0..0;
    line.comment = 0..0;
    line.fault.take();

    let text = line.text.as_str();
    let mut body = trim_span(text, 0..text.len());

    if let Some(p) = memchr(b'#', &text.as_bytes()[body.clone()]) {
        let hash = body.start + p;
        line.comment = trim_span(text, hash + 1..body.end);
        body = trim_span(text, body.start..hash);
    }

    if body.is_empty() {
        return;
    }

    if text.as_bytes()[body.start] == b'@' {
        line.part = trim_span(text, body.start + 1..body.end);
        return;
    }

    let bytes = &text.as_bytes()[body.clone()];
    let mut start = body.start;
    for p in memchr_iter(b';', bytes) {
        let end = body.start + p;
        line.fields.push(trim_span(text, start..end));
        start = end + 1;
    }
    line.fields.push(trim_span(text, start..body.end));
}

/// Narrow `span` so that `text[span]` has no surrounding whitespace.
#[inline]
fn trim_span(text: &str, span: Range<usize>) -> Range<usize> {
    let s = &text[span.clone()];
    let start = span.start + (s.len() - s.trim_start().len());
    let end = span.start + s.trim_end().len();
    start.min(end)..end
}
