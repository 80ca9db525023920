//! Text sanitization and line wrapping.
//!
//! Pure, stateless helpers that turn arbitrary input strings into
//! fixed-width lines safe to embed in literal string syntax. Sanitization
//! runs first: accented characters decompose to their base letter, the
//! escape-significant characters `\`, `(` and `)` gain a backslash prefix,
//! and anything left outside printable ASCII is dropped.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Sanitize a string down to escaped printable ASCII.
///
/// NFD-decomposes the input and discards combining marks, collapses
/// non-breaking spaces to ordinary spaces, escapes `\`, `(` and `)`, and
/// drops every remaining character outside `0x20..=0x7E`.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.nfd() {
        if is_combining_mark(c) {
            continue;
        }
        let c = if c == '\u{00a0}' { ' ' } else { c };
        match c {
            '\\' | '(' | ')' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            _ => {}
        }
    }
    out
}

/// Greedily wrap `text` into sanitized lines of at most `max_line_length`
/// characters.
///
/// Words are appended while the running line fits; a single word longer than
/// the limit is hard-split into fixed-size chunks. Empty or whitespace-only
/// input yields exactly one empty line, never zero lines, so callers can
/// always advance their cursor.
pub fn wrap_lines(text: &str, max_line_length: usize) -> Vec<String> {
    let max = max_line_length.max(1);
    let clean = sanitize(text);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in clean.split_whitespace() {
        if word.len() > max {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = split_long_word(word, max, &mut lines);
            continue;
        }
        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= max {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Hard-split an over-long word into chunks of at most `max` characters,
/// pushing all full chunks and returning the trailing remainder.
///
/// In sanitized text a backslash always begins a two-character escape pair;
/// pairs are kept within one chunk so a line never ends on a dangling escape.
fn split_long_word(word: &str, max: usize, lines: &mut Vec<String>) -> String {
    let mut chunk = String::new();
    let mut chars = word.chars();
    while let Some(c) = chars.next() {
        let unit_len = if c == '\\' { 2 } else { 1 };
        if !chunk.is_empty() && chunk.len() + unit_len > max {
            lines.push(std::mem::take(&mut chunk));
        }
        chunk.push(c);
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                chunk.push(escaped);
            }
        }
    }
    chunk
}
