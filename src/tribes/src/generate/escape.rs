//! String escaping for emitted single-quoted literals.

use std::fmt::Write;

/// Escape a string for a single-quoted source literal: backslash, quote and
/// control whitespace get named escapes, anything outside printable ASCII a
/// 4-hex numeric escape per UTF-16 unit.
pub fn escape_single_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(ch),
            _ => {
                // Never fails when writing into a String. Characters beyond
                // the basic multilingual plane need a surrogate pair, since a
                // \uXXXX escape carries at most four hex digits.
                for unit in ch.encode_utf16(&mut [0u16; 2]) {
                    let _ = write!(out, "\\u{unit:04x}");
                }
            }
        }
    }
    out
}
