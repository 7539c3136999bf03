//! Utility functions.

use std::borrow::Cow; // lossy decoding result
use std::cmp::min; // comparison helpers
use std::io::{self, BufRead}; // line reading

/// Convert a "character index" to a "byte index" in a UTF‑8 string.
///
/// Positions typed at the menu count characters, but `String` splicing needs byte offsets that
/// lie on UTF‑8 boundaries. Indices past the end clamp to `s.len()`.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(bi, _)| bi)
}

/// Convert a byte offset back into a character index.
pub fn byte_to_char_index(s: &str, byte_idx: usize) -> usize {
    s[..min(byte_idx, s.len())].chars().count()
}

/// Number of decimal digits in `n` (used to align line numbers when listing the buffer).
pub fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// Calculate the Levenshtein distance between two strings.
/// This is used for "did you mean?" suggestions for mistyped menu choices.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() { return b.len(); }
    if b.is_empty() { return a.len(); }

    // Single rolling row: prev[j] is the distance between a[..i] and b[..j].
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut cur = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        cur[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            cur[j] = min(prev[j] + 1, min(cur[j - 1] + 1, prev[j - 1] + cost));
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[b.len()]
}

/// Read one line without its `\n` (or `\r\n`) ending, or `None` at end of input.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than failing; the flag reports whether that
/// happened.
pub fn read_line_lossy<R: BufRead>(reader: &mut R) -> io::Result<Option<(String, bool)>> {
    let mut bytes = Vec::new();
    if reader.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
    }
    Ok(Some(match String::from_utf8_lossy(&bytes) {
        Cow::Borrowed(text) => (text.to_string(), false),
        Cow::Owned(text) => (text, true),
    }))
}
