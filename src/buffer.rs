//! The line buffer: a bounded list of lines and the low-level splicing primitives.
//!
//! Nothing in here knows about history. Every mutating method validates its arguments first and
//! only then touches `lines`, so a returned error always means "nothing changed".

use crate::error::EditorError; // refusal reasons
use crate::utils::char_to_byte_index; // utf-8 index conversion
use std::io::{self, Write};

/// The document buffer: an ordered list of at most `capacity` lines.
///
/// Indices are always contiguous in `[0, line_count())`.
pub struct Buffer {
    lines: Vec<String>,
    capacity: usize,
}

impl Buffer {
    /// Create an empty buffer that holds at most `capacity` lines.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { lines: Vec::new(), capacity }
    }

    /// Build a buffer from already-loaded lines. Anything past `capacity` is dropped.
    pub fn from_lines(mut lines: Vec<String>, capacity: usize) -> Self {
        lines.truncate(capacity);
        Self { lines, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Borrow the line at `index`.
    pub fn line(&self, index: usize) -> Result<&str, EditorError> {
        self.lines
            .get(index)
            .map(String::as_str)
            .ok_or(EditorError::LineOutOfRange { index, count: self.lines.len() })
    }

    /// Insert `text` as the new line `index`, shifting later lines down.
    ///
    /// When `index` lies past the end, empty lines are appended until it is reachable. Returns
    /// how many such padding lines were added.
    pub fn insert_line(&mut self, index: usize, text: String) -> Result<usize, EditorError> {
        let count = self.lines.len();
        if index > self.capacity {
            return Err(EditorError::LineOutOfRange { index, count });
        }
        let padding = index.saturating_sub(count);
        if count + padding + 1 > self.capacity {
            return Err(EditorError::BufferFull { capacity: self.capacity });
        }
        self.lines.try_reserve(padding + 1)?;
        self.lines.resize(count + padding, String::new());
        self.lines.insert(index, text);
        Ok(padding)
    }

    /// Remove the line at `index`, returning its content.
    pub fn remove_line(&mut self, index: usize) -> Result<String, EditorError> {
        self.line(index)?;
        Ok(self.lines.remove(index))
    }

    /// Remove the lines in `start..end`.
    pub fn remove_lines(&mut self, start: usize, end: usize) -> Result<(), EditorError> {
        let count = self.lines.len();
        if end > count || start >= end {
            return Err(EditorError::LineOutOfRange { index: end.saturating_sub(1), count });
        }
        self.lines.drain(start..end);
        Ok(())
    }

    /// Replace the line at `index`, returning the previous content.
    pub fn replace_line(&mut self, index: usize, text: String) -> Result<String, EditorError> {
        let count = self.lines.len();
        let slot = self.lines.get_mut(index).ok_or(EditorError::LineOutOfRange { index, count })?;
        Ok(std::mem::replace(slot, text))
    }

    /// Stream every line to `writer`, each followed by `\n`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }
}

/// Copy `text` into a freshly allocated `String`, reporting allocation failure instead of aborting.
pub fn owned_line(text: &str) -> Result<String, EditorError> {
    let mut out = String::new();
    out.try_reserve_exact(text.len())?;
    out.push_str(text);
    Ok(out)
}

/// Build `line` with `text` inserted at char position `char_pos` (`0..=len`).
pub fn splice_in(line: &str, char_pos: usize, text: &str) -> Result<String, EditorError> {
    let len = line.chars().count();
    if char_pos > len {
        return Err(EditorError::CharOutOfRange { pos: char_pos, len });
    }
    let at = char_to_byte_index(line, char_pos);
    let mut out = String::new();
    out.try_reserve_exact(line.len() + text.len())?;
    out.push_str(&line[..at]);
    out.push_str(text);
    out.push_str(&line[at..]);
    Ok(out)
}

/// Build `line` with up to `length` chars removed from char position `char_pos` (`0..len`).
///
/// `length` is clamped to what remains of the line. Returns the new line together with the
/// number of chars actually removed.
pub fn splice_out(line: &str, char_pos: usize, length: usize) -> Result<(String, usize), EditorError> {
    let len = line.chars().count();
    if char_pos >= len {
        return Err(EditorError::CharOutOfRange { pos: char_pos, len });
    }
    if length == 0 {
        return Err(EditorError::InvalidLength);
    }
    let length = length.min(len - char_pos);
    let b0 = char_to_byte_index(line, char_pos);
    let b1 = char_to_byte_index(line, char_pos + length);
    let mut out = String::new();
    out.try_reserve_exact(line.len() - (b1 - b0))?;
    out.push_str(&line[..b0]);
    out.push_str(&line[b1..]);
    Ok((out, length))
}
