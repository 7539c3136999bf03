//! Errors reported by buffer and history operations.

use crate::types::HistoryKind;
use std::collections::TryReserveError;
use thiserror::Error;

/// Why an editing operation was refused.
///
/// Every operation that returns one of these has left the buffer and both history stacks
/// exactly as they were.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A line index outside the buffer.
    #[error("line {} is out of range (buffer has {count} lines)", .index + 1)]
    LineOutOfRange { index: usize, count: usize },

    /// A char position outside the target line.
    #[error("character position {pos} is out of range for a line of {len} characters")]
    CharOutOfRange { pos: usize, len: usize },

    /// The insert would grow the buffer past its capacity.
    #[error("buffer full ({capacity} lines)")]
    BufferFull { capacity: usize },

    /// Undo or redo was requested with nothing pending.
    #[error("nothing to {0}")]
    EmptyHistory(HistoryKind),

    /// A delete of zero characters.
    #[error("invalid length: nothing to delete")]
    InvalidLength,

    /// Text containing a line break, which the file format cannot represent.
    #[error("text must not contain line breaks")]
    InvalidText,

    /// Memory for the new line content could not be reserved.
    #[error("out of memory: {0}")]
    Allocation(#[from] TryReserveError),
}
