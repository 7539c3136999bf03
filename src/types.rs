//! Common types used throughout the editor.

use std::fmt;

/// Default number of lines the buffer can hold.
pub const MAX_LINES: usize = 25;

/// Default depth of each history stack (undo and redo alike).
pub const HISTORY_DEPTH: usize = 3;

/// A single reversible edit.
///
/// Each variant carries everything needed to both undo and redo the edit without looking at
/// the buffer again. Records are never mutated once they reach a history stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// A line was inserted at `index`.
    ///
    /// `padding` counts the empty lines that had to be appended first because `index` was past
    /// the end of the buffer. Undo removes them together with the inserted line.
    InsertLine { index: usize, inserted_text: String, padding: usize },
    /// The line at `index` was removed.
    DeleteLine { index: usize, removed_text: String },
    /// The line at `index` was replaced.
    UpdateLine { index: usize, old_text: String, new_text: String },
    /// `inserted_text` was spliced into a line at char position `char_pos`.
    InsertSubstring { line_index: usize, char_pos: usize, inserted_text: String, old_line: String },
    /// `deleted_length` chars were removed from a line starting at `char_pos`.
    ///
    /// `deleted_length` is already clamped to what the line actually held.
    DeleteSubstring { line_index: usize, char_pos: usize, deleted_length: usize, old_line: String },
}

impl Operation {
    /// Short name used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsertLine { .. } => "insert_line",
            Self::DeleteLine { .. } => "delete_line",
            Self::UpdateLine { .. } => "update_line",
            Self::InsertSubstring { .. } => "insert_substring",
            Self::DeleteSubstring { .. } => "delete_substring",
        }
    }

    /// The (0-based) line this operation targets.
    pub fn line(&self) -> usize {
        match self {
            Self::InsertLine { index, .. }
            | Self::DeleteLine { index, .. }
            | Self::UpdateLine { index, .. } => *index,
            Self::InsertSubstring { line_index, .. } | Self::DeleteSubstring { line_index, .. } => {
                *line_index
            }
        }
    }
}

/// Which of the two history stacks an operation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryKind {
    Undo,
    Redo,
}

impl fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undo => f.write_str("undo"),
            Self::Redo => f.write_str("redo"),
        }
    }
}

/// Location of a search hit.
///
/// - `line`: line index (0-based)
/// - `column`: **char index** within that line (0-based). This is *not* a byte index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub line: usize,
    pub column: usize,
}
