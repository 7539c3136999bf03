//! The five mutating edit operations.
//!
//! Each public operation runs an `apply_*` helper, which validates, mutates the buffer and hands
//! back the record describing what it did. The record is then committed to history. Redo reuses
//! the same `apply_*` helpers but commits differently (see `undo.rs`).

use super::Editor;
use crate::buffer::{owned_line, splice_in, splice_out};
use crate::error::EditorError;
use crate::types::Operation;
use tracing::debug;

/// Lines are stored one per file line, so a line break cannot be part of a line.
fn check_text(text: &str) -> Result<(), EditorError> {
    if text.contains(['\n', '\r']) {
        return Err(EditorError::InvalidText);
    }
    Ok(())
}

impl Editor {
    /// Insert a new line at `index` (0-based). Past the end, empty lines are added first.
    pub fn insert_line(&mut self, index: usize, text: &str) -> Result<(), EditorError> {
        let op = self.apply_insert_line(index, text)?;
        self.commit(op);
        Ok(())
    }

    /// Replace the content of line `index`.
    pub fn update_line(&mut self, index: usize, text: &str) -> Result<(), EditorError> {
        let op = self.apply_update_line(index, text)?;
        self.commit(op);
        Ok(())
    }

    /// Remove line `index`.
    pub fn delete_line(&mut self, index: usize) -> Result<(), EditorError> {
        let op = self.apply_delete_line(index)?;
        self.commit(op);
        Ok(())
    }

    /// Insert `text` into line `line_index` at char position `char_pos` (`0..=len`).
    ///
    /// `char_pos` counts characters, not bytes.
    pub fn insert_substring(&mut self, line_index: usize, char_pos: usize, text: &str) -> Result<(), EditorError> {
        let old_line = self.buf.line(line_index)?.to_string();
        let op = self.apply_insert_substring(line_index, old_line, char_pos, text)?;
        self.commit(op);
        Ok(())
    }

    /// Delete up to `length` chars from line `line_index` starting at `char_pos` (`0..len`).
    ///
    /// `char_pos` and `length` count characters, not bytes. Returns how many chars were actually
    /// removed after clamping to the end of the line.
    pub fn delete_substring(&mut self, line_index: usize, char_pos: usize, length: usize) -> Result<usize, EditorError> {
        let old_line = self.buf.line(line_index)?.to_string();
        let (op, removed) = self.apply_delete_substring(line_index, old_line, char_pos, length)?;
        self.commit(op);
        Ok(removed)
    }

    /// Record a fresh edit. This is what invalidates redo.
    fn commit(&mut self, op: Operation) {
        debug!(kind = op.kind(), line = op.line() + 1, "edit applied");
        self.history.record(op);
        self.dirty = true;
    }

    pub(super) fn apply_insert_line(&mut self, index: usize, text: &str) -> Result<Operation, EditorError> {
        check_text(text)?;
        let line = owned_line(text)?;
        let inserted_text = owned_line(text)?;
        let padding = self.buf.insert_line(index, line)?;
        Ok(Operation::InsertLine { index, inserted_text, padding })
    }

    pub(super) fn apply_update_line(&mut self, index: usize, text: &str) -> Result<Operation, EditorError> {
        check_text(text)?;
        self.buf.line(index)?;
        let line = owned_line(text)?;
        let new_text = owned_line(text)?;
        let old_text = self.buf.replace_line(index, line)?;
        Ok(Operation::UpdateLine { index, old_text, new_text })
    }

    pub(super) fn apply_delete_line(&mut self, index: usize) -> Result<Operation, EditorError> {
        let removed_text = self.buf.remove_line(index)?;
        Ok(Operation::DeleteLine { index, removed_text })
    }

    /// Splice `text` into `old_line` and store the result as line `line_index`.
    ///
    /// `old_line` is the content the edit starts from. For a fresh edit it is the current line;
    /// for redo it is the snapshot kept in the record.
    pub(super) fn apply_insert_substring(
        &mut self,
        line_index: usize,
        old_line: String,
        char_pos: usize,
        text: &str,
    ) -> Result<Operation, EditorError> {
        check_text(text)?;
        self.buf.line(line_index)?;
        let new_line = splice_in(&old_line, char_pos, text)?;
        let inserted_text = owned_line(text)?;
        self.buf.replace_line(line_index, new_line)?;
        Ok(Operation::InsertSubstring { line_index, char_pos, inserted_text, old_line })
    }

    /// Cut up to `length` chars out of `old_line` and store the result as line `line_index`.
    ///
    /// Also returns the clamped count of chars removed.
    pub(super) fn apply_delete_substring(
        &mut self,
        line_index: usize,
        old_line: String,
        char_pos: usize,
        length: usize,
    ) -> Result<(Operation, usize), EditorError> {
        self.buf.line(line_index)?;
        let (new_line, deleted_length) = splice_out(&old_line, char_pos, length)?;
        self.buf.replace_line(line_index, new_line)?;
        Ok((Operation::DeleteSubstring { line_index, char_pos, deleted_length, old_line }, deleted_length))
    }
}
