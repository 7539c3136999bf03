//! Undo/redo operations.
//!
//! The two directions are deliberately not symmetric:
//! - undo writes the inverse straight into the buffer; it must not go through the edit path,
//!   because committing a fresh edit would wipe the redo stack it is about to push onto.
//! - redo goes back through the validated `apply_*` helpers of the edit path, but hands the
//!   result to `History::push_undo`, which leaves the rest of the redo stack in place.

use super::Editor;
use crate::error::EditorError;
use crate::types::{HistoryKind, Operation};
use tracing::{debug, warn};

impl Editor {
    /// Undo the most recent edit.
    pub fn undo(&mut self) -> Result<(), EditorError> {
        let op = self.history.pop_undo().ok_or(EditorError::EmptyHistory(HistoryKind::Undo))?;
        if let Err(e) = self.apply_inverse(&op) {
            warn!(kind = op.kind(), error = %e, "undo record no longer matches the buffer");
            self.history.push_undo(op);
            return Err(e);
        }
        debug!(kind = op.kind(), line = op.line() + 1, "undone");
        self.history.push_redo(op);
        self.dirty = true;
        Ok(())
    }

    /// Redo the most recently undone edit.
    pub fn redo(&mut self) -> Result<(), EditorError> {
        let op = self.history.pop_redo().ok_or(EditorError::EmptyHistory(HistoryKind::Redo))?;
        match self.apply_forward(&op) {
            Ok(done) => {
                debug!(kind = done.kind(), line = done.line() + 1, "redone");
                self.history.push_undo(done);
                self.dirty = true;
                Ok(())
            }
            Err(e) => {
                warn!(kind = op.kind(), error = %e, "redo record no longer matches the buffer");
                self.history.push_redo(op);
                Err(e)
            }
        }
    }

    /// Put the buffer back the way it was before `op`, bypassing history entirely.
    fn apply_inverse(&mut self, op: &Operation) -> Result<(), EditorError> {
        match op {
            Operation::InsertLine { index, padding, .. } => {
                let start = index.checked_sub(*padding).ok_or(EditorError::LineOutOfRange {
                    index: *index,
                    count: self.buf.line_count(),
                })?;
                self.buf.remove_lines(start, index + 1)?;
            }
            Operation::DeleteLine { index, removed_text } => {
                if *index > self.buf.line_count() {
                    return Err(EditorError::LineOutOfRange { index: *index, count: self.buf.line_count() });
                }
                self.buf.insert_line(*index, removed_text.clone())?;
            }
            Operation::UpdateLine { index, old_text: old_line, .. }
            | Operation::InsertSubstring { line_index: index, old_line, .. }
            | Operation::DeleteSubstring { line_index: index, old_line, .. } => {
                self.buf.replace_line(*index, old_line.clone())?;
            }
        }
        Ok(())
    }

    /// Re-run `op` through the edit path, returning the record of what was done this time.
    fn apply_forward(&mut self, op: &Operation) -> Result<Operation, EditorError> {
        match op {
            Operation::InsertLine { index, inserted_text, .. } => self.apply_insert_line(*index, inserted_text),
            Operation::DeleteLine { index, .. } => self.apply_delete_line(*index),
            Operation::UpdateLine { index, new_text, .. } => self.apply_update_line(*index, new_text),
            Operation::InsertSubstring { line_index, char_pos, inserted_text, old_line } => {
                self.apply_insert_substring(*line_index, old_line.clone(), *char_pos, inserted_text)
            }
            Operation::DeleteSubstring { line_index, char_pos, deleted_length, old_line } => {
                self.apply_delete_substring(*line_index, old_line.clone(), *char_pos, *deleted_length)
                    .map(|(op, _)| op)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{editor_with, snapshot};
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn undo_on_empty_history_reports_it() {
        let mut ed = editor_with(&["a"]);
        assert_eq!(ed.undo(), Err(EditorError::EmptyHistory(HistoryKind::Undo)));
        assert_eq!(ed.redo(), Err(EditorError::EmptyHistory(HistoryKind::Redo)));
        assert_eq!(ed.read_all(), ["a"]);
        assert!(!ed.is_dirty());
    }

    #[test]
    fn undo_each_kind() {
        let mut ed = editor_with(&["alpha", "beta"]);
        let before = snapshot(&ed);

        ed.insert_line(1, "inserted").unwrap();
        ed.undo().unwrap();
        assert_eq!(snapshot(&ed), before);

        ed.delete_line(0).unwrap();
        ed.undo().unwrap();
        assert_eq!(snapshot(&ed), before);

        ed.update_line(1, "BETA").unwrap();
        ed.undo().unwrap();
        assert_eq!(snapshot(&ed), before);

        ed.insert_substring(0, 5, "bet").unwrap();
        ed.undo().unwrap();
        assert_eq!(snapshot(&ed), before);

        ed.delete_substring(1, 1, 2).unwrap();
        ed.undo().unwrap();
        assert_eq!(snapshot(&ed), before);
    }

    #[test]
    fn undo_of_padded_insert_removes_padding() {
        let mut ed = editor_with(&["a", "b"]);
        ed.insert_line(9, "x").unwrap();
        assert_eq!(ed.line_count(), 10);
        ed.undo().unwrap();
        assert_eq!(ed.read_all(), ["a", "b"]);
        ed.redo().unwrap();
        assert_eq!(ed.line_count(), 10);
        assert_eq!(ed.read_line(9), Ok("x"));
    }

    #[test]
    fn undo_then_redo_restores_each_kind() {
        type Edit = fn(&mut Editor);
        let edits: [Edit; 5] = [
            |ed| ed.insert_line(0, "top").unwrap(),
            |ed| ed.delete_line(1).unwrap(),
            |ed| ed.update_line(0, "changed").unwrap(),
            |ed| ed.insert_substring(1, 2, "++").unwrap(),
            |ed| {
                ed.delete_substring(0, 1, 50).unwrap();
            }
        ];
        for edit in edits {
            let mut ed = editor_with(&["first", "second", "third"]);
            edit(&mut ed);
            let after = snapshot(&ed);
            ed.undo().unwrap();
            ed.redo().unwrap();
            assert_eq!(snapshot(&ed), after);
            assert_eq!(ed.history_len(), (1, 0));
        }
    }

    #[test]
    fn redo_records_the_same_operation() {
        let mut ed = editor_with(&["0123456789"]);
        ed.delete_substring(0, 3, 100).unwrap();
        ed.undo().unwrap();
        ed.redo().unwrap();
        assert_eq!(ed.read_line(0), Ok("012"));
        // Undoing the redone edit restores the full line again.
        ed.undo().unwrap();
        assert_eq!(ed.read_line(0), Ok("0123456789"));
    }

    #[test]
    fn three_undos_restore_original() {
        let mut ed = editor_with(&["one", "two", "three"]);
        let before = snapshot(&ed);
        ed.update_line(0, "ONE").unwrap();
        ed.insert_substring(1, 3, "!").unwrap();
        ed.delete_line(2).unwrap();
        for _ in 0..3 {
            ed.undo().unwrap();
        }
        assert_eq!(snapshot(&ed), before);
        assert_eq!(ed.undo(), Err(EditorError::EmptyHistory(HistoryKind::Undo)));
    }

    #[test]
    fn fourth_edit_evicts_oldest_undo() {
        let mut ed = editor_with(&["v0"]);
        for n in 1..=4 {
            ed.update_line(0, &format!("v{n}")).unwrap();
        }
        assert_eq!(ed.history_len(), (3, 0));
        for _ in 0..3 {
            ed.undo().unwrap();
        }
        // The v0 -> v1 step was evicted, so v1 is as far back as we can go.
        assert_eq!(ed.read_line(0), Ok("v1"));
        assert_eq!(ed.undo(), Err(EditorError::EmptyHistory(HistoryKind::Undo)));
    }

    #[test]
    fn new_edit_after_undo_clears_redo() {
        let mut ed = editor_with(&["a", "b"]);
        ed.update_line(0, "A").unwrap();
        ed.update_line(1, "B").unwrap();
        ed.undo().unwrap();
        ed.undo().unwrap();
        assert_eq!(ed.history_len(), (0, 2));

        ed.insert_line(0, "fresh").unwrap();
        assert_eq!(ed.history_len(), (1, 0));
        assert_eq!(ed.redo(), Err(EditorError::EmptyHistory(HistoryKind::Redo)));
    }

    #[test]
    fn redo_does_not_clear_remaining_redo_entries() {
        // Redo re-runs the edit path, but must not behave like a fresh edit.
        let mut ed = editor_with(&["a", "b", "c"]);
        ed.update_line(0, "A").unwrap();
        ed.update_line(1, "B").unwrap();
        ed.update_line(2, "C").unwrap();
        for _ in 0..3 {
            ed.undo().unwrap();
        }
        assert_eq!(ed.history_len(), (0, 3));

        ed.redo().unwrap();
        assert_eq!(ed.history_len(), (1, 2));
        ed.redo().unwrap();
        ed.redo().unwrap();
        assert_eq!(ed.read_all(), ["A", "B", "C"]);
        assert_eq!(ed.history_len(), (3, 0));
    }

    #[test]
    fn undo_does_not_push_onto_undo() {
        // Undo bypasses the edit path entirely, so it never records itself.
        let mut ed = editor_with(&["a"]);
        ed.update_line(0, "b").unwrap();
        ed.undo().unwrap();
        assert_eq!(ed.history_len(), (0, 1));
    }

    #[derive(Debug, Clone)]
    enum Step {
        Insert(usize, String),
        Update(usize, String),
        Delete(usize),
        InsertSub(usize, usize, String),
        DeleteSub(usize, usize, usize),
    }

    fn step() -> impl Strategy<Value = Step> {
        let text = "[a-z ]{0,6}";
        prop_oneof![
            (0usize..12, text).prop_map(|(i, t)| Step::Insert(i, t)),
            (0usize..6, text).prop_map(|(i, t)| Step::Update(i, t)),
            (0usize..6).prop_map(Step::Delete),
            (0usize..6, 0usize..8, text).prop_map(|(l, p, t)| Step::InsertSub(l, p, t)),
            (0usize..6, 0usize..8, 0usize..10).prop_map(|(l, p, n)| Step::DeleteSub(l, p, n)),
        ]
    }

    /// Run `step`, returning whether it changed anything.
    fn run(ed: &mut Editor, step: &Step) -> bool {
        match step {
            Step::Insert(i, t) => ed.insert_line(*i, t).is_ok(),
            Step::Update(i, t) => ed.update_line(*i, t).is_ok(),
            Step::Delete(i) => ed.delete_line(*i).is_ok(),
            Step::InsertSub(l, p, t) => ed.insert_substring(*l, *p, t).is_ok(),
            Step::DeleteSub(l, p, n) => ed.delete_substring(*l, *p, *n).is_ok(),
        }
    }

    proptest! {
        #[test]
        fn undoing_every_applied_edit_restores_the_buffer(steps in prop::collection::vec(step(), 1..=3)) {
            let mut ed = editor_with(&["alpha", "beta", "gamma delta"]);
            let before = snapshot(&ed);
            let applied = steps.iter().filter(|s| run(&mut ed, s)).count();
            for _ in 0..applied {
                prop_assert!(ed.undo().is_ok());
            }
            prop_assert_eq!(snapshot(&ed), before);
        }

        #[test]
        fn undo_then_redo_is_a_no_op(steps in prop::collection::vec(step(), 1..=3)) {
            let mut ed = editor_with(&["alpha", "beta", "gamma delta"]);
            let applied = steps.iter().filter(|s| run(&mut ed, s)).count();
            prop_assume!(applied > 0);
            let after = snapshot(&ed);
            prop_assert!(ed.undo().is_ok());
            prop_assert!(ed.redo().is_ok());
            prop_assert_eq!(snapshot(&ed), after);
        }

        #[test]
        fn failed_edits_change_nothing(step in step()) {
            let mut ed = editor_with(&["alpha", "beta"]);
            let before = snapshot(&ed);
            if !run(&mut ed, &step) {
                prop_assert_eq!(snapshot(&ed), before);
                prop_assert_eq!(ed.history_len(), (0, 0));
                prop_assert!(!ed.is_dirty());
            }
        }
    }
}
