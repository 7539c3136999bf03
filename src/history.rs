//! Bounded undo/redo history.

use crate::types::{HistoryKind, Operation};
use std::collections::VecDeque;
use tracing::debug;

/// A LIFO stack of operations that holds at most `depth` entries.
///
/// Pushing onto a full stack silently drops the oldest entry.
pub struct HistoryStack {
    entries: VecDeque<Operation>,
    depth: usize,
}

impl HistoryStack {
    /// Create an empty stack. A `depth` of zero is treated as one.
    pub fn new(depth: usize) -> Self {
        let depth = depth.max(1);
        Self { entries: VecDeque::with_capacity(depth), depth }
    }

    /// Push `op` on top, returning the evicted bottom entry if the stack was full.
    pub fn push(&mut self, op: Operation) -> Option<Operation> {
        let evicted = if self.entries.len() == self.depth { self.entries.pop_front() } else { None };
        self.entries.push_back(op);
        evicted
    }

    /// Remove and return the top entry, or `None` when empty.
    pub fn pop(&mut self) -> Option<Operation> {
        self.entries.pop_back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// The undo and redo stacks of one editing session.
///
/// [`History::record`] is the only way a fresh edit enters the history, and it is also the only
/// place that invalidates redo.
pub struct History {
    undo: HistoryStack,
    redo: HistoryStack,
}

impl History {
    pub fn new(depth: usize) -> Self {
        Self { undo: HistoryStack::new(depth), redo: HistoryStack::new(depth) }
    }

    /// Record a new edit: push it onto undo and discard everything on redo.
    pub fn record(&mut self, op: Operation) {
        self.push_undo(op);
        if !self.redo.is_empty() {
            debug!(dropped = self.redo.len(), "new edit invalidates redo history");
        }
        self.redo.clear();
    }

    /// Push onto undo while leaving redo alone.
    pub fn push_undo(&mut self, op: Operation) {
        if let Some(old) = self.undo.push(op) {
            debug!(stack = %HistoryKind::Undo, kind = old.kind(), "history full, dropped oldest entry");
        }
    }

    pub fn push_redo(&mut self, op: Operation) {
        if let Some(old) = self.redo.push(op) {
            debug!(stack = %HistoryKind::Redo, kind = old.kind(), "history full, dropped oldest entry");
        }
    }

    pub fn pop_undo(&mut self) -> Option<Operation> {
        self.undo.pop()
    }

    pub fn pop_redo(&mut self) -> Option<Operation> {
        self.redo.pop()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HISTORY_DEPTH;

    fn update(n: usize) -> Operation {
        Operation::UpdateLine { index: n, old_text: format!("old{n}"), new_text: format!("new{n}") }
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut stack = HistoryStack::new(HISTORY_DEPTH);
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn stack_is_lifo() {
        let mut stack = HistoryStack::new(HISTORY_DEPTH);
        stack.push(update(1));
        stack.push(update(2));
        assert_eq!(stack.pop(), Some(update(2)));
        assert_eq!(stack.pop(), Some(update(1)));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn fourth_push_evicts_oldest() {
        let mut stack = HistoryStack::new(3);
        assert_eq!(stack.push(update(1)), None);
        assert_eq!(stack.push(update(2)), None);
        assert_eq!(stack.push(update(3)), None);
        assert_eq!(stack.push(update(4)), Some(update(1)));
        assert_eq!(stack.len(), 3);

        assert_eq!(stack.pop(), Some(update(4)));
        assert_eq!(stack.pop(), Some(update(3)));
        assert_eq!(stack.pop(), Some(update(2)));
        // The evicted record is gone for good.
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn zero_depth_still_keeps_one_entry() {
        let mut stack = HistoryStack::new(0);
        stack.push(update(1));
        assert_eq!(stack.push(update(2)), Some(update(1)));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn record_clears_redo() {
        let mut history = History::new(HISTORY_DEPTH);
        history.push_redo(update(1));
        history.push_redo(update(2));
        history.record(update(3));
        assert_eq!(history.undo_len(), 1);
        assert_eq!(history.redo_len(), 0);
        assert_eq!(history.pop_redo(), None);
    }

    #[test]
    fn push_undo_keeps_redo() {
        let mut history = History::new(HISTORY_DEPTH);
        history.push_redo(update(1));
        history.push_undo(update(2));
        assert_eq!(history.redo_len(), 1);
        assert_eq!(history.pop_undo(), Some(update(2)));
    }

    #[test]
    fn redo_stack_is_bounded_too() {
        let mut history = History::new(HISTORY_DEPTH);
        for n in 0..5 {
            history.push_redo(update(n));
        }
        assert_eq!(history.redo_len(), HISTORY_DEPTH);
        assert_eq!(history.pop_redo(), Some(update(4)));
    }
}
