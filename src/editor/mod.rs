//! Editor: one editing session (buffer + history + target file) and all operations on it.

mod edit;
mod file_ops;
mod undo;

use crate::buffer::Buffer;
use crate::config::Config;
use crate::error::EditorError;
use crate::history::History;
use std::path::{Path, PathBuf};

/// The top-level session state.
///
/// There is no global state: each `Editor` owns its buffer and history outright, so independent
/// sessions never interfere with each other.
pub struct Editor {
    /// The editable document.
    pub(crate) buf: Buffer,
    /// Undo and redo stacks.
    pub(crate) history: History,
    /// Path we load from and save to.
    file_path: PathBuf,
    /// "Dirty" means there are unsaved changes.
    dirty: bool,
}

impl Editor {
    /// Create a session with an empty buffer targeting `path`. Nothing is read from disk.
    pub fn new(path: PathBuf, config: &Config) -> Self {
        Self {
            buf: Buffer::with_capacity(config.max_lines),
            history: History::new(config.history_depth),
            file_path: path,
            dirty: false,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn line_count(&self) -> usize {
        self.buf.line_count()
    }

    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Number of pending (undo, redo) entries.
    pub fn history_len(&self) -> (usize, usize) {
        (self.history.undo_len(), self.history.redo_len())
    }

    /// Read one line.
    pub fn read_line(&self, index: usize) -> Result<&str, EditorError> {
        self.buf.line(index)
    }

    /// All lines, in order.
    pub fn read_all(&self) -> &[String] {
        self.buf.lines()
    }
}
