//! File operations: open, save, search.

use super::Editor; // editor state
use crate::buffer::Buffer; // document model
use crate::config::Config; // capacities
use crate::types::Match; // search result
use crate::utils::{byte_to_char_index, read_line_lossy}; // index conversion, line decoding
use anyhow::{Context, Result}; // anyhow error handling
use std::fs::File; // file system access
use std::io::{self, BufReader, BufWriter}; // buffered line I/O
use std::path::PathBuf; // file path handling
use tracing::{info, warn};

impl Editor {
    /// Create a session for `path` and load it.
    ///
    /// A missing file is not an error: the session simply starts empty and the file is created on
    /// the first save.
    pub fn open(path: PathBuf, config: &Config) -> Result<Self> {
        let mut ed = Self::new(path, config);
        let file = match File::open(&ed.file_path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %ed.file_path.display(), "file does not exist yet, starting empty");
                return Ok(ed);
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to open {}", ed.file_path.display())),
        };

        let capacity = ed.buf.capacity();
        let mut reader = BufReader::new(file);
        let mut lines = Vec::new();
        while let Some((line, replaced)) =
            read_line_lossy(&mut reader).with_context(|| format!("Failed to read {}", ed.file_path.display()))?
        {
            if lines.len() == capacity {
                warn!(path = %ed.file_path.display(), capacity, "file has more lines than the buffer holds, ignoring the rest");
                break;
            }
            if replaced {
                warn!(path = %ed.file_path.display(), line = lines.len() + 1, "invalid UTF-8 replaced");
            }
            lines.push(line);
        }
        info!(path = %ed.file_path.display(), lines = lines.len(), "loaded");
        ed.buf = Buffer::from_lines(lines, capacity);
        Ok(ed)
    }

    /// Save the buffer, overwriting the file.
    pub fn save(&mut self) -> Result<()> {
        let file = File::create(&self.file_path)
            .with_context(|| format!("Failed to create {}", self.file_path.display()))?;
        self.buf
            .write_to(BufWriter::new(file))
            .with_context(|| format!("Failed writing {}", self.file_path.display()))?;
        self.dirty = false;
        info!(path = %self.file_path.display(), lines = self.buf.line_count(), "saved");
        Ok(())
    }

    /// Find the first occurrence of `word`, scanning lines in order.
    ///
    /// An empty query never matches.
    pub fn search(&self, word: &str) -> Option<Match> {
        if word.is_empty() {
            return None;
        }
        self.buf.lines().iter().enumerate().find_map(|(line, text)| {
            let at = text.find(word)?;
            Some(Match { line, column: byte_to_char_index(text, at) })
        })
    }
}
