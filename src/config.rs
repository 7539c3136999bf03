//! Optional `lined.toml` configuration.

use crate::types::{HISTORY_DEPTH, MAX_LINES};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "lined.toml";

/// Parsed representation of `lined.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// File opened when none is named on the command line.
    pub default_file: String,
    /// Line capacity of the buffer.
    pub max_lines: usize,
    /// Depth of the undo and redo stacks.
    pub history_depth: usize,
    /// Style the menu with colors (only honored on a terminal).
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_file: "file.txt".to_string(),
            max_lines: MAX_LINES,
            history_depth: HISTORY_DEPTH,
            color: true,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, `lined.toml` in the working directory is used
    /// when present and the defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(p) => (p, true),
            None => (Path::new(CONFIG_FILE), false),
        };
        let text = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound && !required => return Ok(Self::default()),
            Err(e) => return Err(e).with_context(|| format!("Reading {}", path.display())),
        };
        Self::parse(&text).with_context(|| format!("Parsing {}", path.display()))
    }

    fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        if config.max_lines == 0 {
            bail!("max_lines must be at least 1");
        }
        if config.history_depth == 0 {
            bail!("history_depth must be at least 1");
        }
        if config.default_file.trim().is_empty() {
            bail!("default_file must not be empty");
        }
        Ok(config)
    }
}
