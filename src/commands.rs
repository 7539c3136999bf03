//! The numbered menu: which actions exist and how typed choices resolve to them.

use crate::utils::levenshtein_distance;
use std::collections::HashMap;

/// What a menu entry does.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    ReadAll,
    ReadLine,
    InsertLine,
    UpdateLine,
    DeleteLine,
    Search,
    InsertSubstring,
    DeleteSubstring,
    Undo,
    Redo,
    Save,
    Exit,
}

/// A menu entry. It can be chosen by its `number` or by its `name`.
#[derive(Clone, Debug)]
pub struct Command {
    pub number: usize,
    pub name: &'static str,
    pub label: &'static str,
    pub action: Action,
}

/// Registry of menu entries + lookup by name.
pub struct CommandRegistry {
    commands: Vec<Command>,
    by_name: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    /// The fixed twelve-entry menu.
    pub fn builtin() -> Self {
        let mut reg = Self { commands: vec![], by_name: HashMap::new() };
        reg.register("read_all", "Read All Lines", Action::ReadAll);
        reg.register("read", "Read Specific Line", Action::ReadLine);
        reg.register("insert", "Insert New Line", Action::InsertLine);
        reg.register("update", "Update Line", Action::UpdateLine);
        reg.register("delete", "Delete Line", Action::DeleteLine);
        reg.register("search", "Search Word", Action::Search);
        reg.register("insert_word", "Insert Word at Position", Action::InsertSubstring);
        reg.register("delete_word", "Delete Word at Position", Action::DeleteSubstring);
        reg.register("undo", "Undo", Action::Undo);
        reg.register("redo", "Redo", Action::Redo);
        reg.register("save", "Save File", Action::Save);
        reg.register("exit", "Exit", Action::Exit);
        reg
    }

    /// Append an entry; numbers follow registration order starting at 1.
    fn register(&mut self, name: &'static str, label: &'static str, action: Action) {
        let number = self.commands.len() + 1;
        self.by_name.insert(name, self.commands.len());
        self.commands.push(Command { number, name, label, action });
    }

    /// Entries in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.iter()
    }

    /// Resolve a typed choice: a menu number, or an entry name (case-insensitive).
    pub fn resolve(&self, input: &str) -> Option<&Command> {
        let input = input.trim();
        if let Ok(n) = input.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.commands.get(i));
        }
        let idx = *self.by_name.get(input.to_lowercase().as_str())?;
        self.commands.get(idx)
    }

    /// Find the closest entry name using Levenshtein distance.
    pub fn suggest_command(&self, name: &str) -> Option<&Command> {
        let name = name.trim().to_lowercase();
        if name.is_empty() || name.parse::<i64>().is_ok() {
            return None;
        }
        let (dist, cmd) = self
            .commands
            .iter()
            .map(|c| (levenshtein_distance(&name, c.name), c))
            .min_by_key(|(d, _)| *d)?;

        // Only suggest if the distance is small relative to the word length.
        let threshold = name.chars().count().max(cmd.name.len()).div_ceil(3);
        (dist <= threshold.max(1)).then_some(cmd)
    }
}
