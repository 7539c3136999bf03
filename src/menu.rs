//! The interactive menu loop.
//!
//! Reads a choice, collects the arguments that choice needs, runs it on the [`Editor`] and prints
//! the outcome. Line numbers are 1-based at the prompt and converted before reaching the editor;
//! character positions are 0-based throughout.

use crate::commands::{Action, Command, CommandRegistry};
use crate::editor::Editor;
use crate::error::EditorError;
use crate::utils::{digits, read_line_lossy};
use anyhow::Result;
use crossterm::style::{style, Stylize};
use std::io::{BufRead, Write};
use tracing::{debug, error, warn};

#[derive(Clone, Copy)]
enum Tone {
    Title,
    Prompt,
    Ok,
    Error,
}

/// Run the menu until Exit is chosen or input ends.
pub fn run<R: BufRead, W: Write>(editor: &mut Editor, input: R, out: W, color: bool) -> Result<()> {
    Menu { editor, input, out, commands: CommandRegistry::builtin(), color, quit_armed: false, closed: false }.run()
}

struct Menu<'a, R, W> {
    editor: &'a mut Editor,
    input: R,
    out: W,
    commands: CommandRegistry,
    color: bool,
    /// Set after an Exit was refused because of unsaved changes.
    quit_armed: bool,
    /// Input ended while a command was still collecting its arguments.
    closed: bool,
}

impl<R: BufRead, W: Write> Menu<'_, R, W> {
    fn run(&mut self) -> Result<()> {
        loop {
            self.show_menu()?;
            let Some(choice) = self.read_input()? else {
                writeln!(self.out)?;
                debug!("input closed");
                break;
            };
            let Some(cmd) = self.commands.resolve(&choice).cloned() else {
                self.invalid_choice(&choice)?;
                continue;
            };
            if cmd.action != Action::Exit {
                self.quit_armed = false;
            }
            if self.dispatch(&cmd)? || self.closed {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    fn show_menu(&mut self) -> Result<()> {
        let (undo, redo) = self.editor.history_len();
        let header = format!(
            "===== {}{} =====",
            self.editor.file_path().display(),
            if self.editor.is_dirty() { " [modified]" } else { "" }
        );
        let header = self.paint(&header, Tone::Title);
        writeln!(self.out)?;
        writeln!(self.out, "{header}")?;
        writeln!(
            self.out,
            "Lines: {}/{}  Undo: {undo}  Redo: {redo}",
            self.editor.line_count(),
            self.editor.capacity()
        )?;
        for cmd in self.commands.iter() {
            writeln!(self.out, "{:>2}. {}", cmd.number, cmd.label)?;
        }
        let prompt = self.paint("Enter your choice: ", Tone::Prompt);
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        Ok(())
    }

    fn invalid_choice(&mut self, choice: &str) -> Result<()> {
        let mut msg = "Invalid choice.".to_string();
        if let Some(cmd) = self.commands.suggest_command(choice) {
            msg.push_str(&format!(" Did you mean '{}' ({})?", cmd.name, cmd.number));
        }
        self.report_error(&msg)
    }

    /// Run one menu entry. Returns `true` when the session should end.
    fn dispatch(&mut self, cmd: &Command) -> Result<bool> {
        debug!(action = ?cmd.action, "menu choice");
        match cmd.action {
            Action::ReadAll => self.read_all()?,
            Action::ReadLine => {
                let Some(index) = self.ask_line_index("Enter line number: ")? else { return Ok(false) };
                match self.editor.read_line(index) {
                    Ok(line) => {
                        let line = line.to_string();
                        writeln!(self.out, "Line {}: {line}", index + 1)?;
                    }
                    Err(e) => self.report(&e)?,
                }
            }
            Action::InsertLine => {
                let Some(index) = self.ask_line_index("Enter line number (1-based): ")? else { return Ok(false) };
                let Some(text) = self.ask("Enter new line text: ")? else { return Ok(false) };
                let res = self.editor.insert_line(index, &text);
                self.outcome(res.map(|()| format!("Inserted new line at {}.", index + 1)))?;
            }
            Action::UpdateLine => {
                let Some(index) = self.ask_line_index("Enter line number: ")? else { return Ok(false) };
                let Some(text) = self.ask("Enter new line text: ")? else { return Ok(false) };
                let res = self.editor.update_line(index, &text);
                self.outcome(res.map(|()| format!("Updated line {}.", index + 1)))?;
            }
            Action::DeleteLine => {
                let Some(index) = self.ask_line_index("Enter line number: ")? else { return Ok(false) };
                let res = self.editor.delete_line(index);
                self.outcome(res.map(|()| format!("Deleted line {}.", index + 1)))?;
            }
            Action::Search => {
                let Some(answer) = self.ask("Enter word to search: ")? else { return Ok(false) };
                let word = answer.split_whitespace().next().unwrap_or("");
                let msg = match self.editor.search(word) {
                    Some(m) => format!("Word '{word}' found at line {}, position {}", m.line + 1, m.column),
                    None => format!("Word '{word}' not found."),
                };
                writeln!(self.out, "{msg}")?;
            }
            Action::InsertSubstring => {
                let Some(line) = self.ask_line_index("Enter line number (1-based): ")? else { return Ok(false) };
                let Some(pos) = self.ask_number("Enter character position (0-based): ", "character position")? else {
                    return Ok(false);
                };
                let Some(text) = self.ask("Enter text to insert: ")? else { return Ok(false) };
                let res = self.editor.insert_substring(line, pos, &text);
                self.outcome(res.map(|()| format!("Inserted word at line {}, position {pos}.", line + 1)))?;
            }
            Action::DeleteSubstring => {
                let Some(line) = self.ask_line_index("Enter line number (1-based): ")? else { return Ok(false) };
                let Some(pos) = self.ask_number("Enter start char position: ", "character position")? else {
                    return Ok(false);
                };
                let Some(len) = self.ask_number("Enter length to delete: ", "length")? else { return Ok(false) };
                let res = self.editor.delete_substring(line, pos, len);
                self.outcome(res.map(|n| format!("Deleted {n} chars in line {}.", line + 1)))?;
            }
            Action::Undo => {
                let res = self.editor.undo();
                self.outcome(res.map(|()| "Undo done.".to_string()))?;
            }
            Action::Redo => {
                let res = self.editor.redo();
                self.outcome(res.map(|()| "Redo done.".to_string()))?;
            }
            Action::Save => match self.editor.save() {
                Ok(()) => {
                    let msg = self.paint(&format!("File saved: {}", self.editor.file_path().display()), Tone::Ok);
                    writeln!(self.out, "{msg}")?;
                }
                Err(e) => {
                    error!("{e:#}");
                    self.report_error(&format!("Unable to save: {e:#}"))?;
                }
            },
            Action::Exit => {
                if self.editor.is_dirty() && !self.quit_armed {
                    self.quit_armed = true;
                    self.report_error("Unsaved changes! Choose Exit again to quit without saving.")?;
                    return Ok(false);
                }
                writeln!(self.out, "Exiting...")?;
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn read_all(&mut self) -> Result<()> {
        let width = digits(self.editor.line_count());
        writeln!(self.out, "------ Buffer Start ------")?;
        for (i, line) in self.editor.read_all().iter().enumerate() {
            writeln!(self.out, "Line {:>width$}: {line}", i + 1)?;
        }
        writeln!(self.out, "------ Buffer End   ------")?;
        Ok(())
    }

    /// Print the result of an editing operation.
    fn outcome(&mut self, res: Result<String, EditorError>) -> Result<()> {
        match res {
            Ok(msg) => {
                let msg = self.paint(&msg, Tone::Ok);
                writeln!(self.out, "{msg}")?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn report(&mut self, e: &EditorError) -> Result<()> {
        debug!(error = %e, "operation refused");
        let mut msg = e.to_string();
        if let Some(first) = msg.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        self.report_error(&format!("{msg}."))
    }

    fn report_error(&mut self, msg: &str) -> Result<()> {
        let msg = self.paint(msg, Tone::Error);
        writeln!(self.out, "{msg}")?;
        Ok(())
    }

    /// Prompt for a 1-based line number and convert it to an index.
    ///
    /// `None` means the command should be dropped: the answer was invalid or input ended.
    fn ask_line_index(&mut self, prompt: &str) -> Result<Option<usize>> {
        let Some(answer) = self.ask(prompt)? else { return Ok(None) };
        match answer.trim().parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(index) => Ok(Some(index)),
            None => {
                self.report_error("Invalid line number.")?;
                Ok(None)
            }
        }
    }

    /// Prompt for a non-negative number.
    fn ask_number(&mut self, prompt: &str, what: &str) -> Result<Option<usize>> {
        let Some(answer) = self.ask(prompt)? else { return Ok(None) };
        match answer.trim().parse::<usize>() {
            Ok(n) => Ok(Some(n)),
            Err(_) => {
                self.report_error(&format!("Invalid {what}."))?;
                Ok(None)
            }
        }
    }

    /// Prompt and read one line, or `None` once input has ended.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let prompt = self.paint(prompt, Tone::Prompt);
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let answer = self.read_input()?;
        if answer.is_none() {
            writeln!(self.out)?;
            debug!("input closed before the command was complete, dropping it");
            self.closed = true;
        }
        Ok(answer)
    }

    /// Read one line without its line ending, or `None` at end of input.
    fn read_input(&mut self) -> Result<Option<String>> {
        let Some((line, replaced)) = read_line_lossy(&mut self.input)? else { return Ok(None) };
        if replaced {
            warn!("invalid UTF-8 in input replaced");
        }
        Ok(Some(line))
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.color {
            return text.to_string();
        }
        match tone {
            Tone::Title => style(text).bold().cyan().to_string(),
            Tone::Prompt => style(text).yellow().to_string(),
            Tone::Ok => style(text).green().to_string(),
            Tone::Error => style(text).red().to_string(),
        }
    }
}
