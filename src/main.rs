//! `lined`: a small line-oriented text editor driven by a numbered menu.
//!
//! ## Reading guide (high level architecture)
//! - **`main()` / `run()`**: parses the command line, sets up logging, picks the working directory
//!   and file, then hands control to the menu.
//! - **`buffer::Buffer`**: the document model (a bounded `Vec<String>` of lines) and the low-level
//!   splicing primitives.
//! - **`history::History`**: the bounded undo and redo stacks.
//! - **`editor::Editor`**: one editing session; edit operations, undo/redo, search, load/save.
//! - **`menu::run`**: the interactive loop; prompts for arguments and prints outcomes.

mod buffer;
mod commands;
mod config;
mod editor;
mod error;
mod history;
mod menu;
mod types;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use config::Config;
use crossterm::tty::IsTty;
use editor::Editor;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "lined", version)]
#[command(about = "A small line-oriented text editor with a numbered menu")]
struct Cli {
    /// File to edit (created on first save if it does not exist)
    file: Option<PathBuf>,

    /// Directory to switch into before opening FILE
    directory: Option<PathBuf>,

    /// Configuration file (defaults to ./lined.toml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Program entry point.
fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;

    if let Some(dir) = &cli.directory {
        if let Err(e) = std::env::set_current_dir(dir) {
            warn!(dir = %dir.display(), error = %e, "chdir failed");
            println!("Warning: Failed to chdir to {}.", dir.display());
        }
    }
    let cwd = std::env::current_dir().context("Failed to resolve the working directory")?;
    let path = cwd.join(cli.file.unwrap_or_else(|| PathBuf::from(&config.default_file)));
    println!("File path: {}", path.display());

    let mut editor = Editor::open(path, &config)?;
    info!(lines = editor.line_count(), "session started");

    let stdout = io::stdout();
    let color = config.color && stdout.is_tty();
    menu::run(&mut editor, io::stdin().lock(), stdout.lock(), color)
}

/// Log to stderr so diagnostics never interleave with the menu on stdout.
///
/// `RUST_LOG` wins; otherwise `--verbose` selects `debug` and the default is `warn`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
