//! td: a tiny personal todo manager.
//!
//! Todos live in a plain text file, one per line:
//!
//! ```text
//! - Make bread
//! A Find that weird bug +Dev
//! ```
//!
//! Each record is keyed by a short letter identifier derived from its
//! description (see [`crate::core::ident`]). A small command language drives the
//! in-memory [`TodoStore`]:
//!
//! ```bash
//! td eval 'add A Find that weird bug +Dev' 'ls &A'
//! td ls +Dev
//! echo 'add "Buy Watermelon"' | td repl
//! ```
//!
//! Mutations live for the duration of the process only; the todo file is
//! never rewritten.
//!
//! # Crate Structure
//!
//! - [`crate::core`]: records, identifiers, the store, commands, config and output.

pub mod core;

mod cli;

pub use crate::core::command::{Command, Outcome};
pub use crate::core::error::TdError;
pub use crate::core::store::{Entry, Filter, TodoStore};
pub use crate::core::todo::{Todo, read_todos};

use crate::core::config::{self, Config};
use crate::core::ident;
use crate::core::output::{self, OutputFormat};
use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

fn init_logging(filter: log::LevelFilter) {
    // try_init: the logger may already be installed when embedded
    let _ = env_logger::Builder::new()
        .filter_level(filter)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}

/// Load the todo file at `path` into a fresh store. A missing file is an empty store.
pub fn load_store(path: &Path) -> anyhow::Result<TodoStore> {
    let todos = match read_todos(path) {
        Ok(todos) => todos,
        Err(TdError::IoError(e)) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("{} does not exist; starting with an empty list", path.display());
            return Ok(TodoStore::new());
        }
        Err(e) => return Err(e).with_context(|| format!("failed to read {}", path.display())),
    };
    let store = TodoStore::from_todos(todos)
        .with_context(|| format!("failed to load {}", path.display()))?;
    log::info!("loaded {} todos from {}", store.len(), path.display());
    Ok(store)
}

fn render_error(input: &str, err: &TdError, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format!("{} {}", "error:".red().bold(), err),
        OutputFormat::Json => output::error_envelope(input, err).to_string(),
    }
}

/// Evaluate one command per input line, writing one rendered result per command.
///
/// Failed commands are reported inline and do not stop the loop. Returns the
/// number of failed commands.
pub fn run_repl<R: BufRead, W: Write>(
    store: &mut TodoStore,
    input: R,
    mut out: W,
    format: OutputFormat,
) -> io::Result<usize> {
    let mut failures = 0;
    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        match store.eval(command) {
            Ok(outcome) => writeln!(out, "{}", output::render(&outcome, format))?,
            Err(err) => {
                log::warn!("command {:?} failed: {}", command, err);
                failures += 1;
                writeln!(out, "{}", render_error(command, &err, format))?;
            }
        }
    }
    Ok(failures)
}

fn eval_all(store: &mut TodoStore, commands: &[String], format: OutputFormat) -> anyhow::Result<()> {
    for command in commands {
        match store.eval(command) {
            Ok(outcome) => println!("{}", output::render(&outcome, format)),
            Err(err) => {
                if format == OutputFormat::Json {
                    println!("{}", render_error(command, &err, format));
                }
                return Err(err).with_context(|| format!("command {:?} failed", command));
            }
        }
    }
    Ok(())
}

fn resolve_config(cli: &cli::Cli) -> anyhow::Result<Config> {
    let cwd = std::env::current_dir()?;
    let mut config = config::load_config(&cwd, cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(file) = &cli.file {
        config.todo_file = file.clone();
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if cli.no_color {
        config.color = false;
    }
    Ok(config)
}

pub fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = resolve_config(&cli)?;

    init_logging(config.log_level);
    if !config.color {
        colored::control::set_override(false);
    }

    match cli.command {
        cli::Command::Id { description } => {
            println!("{}", ident::generate_for(&description));
        }
        cli::Command::Eval { commands } => {
            let mut store = load_store(&config.todo_file)?;
            eval_all(&mut store, &commands, config.format)?;
        }
        cli::Command::Ls { filters } => {
            let mut store = load_store(&config.todo_file)?;
            let command = format!("ls {}", filters.join(" "));
            eval_all(&mut store, &[command], config.format)?;
        }
        cli::Command::Repl => {
            let mut store = load_store(&config.todo_file)?;
            let stdin = io::stdin();
            let failures = run_repl(&mut store, stdin.lock(), io::stdout(), config.format)?;
            if failures > 0 {
                log::info!("{} command(s) failed", failures);
            }
        }
    }
    Ok(())
}
