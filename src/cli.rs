//! CLI struct definitions for the `td` command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use crate::core::output::OutputFormat;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "td",
    version = env!("CARGO_PKG_VERSION"),
    about = "A tiny todo manager: line-format records keyed by short letter identifiers."
)]
pub(crate) struct Cli {
    /// Todo file to load (overrides `todo_file` and TD_FILE).
    #[clap(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Config file (defaults to .td/td.toml or td.toml in the working directory).
    #[clap(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Output format.
    #[clap(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
    /// Log level: off, error, warn, info, debug or trace. RUST_LOG takes precedence.
    #[clap(long, global = true, value_parser = parse_log_level)]
    pub log_level: Option<LevelFilter>,
    /// Disable colored text output.
    #[clap(long, global = true)]
    pub no_color: bool,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Evaluate commands (`add ...`, `rm ID`, `ls ...`) in order; stops at the first failure.
    Eval {
        #[clap(value_name = "COMMAND", required = true)]
        commands: Vec<String>,
    },
    /// Read commands from stdin, one per line. Failures are reported and skipped.
    Repl,
    /// List todos, optionally filtered by `&GROUP` and `+TAG`.
    Ls {
        #[clap(value_name = "FILTER")]
        filters: Vec<String>,
    },
    /// Print the identifier a description would be assigned.
    Id {
        #[clap(value_name = "DESCRIPTION")]
        description: String,
    },
}

fn parse_log_level(s: &str) -> Result<LevelFilter, String> {
    s.parse::<LevelFilter>().map_err(|_| {
        format!(
            "invalid log level '{}': expected one of off, error, warn, info, debug, trace",
            s
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_flag_is_validated() {
        let cli = Cli::try_parse_from(["td", "--log-level", "DEBUG", "repl"]).unwrap();
        assert_eq!(cli.log_level, Some(LevelFilter::Debug));

        let err = Cli::try_parse_from(["td", "--log-level", "loud", "repl"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }
}
