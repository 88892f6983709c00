//! `td.toml` configuration.
//!
//! Lookup order: an explicit `--config` path, then `.td/td.toml`, then
//! `td.toml` in the working directory. No file means defaults (not an error).
//! `TD_FILE` overrides `todo_file`; command-line flags override both.

use crate::core::error::TdError;
use crate::core::output::OutputFormat;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "td.toml";
pub const FILE_ENV: &str = "TD_FILE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Todo file to load. Relative paths resolve against the config file's directory.
    pub todo_file: PathBuf,
    pub format: OutputFormat,
    pub color: bool,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            todo_file: PathBuf::from("todo.txt"),
            format: OutputFormat::Text,
            color: true,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self, TdError> {
        toml::from_str(content).map_err(|e| TdError::ConfigError(e.to_string()))
    }

    /// Apply a `TD_FILE`-style override.
    pub fn with_file_override(mut self, file: Option<String>) -> Self {
        if let Some(file) = file.filter(|f| !f.trim().is_empty()) {
            self.todo_file = PathBuf::from(file);
        }
        self
    }
}

fn read_config(path: &Path) -> Result<Config, TdError> {
    let content = fs::read_to_string(path)?;
    let mut config = Config::from_toml(&content).map_err(|e| match e {
        TdError::ConfigError(msg) => TdError::ConfigError(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;
    if config.todo_file.is_relative() {
        if let Some(parent) = path.parent() {
            config.todo_file = parent.join(&config.todo_file);
        }
    }
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Locate and load configuration for `dir`.
pub fn load_config(dir: &Path, explicit: Option<&Path>) -> Result<Config, TdError> {
    let config = match explicit {
        Some(path) => read_config(path)?,
        None => {
            let candidates = [dir.join(".td").join(CONFIG_FILE), dir.join(CONFIG_FILE)];
            match candidates.iter().find(|p| p.exists()) {
                Some(path) => read_config(path)?,
                None => Config::default(),
            }
        }
    };
    Ok(config.with_file_override(env::var(FILE_ENV).ok()))
}
