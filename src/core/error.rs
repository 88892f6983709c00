use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TdError {
    #[error("Duplicate identifier: {0} already has an item")]
    DuplicateIdentifier(String),
    #[error("Not found: {0} does not exist")]
    NotFound(String),
    #[error("Unknown command: {0:?}")]
    UnknownCommand(String),
    #[error("Malformed line {line:?}: {reason}")]
    MalformedLine { line: String, reason: String },
    #[error("Invalid filter {selector:?}: {reason}")]
    InvalidFilter { selector: String, reason: String },
    #[error("Missing argument for command: {0}")]
    MissingArgument(String),
    #[error("line {line_no}: {source}")]
    AtLine {
        line_no: usize,
        #[source]
        source: Box<TdError>,
    },
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Config error: {0}")]
    ConfigError(String),
}

impl TdError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        TdError::MalformedLine {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
