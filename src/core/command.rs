//! The command language evaluated against a [`TodoStore`].
//!
//! A command is a verb, a space, and a verb-specific remainder:
//!
//! | Verb   | Alias  | Remainder                          |
//! |--------|--------|------------------------------------|
//! | `add`  | `a`    | a todo line, or `"description"`    |
//! | `rm`   | `del`  | an identifier                      |
//! | `ls`   | `list` | optional `&GROUP` / `+TAG` filters |

use crate::core::error::TdError;
use crate::core::store::{Entry, Filter, TodoStore};
use crate::core::todo::{DEFAULT_GROUP, Todo};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(Todo),
    Remove(String),
    List(Filter),
}

/// Result of a successfully evaluated command.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "op", content = "val", rename_all = "snake_case")]
pub enum Outcome {
    /// Identifier assigned to the inserted record.
    Add(String),
    /// The record that was removed.
    Delete(Todo),
    List(Vec<Entry>),
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, TdError> {
        let input = input.trim();
        let (verb, rest) = input.split_once(' ').unwrap_or((input, ""));
        let rest = rest.trim();

        match verb {
            "add" | "a" => {
                require_argument(verb, rest)?;
                parse_add_argument(rest).map(Command::Add)
            }
            "rm" | "del" => {
                require_argument(verb, rest)?;
                Ok(Command::Remove(rest.to_string()))
            }
            "ls" | "list" => Filter::parse(rest).map(Command::List),
            other => Err(TdError::UnknownCommand(other.to_string())),
        }
    }
}

fn require_argument(verb: &str, rest: &str) -> Result<(), TdError> {
    if rest.is_empty() {
        Err(TdError::MissingArgument(verb.to_string()))
    } else {
        Ok(())
    }
}

// A quoted argument is a bare description in the default group.
fn parse_add_argument(rest: &str) -> Result<Todo, TdError> {
    match rest
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
    {
        Some(inner) => Todo::from_line(&format!("{} {}", DEFAULT_GROUP, inner)),
        None => Todo::from_line(rest),
    }
}

impl TodoStore {
    /// Parse and apply one command.
    pub fn eval(&mut self, input: &str) -> Result<Outcome, TdError> {
        let command = Command::parse(input)?;
        self.apply(command)
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome, TdError> {
        match command {
            Command::Add(todo) => self.add_record(todo).map(Outcome::Add),
            Command::Remove(id) => self
                .remove_record(&id)
                .map(Outcome::Delete)
                .ok_or(TdError::NotFound(id)),
            Command::List(filter) => Ok(Outcome::List(self.list(&filter))),
        }
    }
}
