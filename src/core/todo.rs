//! Todo records and the line format they are read from.
//!
//! A todo file holds one record per line:
//!
//! ```text
//! - Make bread
//! A Find that weird bug +Dev
//! A Get a haircut +Personal +Wedding
//! ```
//!
//! The first character is the record's group, followed by exactly one space.
//! Everything up to the first `+` is the description; each `+`-separated
//! segment after it is a tag.

use crate::core::error::TdError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Group assigned to records that do not name one.
pub const DEFAULT_GROUP: char = '-';

const TAG_MARKER: char = '+';

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    description: String,
    tags: Vec<String>,
    group: char,
}

impl Todo {
    pub fn new(description: impl Into<String>) -> Self {
        Todo {
            description: description.into(),
            tags: Vec::new(),
            group: DEFAULT_GROUP,
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_group(mut self, group: char) -> Self {
        self.group = group;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn group(&self) -> char {
        self.group
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Parse a single `<group> <description>[ +tag ...]` line.
    ///
    /// Surrounding whitespace is ignored. Anything that does not fit the
    /// layout is rejected with [`TdError::MalformedLine`] instead of being
    /// sliced into a partial record.
    pub fn from_line(line: &str) -> Result<Self, TdError> {
        let trimmed = line.trim();
        let mut chars = trimmed.chars();

        let group = chars
            .next()
            .ok_or_else(|| TdError::malformed(line, "line is empty"))?;
        match chars.next() {
            Some(' ') => {}
            Some(_) => {
                return Err(TdError::malformed(
                    line,
                    "expected a single space after the group character",
                ));
            }
            None => return Err(TdError::malformed(line, "missing description")),
        }

        let body = chars.as_str();
        if body.starts_with(char::is_whitespace) {
            return Err(TdError::malformed(
                line,
                "expected a single space after the group character",
            ));
        }
        let (description, tags) = match body.find(TAG_MARKER) {
            Some(start) => {
                let tags = body[start..]
                    .split(TAG_MARKER)
                    .skip(1)
                    .map(str::trim)
                    .map(|tag| {
                        if tag.is_empty() {
                            Err(TdError::malformed(line, "empty tag"))
                        } else {
                            Ok(tag.to_string())
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                (body[..start].trim_end(), tags)
            }
            None => (body, Vec::new()),
        };

        if description.trim().is_empty() {
            return Err(TdError::malformed(line, "description is empty"));
        }

        Ok(Todo {
            description: description.to_string(),
            tags,
            group,
        })
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.group, self.description)?;
        for tag in &self.tags {
            write!(f, " {}{}", TAG_MARKER, tag)?;
        }
        Ok(())
    }
}

/// Parse every non-blank line of `content`. Errors carry the 1-based line number.
pub fn parse_todos(content: &str) -> Result<Vec<Todo>, TdError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            Todo::from_line(line).map_err(|e| TdError::AtLine {
                line_no: idx + 1,
                source: Box::new(e),
            })
        })
        .collect()
}

/// Read a whole todo file into records.
pub fn read_todos(path: &Path) -> Result<Vec<Todo>, TdError> {
    let content = fs::read_to_string(path)?;
    parse_todos(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_without_tags() {
        let todo = Todo::from_line("- Make bread").unwrap();
        assert_eq!(todo.description(), "Make bread");
        assert!(todo.tags().is_empty());
        assert_eq!(todo.group(), '-');
    }

    #[test]
    fn parses_line_with_single_tag() {
        let todo = Todo::from_line("A Find bug +Dev").unwrap();
        assert_eq!(todo.description(), "Find bug");
        assert_eq!(todo.tags(), ["Dev"]);
        assert_eq!(todo.group(), 'A');
    }

    #[test]
    fn tags_keep_their_order_and_are_trimmed() {
        let todo = Todo::from_line("- Get a haircut +Personal + Wedding ").unwrap();
        assert_eq!(todo.description(), "Get a haircut");
        assert_eq!(todo.tags(), ["Personal", "Wedding"]);
    }

    #[test]
    fn trailing_newline_is_ignored() {
        let todo = Todo::from_line("- Make a sandwich\n").unwrap();
        assert_eq!(todo.description(), "Make a sandwich");
    }

    #[test]
    fn any_group_character_is_accepted() {
        let todo = Todo::from_line("7 Water plants").unwrap();
        assert_eq!(todo.group(), '7');
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in [
            "",
            "   ",
            "A",
            "AB bug",
            "A  Find bug",
            "A \tFind bug",
            "A +Dev",
            "A Find bug +Dev ++Job",
        ] {
            let err = Todo::from_line(line).unwrap_err();
            assert!(
                matches!(err, TdError::MalformedLine { .. }),
                "expected MalformedLine for {:?}, got {:?}",
                line,
                err
            );
        }
    }

    #[test]
    fn display_renders_line_format() {
        let todo = Todo::new("Fix car")
            .with_tags(["Roadtrip", "Car"])
            .with_group('B');
        assert_eq!(todo.to_string(), "B Fix car +Roadtrip +Car");
        assert_eq!(Todo::from_line(&todo.to_string()).unwrap(), todo);
    }

    #[test]
    fn parse_todos_skips_blank_lines_and_reports_line_numbers() {
        let todos = parse_todos("- Make bread\n\n    - Get a haircut +Personal +Wedding\n").unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[1].tags(), ["Personal", "Wedding"]);

        let err = parse_todos("- Make bread\nbroken\n").unwrap_err();
        match err {
            TdError::AtLine { line_no, source } => {
                assert_eq!(line_no, 2);
                assert!(matches!(*source, TdError::MalformedLine { .. }));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
