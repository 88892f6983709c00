//! Output rendering for CLI surfaces.
//!
//! Text output is meant for a terminal; JSON output wraps every outcome in the
//! standard command envelope so scripts can rely on a stable shape.

use crate::core::command::Outcome;
use crate::core::error::TdError;
use crate::core::store::Entry;
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use ulid::Ulid;

const DESCRIPTION_WIDTH: usize = 60;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Returns unix-epoch seconds with `Z` suffix (e.g. `1771220592Z`).
pub fn now_epoch_z() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{}Z", secs)
}

/// Standard command response envelope.
pub fn command_envelope(cmd: &str, status: &str, extra: JsonValue) -> JsonValue {
    let mut base = serde_json::json!({
        "envelope_version": "1.0.0",
        "ts": now_epoch_z(),
        "event_id": Ulid::new().to_string(),
        "cmd": cmd,
        "status": status
    });
    if let (Some(base_obj), Some(extra_obj)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra_obj {
            base_obj.insert(k.clone(), v.clone());
        }
    }
    base
}

fn outcome_cmd(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Add(_) => "td.add",
        Outcome::Delete(_) => "td.rm",
        Outcome::List(_) => "td.ls",
    }
}

pub fn outcome_envelope(outcome: &Outcome) -> JsonValue {
    command_envelope(
        outcome_cmd(outcome),
        "ok",
        serde_json::json!({ "outcome": outcome }),
    )
}

pub fn error_envelope(input: &str, err: &TdError) -> JsonValue {
    command_envelope(
        "td.eval",
        "error",
        serde_json::json!({ "input": input, "error": err.to_string() }),
    )
}

fn render_entry(entry: &Entry) -> String {
    let mut line = format!(
        "{} {} {}",
        entry.id.yellow(),
        entry.todo.group().to_string().bold(),
        compact_line(entry.todo.description(), DESCRIPTION_WIDTH)
    );
    for tag in entry.todo.tags() {
        line.push(' ');
        line.push_str(&format!("+{}", tag).cyan().to_string());
    }
    line
}

/// Human-readable rendering of an outcome.
pub fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Add(id) => format!("{} {}", "added".green().bold(), id.yellow()),
        Outcome::Delete(todo) => format!("{} {}", "removed".red().bold(), todo),
        Outcome::List(entries) if entries.is_empty() => "no todos".dimmed().to_string(),
        Outcome::List(entries) => entries
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn render(outcome: &Outcome, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => render_text(outcome),
        OutputFormat::Json => outcome_envelope(outcome).to_string(),
    }
}
