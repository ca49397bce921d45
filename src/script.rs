//! Headless renderer: drives the task store from a line-based script.
//!
//! Each non-blank line is one intent:
//!
//! ```text
//! add Buy milk
//! toggle 1
//! edit 1
//! type Buy oat milk
//! commit
//! filter completed
//! show
//! ```
//!
//! `#` starts a comment line. Keywords are case-insensitive. After the last
//! line the resulting view is written once more.

use std::io::{BufRead, Write};

use clap::ValueEnum;
use tracing::{debug, info};

use crate::fields::{filter_name, parse_filter};
use crate::intent::{format_remaining, Intent};
use crate::store::TaskStore;

/// Errors raised while running a script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to encode view as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// How views are written.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Apply(Intent),
    Show,
}

/// Parse a single script line. Blank lines and comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Step>, String> {
    let line = line.trim_start();
    if line.trim_end().is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    // The keyword ends at the first whitespace character, which is consumed.
    let (keyword, rest) = match line.char_indices().find(|(_, c)| c.is_whitespace()) {
        Some((i, sep)) => (&line[..i], &line[i + sep.len_utf8()..]),
        None => (line, ""),
    };
    let arg = rest.trim();

    let step = match keyword.to_lowercase().as_str() {
        "add" => Step::Apply(Intent::Add(arg.to_string())),
        "toggle" => Step::Apply(Intent::Toggle(parse_id(arg)?)),
        "delete" | "rm" => Step::Apply(Intent::Delete(parse_id(arg)?)),
        "edit" => Step::Apply(Intent::BeginEdit(parse_id(arg)?)),
        // Kept verbatim so leading/trailing spaces and empty text can be typed.
        "type" => Step::Apply(Intent::UpdateEdit(rest.to_string())),
        "commit" => Step::Apply(Intent::CommitEdit),
        "cancel" => Step::Apply(Intent::CancelEdit),
        "filter" => match parse_filter(arg) {
            Some(f) => Step::Apply(Intent::SetFilter(f)),
            None => return Err(format!("unknown filter '{arg}' (all, completed, incomplete)")),
        },
        "show" => Step::Show,
        _ => return Err(format!("unknown command '{keyword}'")),
    };
    Ok(Some(step))
}

fn parse_id(s: &str) -> Result<u64, String> {
    if s.is_empty() {
        return Err("missing task id".to_string());
    }
    s.parse::<u64>().map_err(|_| format!("invalid task id '{s}'"))
}

/// Run every line of `input` against `store`, writing views to `out`.
///
/// Stops at the first line that fails to parse; intents from earlier lines
/// stay applied.
pub fn run_script<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    store: &mut TaskStore,
    format: OutputFormat,
) -> Result<(), ScriptError> {
    let mut applied = 0usize;
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let step = parse_line(&line).map_err(|message| ScriptError::Parse {
            line: idx + 1,
            message,
        })?;
        match step {
            Some(Step::Apply(intent)) => {
                let changed = store.apply(intent);
                debug!(line = idx + 1, changed, "script intent applied");
                applied += 1;
            }
            Some(Step::Show) => write_view(out, store, format)?,
            None => {}
        }
    }
    info!(applied, tasks = store.len(), "script finished");
    write_view(out, store, format)
}

/// Write the current view in the requested format.
pub fn write_view<W: Write>(
    out: &mut W,
    store: &TaskStore,
    format: OutputFormat,
) -> Result<(), ScriptError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &store.snapshot())?;
            writeln!(out)?;
        }
        OutputFormat::Table => write_table(out, store)?,
    }
    Ok(())
}

/// Print visible tasks in aligned columns followed by the footer.
fn write_table<W: Write>(out: &mut W, store: &TaskStore) -> std::io::Result<()> {
    writeln!(out, "{:<5} {:<5} {}", "ID", "Done", "Text")?;
    for t in store.visible_tasks() {
        let done = if t.completed { "[x]" } else { "[ ]" };
        writeln!(out, "{:<5} {:<5} {}", t.id, done, t.text)?;
    }
    if let Some(session) = store.edit_session() {
        writeln!(out, "editing {}: {}", session.editing_id, session.editing_text)?;
    }
    writeln!(
        out,
        "{} (filter: {})",
        format_remaining(store.remaining_count()),
        filter_name(store.filter())
    )
}
