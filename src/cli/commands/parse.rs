//! `parse` and `add` command implementations.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, Local};
use colored::Colorize;
use serde_json::json;

use crate::cli::args::{OutputFormat, ParseArgs};
use crate::core::{FixedClock, SystemClock};
use crate::error::QuicktaskError;
use crate::features::ingest::{prepare, IngestLimits, Prepared};
use crate::features::nlp::{parse_task, parse_task_at, ParsedTask, Priority};

/// Execute the parse command.
///
/// # Errors
///
/// Returns an error if `--now` is malformed or JSON serialization fails.
pub fn parse(args: &ParseArgs, format: OutputFormat) -> Result<String, QuicktaskError> {
    let task = match resolve_now(args.now.as_deref())? {
        Some(now) => parse_task_at(&args.text, &now),
        None => parse_task(&args.text),
    };
    format_parsed_task(&task, format)
}

/// Execute the add command.
///
/// # Errors
///
/// Returns `QuicktaskError::Ingest` if the text is rejected, or an error if
/// `--now` is malformed or JSON serialization fails.
pub fn add(
    args: &ParseArgs,
    limits: &IngestLimits,
    format: OutputFormat,
) -> Result<String, QuicktaskError> {
    let prepared = match resolve_now(args.now.as_deref())? {
        Some(now) => prepare(&args.text, &FixedClock::new(now), limits)?,
        None => prepare(&args.text, &SystemClock, limits)?,
    };
    format_prepared(&prepared, format)
}

fn resolve_now(now: Option<&str>) -> Result<Option<DateTime<FixedOffset>>, QuicktaskError> {
    now.map(|s| {
        DateTime::parse_from_rfc3339(s)
            .map_err(|e| QuicktaskError::InvalidArgument(format!("--now {s}: {e}")))
    })
    .transpose()
}

fn describe_priority(priority: Priority) -> String {
    format!("{priority} ({})", priority.value())
}

fn describe_deadline(task: &ParsedTask) -> Option<String> {
    let deadline = task.deadline?;
    let local = deadline.with_timezone(&Local).format("%a %b %-d %H:%M");
    Some(format!("{} ({local} local)", task.deadline_iso()?))
}

/// Format a parsed task for display.
fn format_parsed_task(task: &ParsedTask, format: OutputFormat) -> Result<String, QuicktaskError> {
    match format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(task)?;
            if let Some(map) = output.as_object_mut() {
                map.insert("valid".to_string(), json!(task.is_valid()));
            }
            Ok(serde_json::to_string_pretty(&output)?)
        },
        OutputFormat::Pretty => {
            let mut output = format!("{}\n", "Parsed Task".yellow().bold());
            writeln!(output, "  {} {}", "Title:".cyan().bold(), task.title).ok();
            if let Some(deadline) = describe_deadline(task) {
                writeln!(output, "  {} {deadline}", "Deadline:".red()).ok();
            }
            if task.priority != Priority::None {
                writeln!(
                    output,
                    "  {} {}",
                    "Priority:".red().bold(),
                    describe_priority(task.priority)
                )
                .ok();
            }
            let valid = if task.is_valid() {
                "yes".green()
            } else {
                "no".red()
            };
            writeln!(output, "  {} {valid}", "Valid:".dimmed()).ok();
            Ok(output)
        },
    }
}

/// Format an accepted quick-add payload for display.
fn format_prepared(prepared: &Prepared, format: OutputFormat) -> Result<String, QuicktaskError> {
    match format {
        OutputFormat::Json => {
            let output = json!({
                "task": prepared.task,
                "parsed": {
                    "detected_deadline": prepared.detected_deadline,
                    "detected_priority": prepared.detected_priority,
                }
            });
            Ok(serde_json::to_string_pretty(&output)?)
        },
        OutputFormat::Pretty => {
            let mut output = format!(
                "{} {}\n",
                "Ready to create:".green().bold(),
                prepared.task.title
            );
            if let Some(deadline) = describe_deadline(&prepared.parsed) {
                writeln!(output, "  {} {deadline}", "Deadline:".red()).ok();
            }
            if prepared.detected_priority {
                writeln!(
                    output,
                    "  {} {}",
                    "Priority:".red().bold(),
                    describe_priority(prepared.parsed.priority)
                )
                .ok();
            }
            Ok(output)
        },
    }
}
