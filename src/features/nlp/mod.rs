//! Natural language parsing for quick-add task entry.
//!
//! This module turns free text into a title, deadline and priority:
//! - "Call mom tomorrow" → deadline tomorrow 17:00
//! - "Urgent: Fix production bug" → priority 10
//! - "Submit report by Friday" → deadline next Friday 17:00

mod parser;

pub use parser::{
    is_valid_parsed_task, parse_task, parse_task_at, DeadlineKind, ParsedTask, Priority,
    MAX_TITLE_CHARS,
};
