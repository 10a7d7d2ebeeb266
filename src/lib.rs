//! quicktask - quick-add task parsing
//!
//! This crate turns free-form text into a task title, deadline and
//! priority, and provides the validation boundary that sits between
//! ingestion channels and the task store.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod features;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::QuicktaskError;
pub use features::nlp::{is_valid_parsed_task, parse_task, parse_task_at, ParsedTask, Priority};
