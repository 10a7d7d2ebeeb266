//! Command implementations for quicktask.
//!
//! Each command returns the text to print; `main` does the printing.

mod completions;
mod parse;

pub use completions::completions;
pub use parse::{add, parse};
