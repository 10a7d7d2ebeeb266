//! Feature implementations for quicktask.
//!
//! - Natural language parsing of quick-add text
//! - The ingestion boundary that validates and routes parsed tasks

pub mod ingest;
pub mod nlp;
