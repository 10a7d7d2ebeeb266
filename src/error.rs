//! Error types for quicktask.

use thiserror::Error;

use crate::features::ingest::IngestError;

/// Top-level error type for the library and binary.
#[derive(Debug, Error)]
pub enum QuicktaskError {
    /// Configuration could not be located, read, or written.
    #[error("Config error: {0}")]
    Config(String),

    /// A command-line argument was malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The ingestion boundary rejected the input or a collaborator failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl QuicktaskError {
    /// Process exit code for this error.
    ///
    /// Rejected input exits with 2 so scripts can tell it apart from
    /// environmental failures.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Ingest(e) if e.is_client_error() => 2,
            Self::InvalidArgument(_) => 2,
            _ => 1,
        }
    }
}
