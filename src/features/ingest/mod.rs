//! Quick-add ingestion.
//!
//! Validates raw text, parses it into a task, and hands the result to the
//! task store or the ingestion workflow.

mod boundary;
mod collaborators;
mod task;

pub use boundary::{
    ingest, prepare, IngestError, IngestLimits, IngestOutcome, IngestRequest, Prepared,
    DEFAULT_MAX_INPUT_CHARS,
};
pub use collaborators::{
    CollaboratorError, IngestionWorkflow, NoWorkflow, TaskStore, WorkflowExecution, WorkflowInput,
};
pub use task::{NewTask, Task, TaskStatus};
