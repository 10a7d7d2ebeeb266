//! Interfaces to the services the ingestion boundary hands work to.
//!
//! Storage and workflow orchestration live outside this crate; only the
//! calls the boundary makes are described here.

use serde::{Deserialize, Serialize};

use super::task::{NewTask, Task};

/// Error raised by a collaborator implementation.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

/// Persists new tasks on behalf of an authenticated user.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStore {
    /// Create a task owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns the store's own error if the task could not be created.
    fn create_task(&self, user_id: &str, input: &NewTask) -> Result<Task, CollaboratorError>;
}

/// Input sent to the external ingestion workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowInput {
    pub user_id: String,
    pub raw_text: String,
}

/// A started workflow execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecution {
    /// Execution identifier assigned by the orchestrator.
    pub id: String,
    /// Orchestrator-reported state, e.g. `CREATED`.
    pub state: String,
}

/// Optional workflow orchestrator that parses and stores tasks asynchronously.
#[cfg_attr(test, mockall::automock)]
pub trait IngestionWorkflow {
    /// Whether the orchestrator has the credentials it needs.
    fn is_configured(&self) -> bool;

    /// Start an ingestion run.
    ///
    /// # Errors
    ///
    /// Returns the orchestrator's error if the run could not be started.
    fn trigger(&self, input: &WorkflowInput) -> Result<WorkflowExecution, CollaboratorError>;
}

/// Workflow stand-in for deployments without an orchestrator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoWorkflow;

impl IngestionWorkflow for NoWorkflow {
    fn is_configured(&self) -> bool {
        false
    }

    fn trigger(&self, _input: &WorkflowInput) -> Result<WorkflowExecution, CollaboratorError> {
        Err("no ingestion workflow is configured".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_workflow_is_never_configured() {
        assert!(!NoWorkflow.is_configured());
    }

    #[test]
    fn test_no_workflow_refuses_to_trigger() {
        let input = WorkflowInput {
            user_id: "user-1".to_string(),
            raw_text: "Call mom".to_string(),
        };
        let err = NoWorkflow.trigger(&input).unwrap_err();
        assert!(err.to_string().contains("no ingestion workflow"));
    }
}
