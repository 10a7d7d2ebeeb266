//! The quick-add ingestion boundary.
//!
//! Raw text arrives from the web form, the bot, or a webhook. It is length
//! checked, parsed, validated, and either handed to the task store or, when
//! requested and available, to the ingestion workflow.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use super::collaborators::{IngestionWorkflow, TaskStore, WorkflowInput};
use super::task::{NewTask, Task};
use crate::core::Clock;
use crate::features::nlp::{parse_task_at, ParsedTask, Priority};

/// Longest raw text accepted, in characters.
pub const DEFAULT_MAX_INPUT_CHARS: usize = 1000;

/// Errors raised at the ingestion boundary.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The raw text was empty.
    #[error("Text is required")]
    EmptyInput,

    /// The raw text exceeded the configured limit.
    #[error("Text too long ({len} characters, max {max})")]
    InputTooLong { len: usize, max: usize },

    /// Parsing produced an empty or overlong title.
    #[error("Could not parse a valid task from the input")]
    InvalidTask,

    /// The task store failed.
    #[error("Failed to create task: {0}")]
    Store(String),

    /// The ingestion workflow could not be started.
    #[error("Failed to start ingestion workflow: {0}")]
    Workflow(String),
}

impl IngestError {
    /// True when the request itself was at fault (HTTP 400 territory).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput | Self::InputTooLong { .. } | Self::InvalidTask
        )
    }
}

/// Limits applied before parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestLimits {
    /// Longest raw text accepted, in characters.
    pub max_input_chars: usize,
}

impl Default for IngestLimits {
    fn default() -> Self {
        Self {
            max_input_chars: DEFAULT_MAX_INPUT_CHARS,
        }
    }
}

/// A quick-add request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestRequest {
    pub raw_text: String,
    /// Prefer the ingestion workflow over local parsing.
    #[serde(default)]
    pub use_workflow: bool,
}

impl IngestRequest {
    /// A request that is parsed locally.
    #[must_use]
    pub fn local(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            use_workflow: false,
        }
    }
}

/// Raw text that passed every check and is ready to store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prepared {
    /// Parser output.
    pub parsed: ParsedTask,
    /// Creation payload for the task store.
    pub task: NewTask,
    /// A deadline phrase resolved to a date.
    pub detected_deadline: bool,
    /// A priority keyword was found.
    pub detected_priority: bool,
}

/// What happened to an accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// Parsed here and stored.
    #[serde(rename = "local")]
    Created {
        task: Task,
        detected_deadline: bool,
        detected_priority: bool,
    },
    /// Handed to the ingestion workflow.
    #[serde(rename = "workflow")]
    Queued { execution_id: String },
}

/// Check, parse and validate raw text without storing anything.
///
/// # Errors
///
/// Returns `IngestError::EmptyInput` or `IngestError::InputTooLong` when the
/// text fails the length checks, and `IngestError::InvalidTask` when the
/// parsed title is empty or longer than 255 characters.
pub fn prepare<C: Clock>(
    raw_text: &str,
    clock: &C,
    limits: &IngestLimits,
) -> Result<Prepared, IngestError> {
    check_length(raw_text, limits)?;

    let parsed = parse_task_at(raw_text, &clock.now());
    if !parsed.is_valid() {
        warn!(
            title_chars = parsed.title.chars().count(),
            "rejecting quick-add input with invalid title"
        );
        return Err(IngestError::InvalidTask);
    }

    Ok(Prepared {
        task: NewTask::from(&parsed),
        detected_deadline: parsed.deadline.is_some(),
        detected_priority: parsed.priority != Priority::None,
        parsed,
    })
}

/// Accept a quick-add request for `user_id`.
///
/// # Errors
///
/// Returns the validation errors of [`prepare`], `IngestError::Workflow` if
/// the workflow refuses the run, or `IngestError::Store` if the store fails.
pub fn ingest<S, W, C>(
    user_id: &str,
    request: &IngestRequest,
    store: &S,
    workflow: &W,
    clock: &C,
    limits: &IngestLimits,
) -> Result<IngestOutcome, IngestError>
where
    S: TaskStore + ?Sized,
    W: IngestionWorkflow + ?Sized,
    C: Clock,
{
    check_length(&request.raw_text, limits)?;

    if request.use_workflow && workflow.is_configured() {
        let execution = workflow
            .trigger(&WorkflowInput {
                user_id: user_id.to_string(),
                raw_text: request.raw_text.clone(),
            })
            .map_err(|e| IngestError::Workflow(e.to_string()))?;
        info!(user_id, execution_id = %execution.id, "quick-add handed to workflow");
        return Ok(IngestOutcome::Queued {
            execution_id: execution.id,
        });
    }

    let prepared = prepare(&request.raw_text, clock, limits)?;
    let task = store
        .create_task(user_id, &prepared.task)
        .map_err(|e| IngestError::Store(e.to_string()))?;
    info!(user_id, task_id = %task.id, priority = task.priority, "quick-add task created");

    Ok(IngestOutcome::Created {
        task,
        detected_deadline: prepared.detected_deadline,
        detected_priority: prepared.detected_priority,
    })
}

fn check_length(raw_text: &str, limits: &IngestLimits) -> Result<(), IngestError> {
    if raw_text.is_empty() {
        return Err(IngestError::EmptyInput);
    }
    let len = raw_text.chars().count();
    if len > limits.max_input_chars {
        return Err(IngestError::InputTooLong {
            len,
            max: limits.max_input_chars,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::features::ingest::collaborators::{
        MockIngestionWorkflow, MockTaskStore, WorkflowExecution,
    };
    use crate::features::ingest::task::TaskStatus;
    use chrono::{DateTime, TimeZone, Utc};

    fn clock() -> FixedClock<Utc> {
        // Wednesday
        FixedClock::new(Utc.with_ymd_and_hms(2025, 12, 10, 8, 0, 0).unwrap())
    }

    fn stored(user_id: &str, input: &NewTask) -> Task {
        let created_at = clock().now();
        Task {
            id: "task-1".to_string(),
            user_id: user_id.to_string(),
            title: input.title.clone(),
            description: input.description.clone(),
            status: TaskStatus::Pending,
            priority: input.priority,
            deadline: input
                .deadline
                .as_deref()
                .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
                .map(|d| d.with_timezone(&Utc)),
            created_at,
            updated_at: created_at,
        }
    }

    fn idle_workflow() -> MockIngestionWorkflow {
        let mut workflow = MockIngestionWorkflow::new();
        workflow.expect_is_configured().return_const(false);
        workflow.expect_trigger().never();
        workflow
    }

    // ============
    // prepare
    // ============

    #[test]
    fn test_prepare_builds_payload() {
        let prepared = prepare("Call mom tomorrow urgent", &clock(), &IngestLimits::default())
            .unwrap();
        assert_eq!(
            prepared.task,
            NewTask {
                title: "Call mom".to_string(),
                description: None,
                priority: 10,
                deadline: Some("2025-12-11T17:00:00.000Z".to_string()),
            }
        );
        assert!(prepared.detected_deadline);
        assert!(prepared.detected_priority);
    }

    #[test]
    fn test_prepare_plain_text_detects_nothing() {
        let prepared = prepare("Buy groceries", &clock(), &IngestLimits::default()).unwrap();
        assert_eq!(prepared.task.title, "Buy groceries");
        assert!(!prepared.detected_deadline);
        assert!(!prepared.detected_priority);
    }

    #[test]
    fn test_prepare_rejects_empty_text() {
        let err = prepare("", &clock(), &IngestLimits::default()).unwrap_err();
        assert!(matches!(err, IngestError::EmptyInput));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_prepare_rejects_blank_text_as_invalid() {
        let err = prepare("   ", &clock(), &IngestLimits::default()).unwrap_err();
        assert!(matches!(err, IngestError::InvalidTask));
    }

    #[test]
    fn test_prepare_length_limit() {
        let limits = IngestLimits::default();

        let err = prepare(&"a".repeat(1001), &clock(), &limits).unwrap_err();
        assert!(matches!(
            err,
            IngestError::InputTooLong {
                len: 1001,
                max: 1000
            }
        ));

        // Within the input limit but the title is too long to store.
        let err = prepare(&"a".repeat(1000), &clock(), &limits).unwrap_err();
        assert!(matches!(err, IngestError::InvalidTask));

        assert!(prepare(&"a".repeat(255), &clock(), &limits).is_ok());
    }

    #[test]
    fn test_prepare_custom_limit() {
        let limits = IngestLimits { max_input_chars: 5 };
        let err = prepare("Call mom", &clock(), &limits).unwrap_err();
        assert_eq!(err.to_string(), "Text too long (8 characters, max 5)");
    }

    // ============
    // ingest
    // ============

    #[test]
    fn test_ingest_creates_task_locally() {
        let mut store = MockTaskStore::new();
        store
            .expect_create_task()
            .withf(|user_id, input| {
                user_id == "user-1" && input.title == "Submit report" && input.priority == 0
            })
            .times(1)
            .returning(|user_id, input| Ok(stored(user_id, input)));

        let outcome = ingest(
            "user-1",
            &IngestRequest::local("Submit report by Friday"),
            &store,
            &idle_workflow(),
            &clock(),
            &IngestLimits::default(),
        )
        .unwrap();

        match outcome {
            IngestOutcome::Created {
                task,
                detected_deadline,
                detected_priority,
            } => {
                assert_eq!(task.title, "Submit report");
                assert_eq!(
                    task.deadline,
                    Some(Utc.with_ymd_and_hms(2025, 12, 12, 17, 0, 0).unwrap())
                );
                assert!(detected_deadline);
                assert!(!detected_priority);
            },
            IngestOutcome::Queued { .. } => panic!("expected a locally created task"),
        }
    }

    #[test]
    fn test_ingest_uses_workflow_when_requested_and_configured() {
        let mut store = MockTaskStore::new();
        store.expect_create_task().never();

        let mut workflow = MockIngestionWorkflow::new();
        workflow.expect_is_configured().return_const(true);
        workflow
            .expect_trigger()
            .withf(|input| input.user_id == "user-1" && input.raw_text == "Call mom tomorrow")
            .times(1)
            .returning(|_| {
                Ok(WorkflowExecution {
                    id: "exec-42".to_string(),
                    state: "CREATED".to_string(),
                })
            });

        let request = IngestRequest {
            raw_text: "Call mom tomorrow".to_string(),
            use_workflow: true,
        };
        let outcome = ingest(
            "user-1",
            &request,
            &store,
            &workflow,
            &clock(),
            &IngestLimits::default(),
        )
        .unwrap();

        assert_eq!(
            outcome,
            IngestOutcome::Queued {
                execution_id: "exec-42".to_string()
            }
        );
    }

    #[test]
    fn test_ingest_falls_back_to_local_without_workflow() {
        let mut store = MockTaskStore::new();
        store
            .expect_create_task()
            .times(1)
            .returning(|user_id, input| Ok(stored(user_id, input)));

        let request = IngestRequest {
            raw_text: "Call mom".to_string(),
            use_workflow: true,
        };
        let outcome = ingest(
            "user-1",
            &request,
            &store,
            &idle_workflow(),
            &clock(),
            &IngestLimits::default(),
        )
        .unwrap();

        assert!(matches!(outcome, IngestOutcome::Created { .. }));
    }

    #[test]
    fn test_ingest_invalid_task_never_reaches_store() {
        let mut store = MockTaskStore::new();
        store.expect_create_task().never();

        let err = ingest(
            "user-1",
            &IngestRequest::local("    "),
            &store,
            &idle_workflow(),
            &clock(),
            &IngestLimits::default(),
        )
        .unwrap_err();

        assert!(matches!(err, IngestError::InvalidTask));
        assert_eq!(err.to_string(), "Could not parse a valid task from the input");
    }

    #[test]
    fn test_ingest_length_checked_before_workflow() {
        let mut store = MockTaskStore::new();
        store.expect_create_task().never();
        let mut workflow = MockIngestionWorkflow::new();
        workflow.expect_is_configured().return_const(true);
        workflow.expect_trigger().never();

        let request = IngestRequest {
            raw_text: "x".repeat(1001),
            use_workflow: true,
        };
        let err = ingest(
            "user-1",
            &request,
            &store,
            &workflow,
            &clock(),
            &IngestLimits::default(),
        )
        .unwrap_err();

        assert!(matches!(err, IngestError::InputTooLong { .. }));
    }

    #[test]
    fn test_ingest_store_failure() {
        let mut store = MockTaskStore::new();
        store
            .expect_create_task()
            .returning(|_, _| Err("connection refused".into()));

        let err = ingest(
            "user-1",
            &IngestRequest::local("Call mom"),
            &store,
            &idle_workflow(),
            &clock(),
            &IngestLimits::default(),
        )
        .unwrap_err();

        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "Failed to create task: connection refused");
    }

    #[test]
    fn test_ingest_workflow_failure() {
        let mut store = MockTaskStore::new();
        store.expect_create_task().never();
        let mut workflow = MockIngestionWorkflow::new();
        workflow.expect_is_configured().return_const(true);
        workflow
            .expect_trigger()
            .returning(|_| Err("401 Unauthorized".into()));

        let request = IngestRequest {
            raw_text: "Call mom".to_string(),
            use_workflow: true,
        };
        let err = ingest(
            "user-1",
            &request,
            &store,
            &workflow,
            &clock(),
            &IngestLimits::default(),
        )
        .unwrap_err();

        assert!(matches!(err, IngestError::Workflow(_)));
    }

    #[test]
    fn test_outcome_json_names_mode() {
        let outcome = IngestOutcome::Queued {
            execution_id: "exec-42".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "mode": "workflow", "execution_id": "exec-42" })
        );
    }

    #[test]
    fn test_request_defaults_to_local_parsing() {
        let request: IngestRequest =
            serde_json::from_str(r#"{ "raw_text": "Call mom" }"#).unwrap();
        assert_eq!(request, IngestRequest::local("Call mom"));
    }
}
