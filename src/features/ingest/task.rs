//! Task records exchanged with the task store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::features::nlp::ParsedTask;

/// Lifecycle state of a stored task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Pending,
    /// Being worked on.
    InProgress,
    /// Done.
    Completed,
    /// Dropped.
    Cancelled,
}

/// A task as returned by the store after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: u8,
    pub deadline: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Creation payload handed to the task store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    /// Task title, already validated.
    pub title: String,
    /// Free-form notes. Quick-add never fills this in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// One of 0, 2, 5, 7, 10.
    pub priority: u8,
    /// ISO-8601 UTC deadline (`YYYY-MM-DDTHH:MM:SS.mmmZ`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

impl From<&ParsedTask> for NewTask {
    fn from(parsed: &ParsedTask) -> Self {
        Self {
            title: parsed.title.clone(),
            description: None,
            priority: parsed.priority.value(),
            deadline: parsed.deadline_iso(),
        }
    }
}
