//! Task record and its add/update descriptors.
//!
//! # Invariants
//! - New tasks always start as `TaskStatus::Pending` without `completed_at`.
//! - `completed_at` is stamped when entering `Completed` and cleared when
//!   leaving it, so `status == Completed` iff `completed_at.is_some()`.
//! - `tags` is a set; stale ids are tolerated and filtered at read time.

use super::project::ProjectId;
use super::tag::TagId;
use super::validation::{require_non_blank, ValidationError};
use super::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Opaque task identifier.
pub type TaskId = String;

/// Task importance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Ordinal sort weight: high=3, medium=2, low=1.
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub tags: BTreeSet<TagId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
}

impl Task {
    /// Builds a pending task from caller data with store-assigned fields.
    pub fn from_new(id: TaskId, data: NewTask, created_at: Timestamp) -> Self {
        Self {
            id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: TaskStatus::Pending,
            due_date: data.due_date,
            created_at,
            completed_at: None,
            tags: data.tags,
            project_id: data.project_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.title, ValidationError::EmptyTitle)
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Moves the task to `status`, keeping `completed_at` consistent.
    ///
    /// Setting `Completed` on an already completed task keeps its stamp.
    pub fn set_status(&mut self, status: TaskStatus, now: Timestamp) {
        match status {
            TaskStatus::Completed => {
                if self.completed_at.is_none() {
                    self.completed_at = Some(now);
                }
            }
            TaskStatus::Pending | TaskStatus::InProgress => self.completed_at = None,
        }
        self.status = status;
    }

    /// Marks the task completed with a fresh completion stamp.
    pub fn complete(&mut self, now: Timestamp) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(now);
    }

    /// Applies a partial update field by field.
    ///
    /// `tags` is replaced wholesale, never unioned.
    pub fn apply(&mut self, update: TaskUpdate, now: Timestamp) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(project_id) = update.project_id {
            self.project_id = project_id;
        }
        if let Some(status) = update.status {
            self.set_status(status, now);
        }
    }
}

/// Caller-supplied data for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub due_date: Option<Timestamp>,
    pub tags: BTreeSet<TagId>,
    pub project_id: Option<ProjectId>,
}

impl NewTask {
    /// Creates task data with no description, due date, tags or project.
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority,
            due_date: None,
            tags: BTreeSet::new(),
            project_id: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank(&self.title, ValidationError::EmptyTitle)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: Timestamp) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TagId>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_project(mut self, project_id: impl Into<ProjectId>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }
}

/// Partial task update. `None` leaves a field unchanged; for optional
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub due_date: Option<Option<Timestamp>>,
    pub tags: Option<BTreeSet<TagId>>,
    pub project_id: Option<Option<ProjectId>>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}
