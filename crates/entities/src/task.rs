//! Task-related entity definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation;

/// Urgency of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Converts the priority to its stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parses a priority, ignoring ASCII case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

/// Progress of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "to do")]
    ToDo,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl TaskStatus {
    /// Converts the status to its stored form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "to do",
            Self::InProgress => "in progress",
            Self::Completed => "completed",
        }
    }

    /// Parses a status, ignoring ASCII case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "to do" => Some(Self::ToDo),
            "in progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// A unit of work inside a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Backend-assigned identifier.
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Stored as submitted; see [`Task::priority`].
    pub priority: String,
    /// Stored as submitted; see [`Task::status`].
    pub status: String,
    /// User the task is assigned to.
    pub assignee_id: i64,
    /// Project the task belongs to.
    pub project_id: i64,
    /// Day the record was stored.
    pub created: NaiveDate,
    /// Day the task was finished, if it has been.
    pub completed: Option<NaiveDate>,
}

impl Task {
    /// Builds the stored record for `input`.
    ///
    /// `completed` is the already-parsed form of `input.completed`.
    pub fn from_input(
        id: i64,
        input: &TaskInput,
        created: NaiveDate,
        completed: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            priority: input.priority.clone(),
            status: input.status.clone(),
            assignee_id: input.assignee_id,
            project_id: input.project_id,
            created,
            completed,
        }
    }

    /// Replaces every mutable field with the values from `input`.
    pub fn apply(&mut self, input: &TaskInput, completed: Option<NaiveDate>) {
        self.title = input.title.clone();
        self.description = input.description.clone();
        self.priority = input.priority.clone();
        self.status = input.status.clone();
        self.assignee_id = input.assignee_id;
        self.project_id = input.project_id;
        self.completed = completed;
    }

    /// The stored priority, if it is one of the known values.
    pub fn priority(&self) -> Option<Priority> {
        Priority::parse(&self.priority)
    }

    /// The stored status, if it is one of the known values.
    pub fn status(&self) -> Option<TaskStatus> {
        TaskStatus::parse(&self.status)
    }
}

/// Body of a create or replace request for a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub assignee_id: i64,
    pub project_id: i64,
    /// `YYYY-MM-DD`, or empty when not finished.
    pub completed: String,
}

impl TaskInput {
    /// Creates a new task input with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, assignee_id: i64) -> Self {
        self.assignee_id = assignee_id;
        self
    }

    /// Sets the owning project.
    pub fn with_project(mut self, project_id: i64) -> Self {
        self.project_id = project_id;
        self
    }

    /// Sets the completion date.
    pub fn with_completed(mut self, completed: impl Into<String>) -> Self {
        self.completed = completed.into();
        self
    }

    /// Returns true if any structural field is well formed.
    ///
    /// This is an OR across fields, kept for compatibility with existing
    /// clients: a single recognised priority is enough to pass, and so is
    /// a non-negative assignee or project id.
    pub fn is_valid(&self) -> bool {
        validation::is_date(&self.completed)
            || Priority::parse(&self.priority).is_some()
            || TaskStatus::parse(&self.status).is_some()
            || validation::is_reference(self.assignee_id)
            || validation::is_reference(self.project_id)
    }
}
