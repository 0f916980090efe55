//! Project-related entity definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation;

/// A body of work owned by a manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Backend-assigned identifier.
    pub id: i64,
    pub title: String,
    pub description: String,
    /// User managing the project.
    pub manager_id: i64,
    /// Day the record was stored.
    pub created: NaiveDate,
    /// Day the project was closed, if it has been.
    pub completed: Option<NaiveDate>,
}

impl Project {
    /// Builds the stored record for `input`.
    pub fn from_input(
        id: i64,
        input: &ProjectInput,
        created: NaiveDate,
        completed: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            title: input.title.clone(),
            description: input.description.clone(),
            manager_id: input.manager_id,
            created,
            completed,
        }
    }

    /// Replaces every mutable field with the values from `input`.
    pub fn apply(&mut self, input: &ProjectInput, completed: Option<NaiveDate>) {
        self.title = input.title.clone();
        self.description = input.description.clone();
        self.manager_id = input.manager_id;
        self.completed = completed;
    }
}

/// Body of a create or replace request for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectInput {
    pub title: String,
    pub description: String,
    pub manager_id: i64,
    /// `YYYY-MM-DD`, or empty while the project is open.
    pub completed: String,
}

impl ProjectInput {
    /// Creates a new project input.
    pub fn new(title: impl Into<String>, manager_id: i64) -> Self {
        Self {
            title: title.into(),
            manager_id,
            ..Self::default()
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the completion date.
    pub fn with_completed(mut self, completed: impl Into<String>) -> Self {
        self.completed = completed.into();
        self
    }

    /// Returns true if the completion date or the manager id is well formed.
    ///
    /// Same OR semantics as [`crate::TaskInput::is_valid`].
    pub fn is_valid(&self) -> bool {
        validation::is_date(&self.completed) || validation::is_reference(self.manager_id)
    }
}
