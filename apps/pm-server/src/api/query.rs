//! Search parameter resolution.
//!
//! Each search endpoint accepts a fixed set of optional parameters. The
//! first non-empty one in declaration order wins and is mapped to a
//! [`FilterField`]; the others are ignored. Column names therefore never
//! come from the request. A repeated parameter keeps its first value.

use axum::extract::{Query, rejection::QueryRejection};
use entities::{FilterField, ProjectField, TaskField, UserField};

use crate::error::{ServerError, ServerResult};

/// Optional search parameters for one entity.
pub trait SearchParams: Sized {
    type Field: FilterField;

    /// Builds the parameters from raw query pairs. Unknown keys are ignored.
    fn from_pairs(pairs: &[(String, String)]) -> Self;

    /// Candidates in priority order.
    fn candidates(&self) -> Vec<(Self::Field, &str)>;
}

/// Reads search parameters from the query string.
pub fn read_query<P: SearchParams>(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ServerResult<P> {
    let Query(pairs) = query.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Rejected query string");
        ServerError::InvalidRequest(rejection.body_text())
    })?;
    Ok(P::from_pairs(&pairs))
}

fn first(pairs: &[(String, String)], key: &str) -> String {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
        .unwrap_or_default()
}

/// Picks the field and value to filter on.
pub fn resolve<P: SearchParams>(params: &P) -> ServerResult<(P::Field, &str)> {
    params
        .candidates()
        .into_iter()
        .find(|(_, value)| !value.is_empty())
        .ok_or_else(|| ServerError::InvalidRequest("invalid request".to_string()))
}

/// `GET /users/search`
#[derive(Debug, Default)]
pub struct UserSearch {
    pub name: String,
    pub email: String,
}

impl SearchParams for UserSearch {
    type Field = UserField;

    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            name: first(pairs, "name"),
            email: first(pairs, "email"),
        }
    }

    fn candidates(&self) -> Vec<(UserField, &str)> {
        vec![
            (UserField::Name, self.name.as_str()),
            (UserField::Email, self.email.as_str()),
        ]
    }
}

/// `GET /tasks/search`
#[derive(Debug, Default)]
pub struct TaskSearch {
    pub title: String,
    pub status: String,
    pub priority: String,
    pub assignee: String,
    pub project: String,
}

impl SearchParams for TaskSearch {
    type Field = TaskField;

    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            title: first(pairs, "title"),
            status: first(pairs, "status"),
            priority: first(pairs, "priority"),
            assignee: first(pairs, "assignee"),
            project: first(pairs, "project"),
        }
    }

    fn candidates(&self) -> Vec<(TaskField, &str)> {
        vec![
            (TaskField::Title, self.title.as_str()),
            (TaskField::Status, self.status.as_str()),
            (TaskField::Priority, self.priority.as_str()),
            (TaskField::AssigneeId, self.assignee.as_str()),
            (TaskField::ProjectId, self.project.as_str()),
        ]
    }
}

/// `GET /projects/search`
#[derive(Debug, Default)]
pub struct ProjectSearch {
    pub title: String,
    pub manager: String,
}

impl SearchParams for ProjectSearch {
    type Field = ProjectField;

    fn from_pairs(pairs: &[(String, String)]) -> Self {
        Self {
            title: first(pairs, "title"),
            manager: first(pairs, "manager"),
        }
    }

    fn candidates(&self) -> Vec<(ProjectField, &str)> {
        vec![
            (ProjectField::Title, self.title.as_str()),
            (ProjectField::ManagerId, self.manager.as_str()),
        ]
    }
}
