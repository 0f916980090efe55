use chrono::NaiveDate;
use entities::{Project, Task, User};
use sqlx::FromRow;

/// Column list shared by every user read.
pub const USER_COLUMNS: &str = "id, name, email, role, created";

/// Column list shared by every task read.
pub const TASK_COLUMNS: &str =
    "id, title, description, priority, status, assignee_id, project_id, created, completed";

/// Column list shared by every project read.
pub const PROJECT_COLUMNS: &str = "id, title, description, manager_id, created, completed";

/// Database row for User
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created: NaiveDate,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            created: row.created,
        }
    }
}

/// Database row for Task
#[derive(Debug, FromRow)]
pub struct TaskRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub assignee_id: i64,
    pub project_id: i64,
    pub created: NaiveDate,
    pub completed: Option<NaiveDate>,
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Task {
            id: row.id,
            title: row.title,
            description: row.description,
            priority: row.priority,
            status: row.status,
            assignee_id: row.assignee_id,
            project_id: row.project_id,
            created: row.created,
            completed: row.completed,
        }
    }
}

/// Database row for Project
#[derive(Debug, FromRow)]
pub struct ProjectRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub manager_id: i64,
    pub created: NaiveDate,
    pub completed: Option<NaiveDate>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            title: row.title,
            description: row.description,
            manager_id: row.manager_id,
            created: row.created,
            completed: row.completed,
        }
    }
}
