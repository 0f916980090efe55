//! PostgreSQL-backed repositories.
//!
//! Each entity lives in its own table with a `BIGSERIAL` key. Not-found is
//! detected with `RETURNING id` / `fetch_optional`, so a missing row is the
//! sentinel and every other driver error passes through as
//! [`TaskStoreError::Database`].

mod rows;
mod schema;

use async_trait::async_trait;
use entities::{
    FilterField, Project, ProjectField, ProjectInput, Task, TaskField, TaskInput, User, UserField,
    UserInput,
};
use sqlx::postgres::{PgArguments, PgPoolOptions, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

pub use schema::SCHEMA_SQL;

use self::rows::{PROJECT_COLUMNS, ProjectRow, TASK_COLUMNS, TaskRow, USER_COLUMNS, UserRow};
use crate::traits::parse_completed;
use crate::{FilterValue, Repository, TaskStore, TaskStoreError, TaskStoreResult, parse_id};

/// Builds an equality query with the filter value bound as its column type.
///
/// `sql` must only ever interpolate a column name from a [`FilterField`].
fn filtered<'q, O>(sql: &'q str, value: &'q FilterValue) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    let query = sqlx::query_as::<_, O>(sql);
    match value {
        FilterValue::Text(text) => query.bind(text.as_str()),
        FilterValue::Integer(number) => query.bind(*number),
    }
}

/// User repository backed by the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

#[async_trait]
impl Repository for PgUserRepository {
    type Record = User;
    type Input = UserInput;
    type Field = UserField;

    async fn insert(&self, input: &UserInput) -> TaskStoreResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, email, role)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get(&self, id: &str) -> TaskStoreResult<User> {
        let key = parse_id(id)?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(User::from)
            .ok_or_else(|| TaskStoreError::not_found("User", id))
    }

    async fn delete(&self, id: &str) -> TaskStoreResult<()> {
        let key = parse_id(id)?;
        sqlx::query_scalar::<_, i64>("DELETE FROM users WHERE id = $1 RETURNING id")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| TaskStoreError::not_found("User", id))
    }

    async fn update(&self, id: &str, input: &UserInput) -> TaskStoreResult<()> {
        let key = parse_id(id)?;
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE users
            SET name = $1, email = $2, role = $3
            WHERE id = $4
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.role)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?
        .map(|_| ())
        .ok_or_else(|| TaskStoreError::not_found("User", id))
    }

    async fn get_all(&self) -> TaskStoreResult<Vec<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id");
        let rows: Vec<UserRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn get_all_by(&self, field: UserField, value: &str) -> TaskStoreResult<Vec<User>> {
        let value = FilterValue::parse(field, value)?;
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {} = $1 ORDER BY id",
            field.column()
        );
        let rows: Vec<UserRow> = filtered(&sql, &value).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

/// Task repository backed by the `tasks` table.
#[derive(Debug, Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

#[async_trait]
impl Repository for PgTaskRepository {
    type Record = Task;
    type Input = TaskInput;
    type Field = TaskField;

    async fn insert(&self, input: &TaskInput) -> TaskStoreResult<i64> {
        let completed = parse_completed("completed", &input.completed)?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO tasks (title, description, priority, status, assignee_id, project_id, completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.priority)
        .bind(&input.status)
        .bind(input.assignee_id)
        .bind(input.project_id)
        .bind(completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get(&self, id: &str) -> TaskStoreResult<Task> {
        let key = parse_id(id)?;
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1");
        let row: Option<TaskRow> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Task::from)
            .ok_or_else(|| TaskStoreError::not_found("Task", id))
    }

    async fn delete(&self, id: &str) -> TaskStoreResult<()> {
        let key = parse_id(id)?;
        sqlx::query_scalar::<_, i64>("DELETE FROM tasks WHERE id = $1 RETURNING id")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| TaskStoreError::not_found("Task", id))
    }

    async fn update(&self, id: &str, input: &TaskInput) -> TaskStoreResult<()> {
        let key = parse_id(id)?;
        let completed = parse_completed("completed", &input.completed)?;
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, priority = $3, status = $4,
                assignee_id = $5, project_id = $6, completed = $7
            WHERE id = $8
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.priority)
        .bind(&input.status)
        .bind(input.assignee_id)
        .bind(input.project_id)
        .bind(completed)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?
        .map(|_| ())
        .ok_or_else(|| TaskStoreError::not_found("Task", id))
    }

    async fn get_all(&self) -> TaskStoreResult<Vec<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id");
        let rows: Vec<TaskRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn get_all_by(&self, field: TaskField, value: &str) -> TaskStoreResult<Vec<Task>> {
        let value = FilterValue::parse(field, value)?;
        let sql = format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE {} = $1 ORDER BY id",
            field.column()
        );
        let rows: Vec<TaskRow> = filtered(&sql, &value).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Task::from).collect())
    }
}

/// Project repository backed by the `projects` table.
#[derive(Debug, Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

#[async_trait]
impl Repository for PgProjectRepository {
    type Record = Project;
    type Input = ProjectInput;
    type Field = ProjectField;

    async fn insert(&self, input: &ProjectInput) -> TaskStoreResult<i64> {
        let completed = parse_completed("completed", &input.completed)?;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO projects (title, description, manager_id, completed)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.manager_id)
        .bind(completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn get(&self, id: &str) -> TaskStoreResult<Project> {
        let key = parse_id(id)?;
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1");
        let row: Option<ProjectRow> = sqlx::query_as(&sql)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Project::from)
            .ok_or_else(|| TaskStoreError::not_found("Project", id))
    }

    async fn delete(&self, id: &str) -> TaskStoreResult<()> {
        let key = parse_id(id)?;
        sqlx::query_scalar::<_, i64>("DELETE FROM projects WHERE id = $1 RETURNING id")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?
            .map(|_| ())
            .ok_or_else(|| TaskStoreError::not_found("Project", id))
    }

    async fn update(&self, id: &str, input: &ProjectInput) -> TaskStoreResult<()> {
        let key = parse_id(id)?;
        let completed = parse_completed("completed", &input.completed)?;
        sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE projects
            SET title = $1, description = $2, manager_id = $3, completed = $4
            WHERE id = $5
            RETURNING id
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.manager_id)
        .bind(completed)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?
        .map(|_| ())
        .ok_or_else(|| TaskStoreError::not_found("Project", id))
    }

    async fn get_all(&self) -> TaskStoreResult<Vec<Project>> {
        let sql = format!("SELECT {PROJECT_COLUMNS} FROM projects ORDER BY id");
        let rows: Vec<ProjectRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn get_all_by(
        &self,
        field: ProjectField,
        value: &str,
    ) -> TaskStoreResult<Vec<Project>> {
        let value = FilterValue::parse(field, value)?;
        let sql = format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE {} = $1 ORDER BY id",
            field.column()
        );
        let rows: Vec<ProjectRow> = filtered(&sql, &value).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(Project::from).collect())
    }
}

/// PostgreSQL task store sharing one connection pool across repositories.
#[derive(Debug, Clone)]
pub struct PgTaskStore {
    pool: PgPool,
    users: PgUserRepository,
    tasks: PgTaskRepository,
    projects: PgProjectRepository,
}

impl PgTaskStore {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: PgUserRepository { pool: pool.clone() },
            tasks: PgTaskRepository { pool: pool.clone() },
            projects: PgProjectRepository { pool: pool.clone() },
            pool,
        }
    }

    /// Opens a pool against `url`.
    pub async fn connect(url: &str, max_connections: u32) -> TaskStoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Creates the tables and indexes if they do not exist yet.
    pub async fn run_schema(&self) -> TaskStoreResult<()> {
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        tracing::debug!("Database schema applied");
        Ok(())
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl TaskStore for PgTaskStore {
    type Users = PgUserRepository;
    type Tasks = PgTaskRepository;
    type Projects = PgProjectRepository;

    fn users(&self) -> &PgUserRepository {
        &self.users
    }

    fn tasks(&self) -> &PgTaskRepository {
        &self.tasks
    }

    fn projects(&self) -> &PgProjectRepository {
        &self.projects
    }
}

/// These tests need a live server; they are skipped unless
/// `TEST_DATABASE_URL` is set.
#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> Option<PgTaskStore> {
        let url = std::env::var("TEST_DATABASE_URL").ok()?;
        let store = PgTaskStore::connect(&url, 2)
            .await
            .expect("test database is reachable");
        store.run_schema().await.expect("schema applies");
        Some(store)
    }

    fn unique_email() -> String {
        format!("{}@mail.com", uuid::Uuid::new_v4().simple())
    }

    #[tokio::test]
    async fn test_schema_is_idempotent() {
        let Some(store) = test_store().await else {
            return;
        };
        store.run_schema().await.unwrap();
        store.run_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_user_round_trip() {
        let Some(store) = test_store().await else {
            return;
        };
        let users = store.users();
        let email = unique_email();

        let id = users
            .insert(&UserInput::new("alice", &email, "dev"))
            .await
            .unwrap();
        let user = users.get(&id.to_string()).await.unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.email, email);
        assert_eq!(user.role, "dev");

        users
            .update(&id.to_string(), &UserInput::new("alice", &email, "lead"))
            .await
            .unwrap();
        assert_eq!(users.get(&id.to_string()).await.unwrap().role, "lead");

        let found = users.get_all_by(UserField::Email, &email).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);

        users.delete(&id.to_string()).await.unwrap();
        assert!(users.get(&id.to_string()).await.unwrap_err().is_not_found());
        assert!(users.delete(&id.to_string()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_missing_and_malformed_ids() {
        let Some(store) = test_store().await else {
            return;
        };
        let missing = i64::MAX.to_string();
        let input = TaskInput::new("nothing");

        assert!(store.tasks().get(&missing).await.unwrap_err().is_not_found());
        assert!(store
            .tasks()
            .update(&missing, &input)
            .await
            .unwrap_err()
            .is_not_found());
        assert!(store.tasks().delete(&missing).await.unwrap_err().is_not_found());

        let err = store.projects().get("abc").await.unwrap_err();
        assert!(matches!(err, TaskStoreError::InvalidId(_)));
    }

    #[tokio::test]
    async fn test_task_filters() {
        let Some(store) = test_store().await else {
            return;
        };
        let manager = store
            .users()
            .insert(&UserInput::new("manager", unique_email(), "pm"))
            .await
            .unwrap();
        let project = store
            .projects()
            .insert(&ProjectInput::new("apollo", manager))
            .await
            .unwrap();

        let first = store
            .tasks()
            .insert(
                &TaskInput::new("write docs")
                    .with_priority("high")
                    .with_assignee(manager)
                    .with_project(project)
                    .with_completed("2024-07-04"),
            )
            .await
            .unwrap();
        let second = store
            .tasks()
            .insert(
                &TaskInput::new("review")
                    .with_assignee(manager)
                    .with_project(project),
            )
            .await
            .unwrap();

        let by_project = store
            .tasks()
            .get_all_by(TaskField::ProjectId, &project.to_string())
            .await
            .unwrap();
        let ids: Vec<i64> = by_project.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert!(by_project[0].completed.is_some());
        assert!(by_project[1].completed.is_none());

        let err = store
            .tasks()
            .get_all_by(TaskField::AssigneeId, "bob")
            .await
            .unwrap_err();
        assert!(matches!(err, TaskStoreError::InvalidValue { .. }));

        let managed = store
            .projects()
            .get_all_by(ProjectField::ManagerId, &manager.to_string())
            .await
            .unwrap();
        assert_eq!(managed.len(), 1);

        store.tasks().delete(&first.to_string()).await.unwrap();
        store.tasks().delete(&second.to_string()).await.unwrap();
        store.projects().delete(&project.to_string()).await.unwrap();
        store.users().delete(&manager.to_string()).await.unwrap();
    }
}
