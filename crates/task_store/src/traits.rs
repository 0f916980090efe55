//! Task store trait definitions.

use async_trait::async_trait;
use entities::{
    FieldKind, FilterField, Project, ProjectField, ProjectInput, Task, TaskField, TaskInput, User,
    UserField, UserInput,
};

use crate::{TaskStoreError, TaskStoreResult};

/// Uniform CRUD and equality-search contract for one entity type.
///
/// Identities cross this boundary as decimal strings and are parsed into
/// the backend's native key with [`parse_id`].
#[async_trait]
pub trait Repository: Send + Sync {
    /// Stored record type.
    type Record: Send;
    /// Create/replace input type.
    type Input: Send + Sync;
    /// Columns allowed in [`Repository::get_all_by`].
    type Field: FilterField;

    /// Persists a new record and returns its assigned identity.
    async fn insert(&self, input: &Self::Input) -> TaskStoreResult<i64>;

    /// Fetches one record by identity.
    async fn get(&self, id: &str) -> TaskStoreResult<Self::Record>;

    /// Removes one record by identity.
    async fn delete(&self, id: &str) -> TaskStoreResult<()>;

    /// Replaces every mutable field of the record at `id`.
    async fn update(&self, id: &str, input: &Self::Input) -> TaskStoreResult<()>;

    /// Lists every record in backend-defined order.
    async fn get_all(&self) -> TaskStoreResult<Vec<Self::Record>>;

    /// Lists every record whose `field` equals `value`.
    async fn get_all_by(
        &self,
        field: Self::Field,
        value: &str,
    ) -> TaskStoreResult<Vec<Self::Record>>;
}

/// Repository for users.
pub trait UserRepository: Repository<Record = User, Input = UserInput, Field = UserField> {}

impl<T> UserRepository for T where T: Repository<Record = User, Input = UserInput, Field = UserField> {}

/// Repository for tasks.
pub trait TaskRepository: Repository<Record = Task, Input = TaskInput, Field = TaskField> {}

impl<T> TaskRepository for T where T: Repository<Record = Task, Input = TaskInput, Field = TaskField> {}

/// Repository for projects.
pub trait ProjectRepository:
    Repository<Record = Project, Input = ProjectInput, Field = ProjectField>
{
}

impl<T> ProjectRepository for T where
    T: Repository<Record = Project, Input = ProjectInput, Field = ProjectField>
{
}

/// One backend's set of repositories.
pub trait TaskStore: Send + Sync + 'static {
    type Users: UserRepository;
    type Tasks: TaskRepository;
    type Projects: ProjectRepository;

    fn users(&self) -> &Self::Users;
    fn tasks(&self) -> &Self::Tasks;
    fn projects(&self) -> &Self::Projects;
}

/// A filter value converted to the column's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

impl FilterValue {
    /// Converts a raw filter value for `field`.
    pub fn parse<F: FilterField>(field: F, raw: &str) -> TaskStoreResult<Self> {
        match field.kind() {
            FieldKind::Text => Ok(Self::Text(raw.to_string())),
            FieldKind::Integer => raw
                .parse::<i64>()
                .map(Self::Integer)
                .map_err(|_| TaskStoreError::invalid_value(field.column(), raw)),
        }
    }
}

/// Parses an external identity.
///
/// Only plain ASCII digits are accepted, so `"+1"`, `" 1"` and `""` are all
/// rejected rather than coerced.
pub fn parse_id(id: &str) -> TaskStoreResult<i64> {
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TaskStoreError::InvalidId(id.to_string()));
    }
    id.parse::<i64>()
        .map_err(|_| TaskStoreError::InvalidId(id.to_string()))
}

/// Parses an optional completion date for `field`.
pub(crate) fn parse_completed(
    field: &'static str,
    value: &str,
) -> TaskStoreResult<Option<chrono::NaiveDate>> {
    entities::validation::parse_optional_date(value)
        .map_err(|_| TaskStoreError::invalid_value(field, value))
}
