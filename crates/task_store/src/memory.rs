//! In-memory task store implementation for testing.
//!
//! Each repository owns an ordered map and an id counter behind one lock,
//! so concurrent inserts never hand out the same identity. No foreign-key
//! checks are made: a task may reference a user that does not exist.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use entities::{
    FilterField, Project, ProjectField, ProjectInput, Task, TaskField, TaskInput, User, UserField,
    UserInput,
};
use tokio::sync::RwLock;

use crate::traits::parse_completed;
use crate::{FilterValue, Repository, TaskStore, TaskStoreError, TaskStoreResult, parse_id};

/// A record type the in-memory backend knows how to build, replace and filter.
pub trait MemoryRecord: Clone + Send + Sync + 'static {
    type Input: Send + Sync;
    type Field: FilterField;

    /// Entity name used in `NotFound` errors.
    const ENTITY: &'static str;

    /// Builds a new record from `input`.
    fn build(id: i64, input: &Self::Input, created: NaiveDate) -> TaskStoreResult<Self>;

    /// Replaces the mutable fields with `input`.
    fn replace(&mut self, input: &Self::Input) -> TaskStoreResult<()>;

    /// Returns true if the record's `field` equals `value`.
    fn matches(&self, field: Self::Field, value: &FilterValue) -> bool;
}

impl MemoryRecord for User {
    type Input = UserInput;
    type Field = UserField;

    const ENTITY: &'static str = "User";

    fn build(id: i64, input: &UserInput, created: NaiveDate) -> TaskStoreResult<Self> {
        Ok(User::from_input(id, input, created))
    }

    fn replace(&mut self, input: &UserInput) -> TaskStoreResult<()> {
        self.apply(input);
        Ok(())
    }

    fn matches(&self, field: UserField, value: &FilterValue) -> bool {
        let column = match field {
            UserField::Name => &self.name,
            UserField::Email => &self.email,
        };
        matches!(value, FilterValue::Text(v) if v == column)
    }
}

impl MemoryRecord for Task {
    type Input = TaskInput;
    type Field = TaskField;

    const ENTITY: &'static str = "Task";

    fn build(id: i64, input: &TaskInput, created: NaiveDate) -> TaskStoreResult<Self> {
        let completed = parse_completed("completed", &input.completed)?;
        Ok(Task::from_input(id, input, created, completed))
    }

    fn replace(&mut self, input: &TaskInput) -> TaskStoreResult<()> {
        let completed = parse_completed("completed", &input.completed)?;
        self.apply(input, completed);
        Ok(())
    }

    fn matches(&self, field: TaskField, value: &FilterValue) -> bool {
        match (field, value) {
            (TaskField::Title, FilterValue::Text(v)) => *v == self.title,
            (TaskField::Status, FilterValue::Text(v)) => *v == self.status,
            (TaskField::Priority, FilterValue::Text(v)) => *v == self.priority,
            (TaskField::AssigneeId, FilterValue::Integer(v)) => *v == self.assignee_id,
            (TaskField::ProjectId, FilterValue::Integer(v)) => *v == self.project_id,
            _ => false,
        }
    }
}

impl MemoryRecord for Project {
    type Input = ProjectInput;
    type Field = ProjectField;

    const ENTITY: &'static str = "Project";

    fn build(id: i64, input: &ProjectInput, created: NaiveDate) -> TaskStoreResult<Self> {
        let completed = parse_completed("completed", &input.completed)?;
        Ok(Project::from_input(id, input, created, completed))
    }

    fn replace(&mut self, input: &ProjectInput) -> TaskStoreResult<()> {
        let completed = parse_completed("completed", &input.completed)?;
        self.apply(input, completed);
        Ok(())
    }

    fn matches(&self, field: ProjectField, value: &FilterValue) -> bool {
        match (field, value) {
            (ProjectField::Title, FilterValue::Text(v)) => *v == self.title,
            (ProjectField::ManagerId, FilterValue::Integer(v)) => *v == self.manager_id,
            _ => false,
        }
    }
}

#[derive(Debug)]
struct Table<R> {
    rows: BTreeMap<i64, R>,
    next_id: i64,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// In-memory repository for one record type.
#[derive(Debug)]
pub struct MemoryRepository<R> {
    table: RwLock<Table<R>>,
}

impl<R> Default for MemoryRepository<R> {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table::default()),
        }
    }
}

impl<R: MemoryRecord> MemoryRepository<R> {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.table.read().await.rows.is_empty()
    }
}

#[async_trait]
impl<R: MemoryRecord> Repository for MemoryRepository<R> {
    type Record = R;
    type Input = R::Input;
    type Field = R::Field;

    async fn insert(&self, input: &R::Input) -> TaskStoreResult<i64> {
        let mut table = self.table.write().await;
        let id = table.next_id;
        let record = R::build(id, input, Utc::now().date_naive())?;
        table.rows.insert(id, record);
        table.next_id += 1;
        Ok(id)
    }

    async fn get(&self, id: &str) -> TaskStoreResult<R> {
        let key = parse_id(id)?;
        let table = self.table.read().await;
        table
            .rows
            .get(&key)
            .cloned()
            .ok_or_else(|| TaskStoreError::not_found(R::ENTITY, id))
    }

    async fn delete(&self, id: &str) -> TaskStoreResult<()> {
        let key = parse_id(id)?;
        let mut table = self.table.write().await;
        if table.rows.remove(&key).is_none() {
            return Err(TaskStoreError::not_found(R::ENTITY, id));
        }
        Ok(())
    }

    async fn update(&self, id: &str, input: &R::Input) -> TaskStoreResult<()> {
        let key = parse_id(id)?;
        let mut table = self.table.write().await;
        let record = table
            .rows
            .get_mut(&key)
            .ok_or_else(|| TaskStoreError::not_found(R::ENTITY, id))?;
        record.replace(input)
    }

    async fn get_all(&self) -> TaskStoreResult<Vec<R>> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get_all_by(&self, field: R::Field, value: &str) -> TaskStoreResult<Vec<R>> {
        let value = FilterValue::parse(field, value)?;
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|r| r.matches(field, &value))
            .cloned()
            .collect())
    }
}

/// In-memory task store for testing purposes.
#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    users: MemoryRepository<User>,
    tasks: MemoryRepository<Task>,
    projects: MemoryRepository<Project>,
}

impl MemoryTaskStore {
    /// Creates a new in-memory task store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for MemoryTaskStore {
    type Users = MemoryRepository<User>;
    type Tasks = MemoryRepository<Task>;
    type Projects = MemoryRepository<Project>;

    fn users(&self) -> &Self::Users {
        &self.users
    }

    fn tasks(&self) -> &Self::Tasks {
        &self.tasks
    }

    fn projects(&self) -> &Self::Projects {
        &self.projects
    }
}
