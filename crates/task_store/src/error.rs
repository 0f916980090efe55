//! Task store error types.

use thiserror::Error;

/// Errors that can occur during task store operations.
///
/// `NotFound` is the only kind callers are expected to branch on; every
/// other variant is a backend failure.
#[derive(Debug, Error)]
pub enum TaskStoreError {
    /// No record matched the identity.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Identity was not a decimal integer.
    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),

    /// A field or filter value could not be converted to its column type.
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl TaskStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }

    /// Returns true for the "no matching record" sentinel.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;
