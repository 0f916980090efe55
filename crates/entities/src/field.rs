//! Filterable columns per entity.
//!
//! Searches never take a column name from the caller. A search first picks
//! one of these enumerated fields and the store only ever sees the
//! `&'static str` column it maps to.

use std::fmt;

/// How a filter value is compared against a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Exact textual equality.
    Text,
    /// Integer equality; the raw value must parse as `i64`.
    Integer,
}

/// A column that may appear in an equality filter.
pub trait FilterField: Copy + fmt::Debug + Send + Sync + 'static {
    /// Storage column name.
    fn column(self) -> &'static str;

    /// Comparison kind for this column.
    fn kind(self) -> FieldKind;
}

/// Filterable user columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    Name,
    Email,
}

impl FilterField for UserField {
    fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
        }
    }

    fn kind(self) -> FieldKind {
        FieldKind::Text
    }
}

/// Filterable task columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskField {
    Title,
    Status,
    Priority,
    AssigneeId,
    ProjectId,
}

impl FilterField for TaskField {
    fn column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Status => "status",
            Self::Priority => "priority",
            Self::AssigneeId => "assignee_id",
            Self::ProjectId => "project_id",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Title | Self::Status | Self::Priority => FieldKind::Text,
            Self::AssigneeId | Self::ProjectId => FieldKind::Integer,
        }
    }
}

/// Filterable project columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectField {
    Title,
    ManagerId,
}

impl FilterField for ProjectField {
    fn column(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::ManagerId => "manager_id",
        }
    }

    fn kind(self) -> FieldKind {
        match self {
            Self::Title => FieldKind::Text,
            Self::ManagerId => FieldKind::Integer,
        }
    }
}
