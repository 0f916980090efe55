//! User-related entity definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validation;

/// A person who can be assigned tasks or manage projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Free-form role, e.g. `manager`.
    pub role: String,
    /// Day the record was stored.
    pub created: NaiveDate,
}

/// Body of a create or replace request for a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl UserInput {
    /// Creates a new user input.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    /// Returns true if the email is well formed.
    ///
    /// Name and role are not checked.
    pub fn is_valid(&self) -> bool {
        validation::is_email(&self.email)
    }
}

impl User {
    /// Builds the stored record for `input`.
    pub fn from_input(id: i64, input: &UserInput, created: NaiveDate) -> Self {
        Self {
            id,
            name: input.name.clone(),
            email: input.email.clone(),
            role: input.role.clone(),
            created,
        }
    }

    /// Replaces every mutable field with the values from `input`.
    pub fn apply(&mut self, input: &UserInput) {
        self.name = input.name.clone();
        self.email = input.email.clone();
        self.role = input.role.clone();
    }
}
