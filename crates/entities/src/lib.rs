//! Core entity definitions for the project-management service.
//!
//! This crate defines the stored records for users, tasks and projects,
//! the inputs used to create or replace them, and the columns a search is
//! allowed to filter on.

mod field;
mod project;
mod task;
mod user;
pub mod validation;

pub use field::*;
pub use project::*;
pub use task::*;
pub use user::*;
