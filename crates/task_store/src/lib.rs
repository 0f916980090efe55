//! Storage for the project-management service
//!
//! This crate defines the repository contract shared by users, tasks and
//! projects, and two backends implementing it: an in-memory store (for
//! tests and single-process runs) and PostgreSQL.

mod error;
mod memory;
mod postgres;
mod traits;

pub use error::*;
pub use memory::*;
pub use postgres::*;
pub use traits::*;
