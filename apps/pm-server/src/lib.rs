//! Project-management HTTP server
//!
//! Exposes users, tasks and projects over a JSON API. Handlers are generic
//! over the [`TaskStore`] backend so the same router runs on PostgreSQL in
//! production and on the in-memory store in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod state;

#[cfg(test)]
mod test_support;

use axum::{Router, extract::DefaultBodyLimit};
use task_store::TaskStore;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::Config;
use crate::state::{SharedState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app<S: TaskStore>(state: SharedState<S>) -> Router {
    api::create_router()
        .with_state(state)
        .layer(DefaultBodyLimit::max(api::MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(middleware::secure_headers))
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state with the given configuration and store.
pub fn create_state<S: TaskStore>(config: Config, store: S) -> SharedState<S> {
    create_shared_state(config, store)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
