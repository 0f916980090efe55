//! Application state.

use std::sync::Arc;

use task_store::TaskStore;

use crate::config::Config;

/// Shared application state.
pub struct AppState<S: TaskStore> {
    /// Server configuration.
    pub config: Config,
    /// Repository backend.
    pub store: S,
}

impl<S: TaskStore> AppState<S> {
    /// Creates new application state.
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }
}

/// Type alias for shared state.
pub type SharedState<S> = Arc<AppState<S>>;

/// Creates shared state from config and store.
pub fn create_shared_state<S: TaskStore>(config: Config, store: S) -> SharedState<S> {
    Arc::new(AppState::new(config, store))
}
