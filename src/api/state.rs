//! Application state for the HR engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Contains the loaded reference configuration and the record store,
/// shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    store: Arc<MemoryStore>,
}

impl AppState {
    /// Creates a new application state with the given configuration
    /// loader and an empty record store.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns a reference to the record store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }
}
