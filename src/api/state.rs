//! Application state for the payroll summary API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::ingest::RecordStore;

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded report configuration and the uploaded record tables.
#[derive(Clone)]
pub struct AppState {
    /// The loaded report configuration.
    config: Arc<ConfigLoader>,
    /// Uploaded record tables.
    store: Arc<RwLock<RecordStore>>,
}

impl AppState {
    /// Creates a new application state with an empty record store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, RecordStore::new())
    }

    /// Creates a new application state around an existing record store.
    pub fn with_store(config: ConfigLoader, store: RecordStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared record store.
    pub fn store(&self) -> &RwLock<RecordStore> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let state = AppState::new(ConfigLoader::default());
        let clone = state.clone();

        clone.store().write().await.replace_table("payroll", vec![]);

        assert!(state.store().read().await.records("payroll").is_ok());
    }
}
