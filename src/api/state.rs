//! Application state for the Roster Engine API.

use std::sync::Arc;

use crate::config::{ConfigLoader, RosterConfig};

/// Shared application state.
///
/// Holds the loaded roster configuration behind an `Arc`; it is never
/// mutated after startup.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the roster configuration.
    pub fn config(&self) -> &RosterConfig {
        self.config.config()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ConfigLoader::default())
    }
}
