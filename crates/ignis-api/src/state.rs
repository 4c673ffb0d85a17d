//! Shared handler state.

use std::path::Path;
use std::sync::Arc;

use ignis_core::{IgnisConfig, LimitsConfig};
use ignis_storage::OccurrenceStore;

/// Store and configuration handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn OccurrenceStore>,
    config: Arc<IgnisConfig>,
}

impl AppState {
    /// Creates state over any store backend.
    pub fn new(store: Arc<dyn OccurrenceStore>, config: IgnisConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// The configured store.
    pub fn store(&self) -> &dyn OccurrenceStore {
        self.store.as_ref()
    }

    /// Full configuration.
    pub fn config(&self) -> &IgnisConfig {
        &self.config
    }

    /// Request limits.
    pub fn limits(&self) -> &LimitsConfig {
        &self.config.limits
    }

    /// Root of the static files and GeoJSON overlays.
    pub fn public_dir(&self) -> &Path {
        &self.config.server.public_dir
    }
}
