// Application state module
// Shared, read-only state handed to every connection

use super::types::Config;
use crate::store::ClimateStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: ClimateStore,
}

impl AppState {
    pub const fn new(config: Config, store: ClimateStore) -> Self {
        Self { config, store }
    }

    /// Whether access log lines should be produced
    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
