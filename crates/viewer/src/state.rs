use crate::config::ViewerConfig;
use crate::logs::LogStore;
use std::sync::Arc;

/// Shared application state (thread-safe)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ViewerConfig>,
    pub store: Arc<LogStore>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        let store = Arc::new(LogStore::new(&config.logs));

        Self {
            config: Arc::new(config),
            store,
        }
    }

    /// Whether error pages may show internal details.
    pub fn debug(&self) -> bool {
        self.config.server.debug
    }
}
