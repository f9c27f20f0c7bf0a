//! Application state shared across handlers

use crate::config::ServerConfig;
use podium_store::FileScoreStore;
use std::time::Instant;

/// State shared by every request handler
#[derive(Debug)]
pub struct AppState {
    /// Resolved server configuration
    pub config: ServerConfig,
    /// The file-backed score store
    pub store: FileScoreStore,
    /// Server start time, for uptime reporting
    started: Instant,
}

impl AppState {
    /// Build the state from a resolved configuration
    pub fn new(config: ServerConfig) -> Self {
        let store = FileScoreStore::new(config.data_path.clone());
        Self {
            config,
            store,
            started: Instant::now(),
        }
    }

    /// Seconds since the server started
    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}
