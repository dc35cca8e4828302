//! Shared state for the API server.

use std::sync::Arc;
use std::time::Instant;

use logdock_core::JsonLogStore;

use crate::config::ApiConfig;

/// Shared state injected into every request handler.
///
/// The store is an explicit handle constructed once at process start and
/// passed by reference, not a process-wide singleton.
#[derive(Debug)]
pub struct AppState {
    /// Server configuration.
    config: Arc<ApiConfig>,
    /// The log store.
    store: Arc<JsonLogStore>,
    /// Server start time.
    start_time: Instant,
}

impl AppState {
    /// Create a new application state.
    pub fn new(config: ApiConfig, store: Arc<JsonLogStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            start_time: Instant::now(),
        }
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Get a reference to the log store.
    #[must_use]
    pub fn store(&self) -> &JsonLogStore {
        &self.store
    }

    /// Seconds since the server started.
    #[must_use]
    pub fn uptime(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    /// Diagnostic detail for an error, gated on the environment.
    ///
    /// Returns `None` outside development so internals never leak into
    /// production responses.
    #[must_use]
    pub fn error_detail(&self, error: &dyn std::error::Error) -> Option<String> {
        if self.config.expose_error_detail() {
            Some(format!("{error:#?}"))
        } else {
            None
        }
    }
}
