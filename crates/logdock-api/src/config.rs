//! API server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Configuration for the log ingestion API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address to bind the HTTP server to.
    pub bind_addr: SocketAddr,
    /// Path of the JSON document holding the log collection.
    pub data_path: PathBuf,
    /// CORS allowed origins (empty means all).
    pub cors_origins: Vec<String>,
    /// Deployment environment name, reported by the health endpoint.
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
            data_path: PathBuf::from("logs.json"),
            cors_origins: Vec::new(),
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create a new configuration with the specified bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            ..Self::default()
        }
    }

    /// Set the path of the backing document.
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Add a CORS allowed origin.
    #[must_use]
    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origins.push(origin.into());
        self
    }

    /// Set the deployment environment name.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    /// Whether error responses may carry diagnostic detail.
    ///
    /// Detail is exposed only in the development environment.
    #[must_use]
    pub fn expose_error_detail(&self) -> bool {
        self.environment == "development"
    }
}
