//! API server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use logdock_core::JsonLogStore;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use crate::routes::create_router;
use crate::state::AppState;

/// HTTP server for log ingestion and querying.
#[derive(Debug, Clone)]
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Create a new server, opening the backing log store.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing document cannot be created.
    pub fn new(config: ApiConfig) -> ApiResult<Self> {
        let store = JsonLogStore::new(&config.data_path).map_err(|source| ApiError::StoreOpen {
            path: config.data_path.clone(),
            source,
        })?;
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create a new server around an already-opened store.
    #[must_use]
    pub fn with_store(config: ApiConfig, store: Arc<JsonLogStore>) -> Self {
        let state = Arc::new(AppState::new(config, store));
        Self { state }
    }

    /// Get the application state for external access.
    #[must_use]
    pub fn state(&self) -> Arc<AppState> {
        self.state.clone()
    }

    /// Start the server and listen for connections.
    ///
    /// This method runs until the server encounters a fatal error.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve(&self, addr: SocketAddr) -> ApiResult<()> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        info!(addr = %addr, "Log ingestion API listening");

        let router = create_router(self.state.clone());

        axum::serve(listener, router)
            .await
            .map_err(|e| ApiError::Internal {
                message: e.to_string(),
                detail: None,
            })?;

        Ok(())
    }

    /// Start the server with graceful shutdown support.
    ///
    /// The server shuts down when the provided future completes.
    ///
    /// # Errors
    ///
    /// Returns an error if binding to the address fails.
    pub async fn serve_with_shutdown<F>(&self, addr: SocketAddr, shutdown: F) -> ApiResult<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| ApiError::BindFailed(addr, e))?;

        info!(addr = %addr, "Log ingestion API listening");

        let router = create_router(self.state.clone());

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| ApiError::Internal {
                message: e.to_string(),
                detail: None,
            })?;

        info!("Log ingestion API shut down");
        Ok(())
    }

    /// Create the router without starting the server.
    ///
    /// Useful for testing or embedding in another server.
    #[must_use]
    pub fn router(&self) -> axum::Router {
        create_router(self.state.clone())
    }
}
