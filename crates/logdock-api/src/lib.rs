//! # logdock-api
//!
//! HTTP ingestion and query API for Logdock, built on axum.
//!
//! ## Example
//!
//! ```rust,no_run
//! use logdock_api::{ApiConfig, ApiError, ApiServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ApiError> {
//!     let config = ApiConfig::default();
//!     let addr = config.bind_addr;
//!     let server = ApiServer::new(config)?;
//!     server.serve(addr).await
//! }
//! ```
//!
//! ## API Endpoints
//!
//! | Endpoint | Method | Description |
//! |----------|--------|-------------|
//! | `/api/v1/logs` | POST | Ingest one log entry |
//! | `/api/v1/logs` | GET | Query logs by field filters and time range |
//! | `/api/v1/health` | GET | Service health and uptime |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

// Re-export main types
pub use config::ApiConfig;
pub use envelope::{ApiResponse, HealthStatus};
pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiQuery};
pub use server::ApiServer;
pub use state::AppState;
