//! Error types for the API server.
//!
//! Every failure reaches the client through one fixed envelope:
//! `{success: false, statusCode, message}` plus an optional `stack` field
//! carrying diagnostic detail outside production. The envelope is built
//! from this typed taxonomy, never by reflecting over arbitrary errors.

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use logdock_core::{LogError, ValidationError};

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors that can occur in the API server.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(SocketAddr, std::io::Error),

    /// Failed to open the backing log store.
    #[error("failed to open log store at {}: {source}", path.display())]
    StoreOpen {
        /// Path of the backing document.
        path: PathBuf,
        /// Underlying store failure.
        #[source]
        source: LogError,
    },

    /// The request body failed schema validation. Carries the joined,
    /// human-readable list of every violated constraint.
    #[error("Invalid log entry: {0}")]
    Validation(String),

    /// The request was rejected before reaching a handler: an unreadable
    /// JSON body or an undeserializable query string. Carries the status
    /// the extractor chose so the envelope stays truthful.
    #[error("{message}")]
    Extraction {
        /// Status chosen by the extractor.
        status: StatusCode,
        /// Why the request was rejected.
        message: String,
    },

    /// A query parameter could not be parsed.
    #[error("invalid query parameter '{name}': {reason}")]
    InvalidQuery {
        /// The parameter name.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// Writing the backing document failed.
    #[error("Failed to persist log entry")]
    Persistence {
        /// Underlying store failure.
        #[source]
        source: LogError,
        /// Diagnostic detail, present only outside production.
        detail: Option<String>,
    },

    /// No route matched the request.
    #[error("Route {0} not found")]
    RouteNotFound(String),

    /// Catch-all for unexpected failures.
    #[error("internal error: {message}")]
    Internal {
        /// What went wrong.
        message: String,
        /// Diagnostic detail, present only outside production.
        detail: Option<String>,
    },
}

impl ApiError {
    /// Builds a validation error from the collected schema violations.
    #[must_use]
    pub fn validation(errors: &[ValidationError]) -> Self {
        let joined = errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::Validation(joined)
    }

    const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Self::Extraction { status, .. } => *status,
            Self::RouteNotFound(_) => StatusCode::NOT_FOUND,
            Self::BindFailed(_, _)
            | Self::StoreOpen { .. }
            | Self::Persistence { .. }
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> Option<String> {
        match self {
            Self::Persistence { detail, .. } | Self::Internal { detail, .. } => detail.clone(),
            _ => None,
        }
    }
}

/// JSON error response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    success: bool,
    status_code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            success: false,
            status_code: status.as_u16(),
            message: self.to_string(),
            stack: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}
