//! HTTP request handlers for the log ingestion API.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use logdock_core::{
    parse_timestamp, sort_newest_first, validate_entry, LogEntry, LogFilter, LogLevel,
};

use crate::envelope::{ApiResponse, HealthStatus};
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

/// Query parameters accepted by the listing endpoint.
///
/// An empty string is treated the same as an absent parameter.
#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    /// Filter by severity level (exact match).
    pub level: Option<String>,
    /// Text search in the message field.
    pub message: Option<String>,
    /// Text search in the resource identifier.
    #[serde(rename = "resourceId")]
    pub resource_id: Option<String>,
    /// Inclusive lower bound on the entry timestamp.
    pub timestamp_start: Option<String>,
    /// Inclusive upper bound on the entry timestamp.
    pub timestamp_end: Option<String>,
    /// Text search in the trace identifier.
    #[serde(rename = "traceId")]
    pub trace_id: Option<String>,
    /// Text search in the span identifier.
    #[serde(rename = "spanId")]
    pub span_id: Option<String>,
    /// Text search in the commit hash.
    pub commit: Option<String>,
}

impl LogQuery {
    /// Converts the raw query parameters into filter criteria.
    ///
    /// # Errors
    ///
    /// Returns 400-mapped errors for an unknown level or an unparsable
    /// timestamp bound.
    pub fn into_filter(self) -> ApiResult<LogFilter> {
        let mut filter = LogFilter::new();

        if let Some(raw) = normalize(self.level) {
            let level = LogLevel::parse(&raw).ok_or_else(|| ApiError::InvalidQuery {
                name: "level",
                reason: format!(
                    "must be one of {} (got '{raw}')",
                    LogLevel::ALLOWED.join(", ")
                ),
            })?;
            filter.level = Some(level);
        }

        filter.message = normalize(self.message);
        filter.resource_id = normalize(self.resource_id);
        filter.trace_id = normalize(self.trace_id);
        filter.span_id = normalize(self.span_id);
        filter.commit = normalize(self.commit);

        if let Some(raw) = normalize(self.timestamp_start) {
            filter.start = Some(parse_bound("timestamp_start", &raw)?);
        }
        if let Some(raw) = normalize(self.timestamp_end) {
            filter.end = Some(parse_bound("timestamp_end", &raw)?);
        }

        Ok(filter)
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn parse_bound(name: &'static str, raw: &str) -> ApiResult<chrono::DateTime<Utc>> {
    parse_timestamp(raw).ok_or_else(|| ApiError::InvalidQuery {
        name,
        reason: format!("'{raw}' is not an ISO-8601 datetime"),
    })
}

/// Handle POST /api/v1/logs - ingest one log entry.
pub async fn create_log(
    State(state): State<Arc<AppState>>,
    ApiJson(raw): ApiJson<Value>,
) -> ApiResult<(StatusCode, Json<ApiResponse<LogEntry>>)> {
    let entry = validate_entry(&raw).map_err(|errors| ApiError::validation(&errors))?;

    let stored = state.store().create(entry).map_err(|source| {
        let detail = state.error_detail(&source);
        ApiError::Persistence { source, detail }
    })?;

    debug!(level = stored.level.as_str(), resource_id = %stored.resource_id, "log entry stored");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(stored, "Log entry created successfully")),
    ))
}

/// Handle GET /api/v1/logs - list entries, newest first.
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    ApiQuery(query): ApiQuery<LogQuery>,
) -> ApiResult<Json<ApiResponse<Vec<LogEntry>>>> {
    let filter = query.into_filter()?;

    let mut entries = if filter.is_empty() {
        state.store().list_all()
    } else {
        state.store().list_filtered(&filter)
    };
    sort_newest_first(&mut entries);

    Ok(Json(ApiResponse::new(
        entries,
        "Logs retrieved successfully",
    )))
}

/// Handle GET /api/v1/health - service health, no store interaction.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthStatus>> {
    let health = HealthStatus {
        status: "OK".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        uptime: state.uptime(),
        environment: state.config().environment.clone(),
    };
    Json(ApiResponse::new(health, "Service is healthy"))
}

/// Fallback handler for unmatched routes.
pub async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use logdock_core::JsonLogStore;
    use serde_json::json;
    use tempfile::TempDir;

    use crate::config::ApiConfig;

    fn make_test_state() -> (Arc<AppState>, TempDir) {
        let dir = TempDir::new().expect("create temp dir");
        let config = ApiConfig::default().with_data_path(dir.path().join("logs.json"));
        let store = Arc::new(JsonLogStore::new(&config.data_path).expect("open store"));
        (Arc::new(AppState::new(config, store)), dir)
    }

    fn valid_body() -> Value {
        json!({
            "level": "error",
            "message": "DB timeout",
            "resourceId": "server-1",
            "timestamp": "2024-06-01T12:00:00Z",
            "traceId": "trace-abc",
            "spanId": "span-def",
            "commit": "5e5342f",
            "metadata": {}
        })
    }

    // ===========================================
    // Query Conversion Tests
    // ===========================================

    #[test]
    fn empty_query_yields_empty_filter() {
        let filter = LogQuery::default().into_filter().expect("convert");
        assert!(filter.is_empty());
    }

    #[test]
    fn empty_strings_are_treated_as_absent() {
        let query = LogQuery {
            level: Some(String::new()),
            message: Some(String::new()),
            ..LogQuery::default()
        };
        let filter = query.into_filter().expect("convert");
        assert!(filter.is_empty());
    }

    #[test]
    fn supplied_criteria_are_carried_over() {
        let query = LogQuery {
            level: Some("error".to_string()),
            message: Some("timeout".to_string()),
            resource_id: Some("server-1".to_string()),
            timestamp_start: Some("2024-06-01T00:00:00Z".to_string()),
            timestamp_end: Some("2024-06-02T00:00:00Z".to_string()),
            ..LogQuery::default()
        };

        let filter = query.into_filter().expect("convert");
        assert_eq!(filter.level, Some(LogLevel::Error));
        assert_eq!(filter.message.as_deref(), Some("timeout"));
        assert_eq!(filter.resource_id.as_deref(), Some("server-1"));
        assert!(filter.start.is_some());
        assert!(filter.end.is_some());
    }

    #[test]
    fn unknown_level_is_rejected() {
        let query = LogQuery {
            level: Some("fatal".to_string()),
            ..LogQuery::default()
        };
        let err = query.into_filter().expect_err("unknown level");
        assert!(matches!(err, ApiError::InvalidQuery { name: "level", .. }));
    }

    #[test]
    fn unparsable_bound_is_rejected() {
        let query = LogQuery {
            timestamp_start: Some("yesterday".to_string()),
            ..LogQuery::default()
        };
        let err = query.into_filter().expect_err("bad bound");
        assert!(matches!(
            err,
            ApiError::InvalidQuery {
                name: "timestamp_start",
                ..
            }
        ));
    }

    // ===========================================
    // Handler Tests
    // ===========================================

    #[tokio::test]
    async fn create_log_stores_and_returns_entry() {
        let (state, _dir) = make_test_state();

        let (status, Json(response)) = create_log(State(state.clone()), ApiJson(valid_body()))
            .await
            .expect("create");

        assert_eq!(status, StatusCode::CREATED);
        assert!(response.success);
        assert_eq!(response.data.message, "DB timeout");
        assert_eq!(response.message, "Log entry created successfully");

        assert_eq!(state.store().list_all().len(), 1);
    }

    #[tokio::test]
    async fn create_log_rejects_invalid_body_without_storing() {
        let (state, _dir) = make_test_state();

        let body = json!({ "level": "bogus", "message": "Test message" });
        let result = create_log(State(state.clone()), ApiJson(body)).await;

        let err = result.expect_err("invalid body");
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(state.store().list_all().is_empty());
    }

    #[tokio::test]
    async fn list_logs_returns_newest_first() {
        let (state, _dir) = make_test_state();

        for (message, timestamp) in [
            ("t1-first", "2024-06-01T10:00:00Z"),
            ("t2", "2024-06-01T11:00:00Z"),
            ("t1-second", "2024-06-01T10:00:00Z"),
        ] {
            let mut body = valid_body();
            body["message"] = json!(message);
            body["timestamp"] = json!(timestamp);
            create_log(State(state.clone()), ApiJson(body))
                .await
                .expect("create");
        }

        let Json(response) = list_logs(State(state), ApiQuery(LogQuery::default()))
            .await
            .expect("list");

        let messages: Vec<&str> = response.data.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, ["t2", "t1-first", "t1-second"]);
    }

    #[tokio::test]
    async fn list_logs_applies_filter() {
        let (state, _dir) = make_test_state();

        let mut error_body = valid_body();
        error_body["message"] = json!("db down");
        create_log(State(state.clone()), ApiJson(error_body))
            .await
            .expect("create");

        let mut info_body = valid_body();
        info_body["level"] = json!("info");
        info_body["message"] = json!("all good");
        create_log(State(state.clone()), ApiJson(info_body))
            .await
            .expect("create");

        let query = LogQuery {
            level: Some("error".to_string()),
            ..LogQuery::default()
        };
        let Json(response) = list_logs(State(state), ApiQuery(query)).await.expect("list");

        assert_eq!(response.data.len(), 1);
        assert_eq!(response.data[0].message, "db down");
    }

    #[tokio::test]
    async fn health_check_reports_status() {
        let (state, _dir) = make_test_state();

        let Json(response) = health_check(State(state)).await;

        assert!(response.success);
        assert_eq!(response.data.status, "OK");
        assert_eq!(response.data.environment, "development");
        assert!(response.data.uptime >= 0.0);
        assert!(parse_timestamp(&response.data.timestamp).is_some());
    }

    #[tokio::test]
    async fn route_not_found_names_the_path() {
        let uri: Uri = "/api/v2/metrics".parse().expect("uri");
        let err = route_not_found(uri).await;
        assert_eq!(err.to_string(), "Route /api/v2/metrics not found");
    }
}
