//! Schema validation for inbound log records.
//!
//! [`validate_entry`] checks a raw JSON value against the log schema and
//! collects every violation instead of short-circuiting on the first, so a
//! client sees the full list of problems in one response.

use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

use crate::types::{parse_timestamp, LogEntry, LogLevel};

/// The kind of schema violation that occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The field was absent or null.
    Missing,
    /// The field was present but not a string.
    NotAString,
    /// The field was an empty string where a value is required.
    Empty,
    /// The level was not one of the accepted values.
    UnknownLevel {
        /// The rejected value.
        found: String,
    },
    /// The timestamp did not parse as an ISO-8601 datetime.
    InvalidTimestamp {
        /// The rejected value.
        found: String,
    },
    /// The field (or the whole body) was not a JSON object.
    NotAnObject,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "is required"),
            Self::NotAString => write!(f, "must be a string"),
            Self::Empty => write!(f, "must not be empty"),
            Self::UnknownLevel { found } => write!(
                f,
                "must be one of {} (got '{found}')",
                LogLevel::ALLOWED.join(", ")
            ),
            Self::InvalidTimestamp { found } => {
                write!(f, "must be an ISO-8601 datetime (got '{found}')")
            }
            Self::NotAnObject => write!(f, "must be an object"),
        }
    }
}

/// A single schema violation, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{field}' {kind}")]
pub struct ValidationError {
    /// The name of the field that failed validation (wire name).
    pub field: &'static str,
    /// The kind of violation.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    const fn new(field: &'static str, kind: ValidationErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Validates a raw JSON value against the log schema.
///
/// On success returns the normalized entry built from exactly the schema
/// fields; extraneous fields in the input are dropped. On failure returns
/// every violation found.
pub fn validate_entry(raw: &Value) -> Result<LogEntry, Vec<ValidationError>> {
    let Some(map) = raw.as_object() else {
        return Err(vec![ValidationError::new(
            "body",
            ValidationErrorKind::NotAnObject,
        )]);
    };

    let mut errors = Vec::new();

    let level = match map.get("level") {
        None | Some(Value::Null) => {
            errors.push(ValidationError::new("level", ValidationErrorKind::Missing));
            None
        }
        Some(Value::String(raw_level)) => match LogLevel::parse(raw_level) {
            Some(level) => Some(level),
            None => {
                errors.push(ValidationError::new(
                    "level",
                    ValidationErrorKind::UnknownLevel {
                        found: raw_level.clone(),
                    },
                ));
                None
            }
        },
        Some(_) => {
            errors.push(ValidationError::new(
                "level",
                ValidationErrorKind::NotAString,
            ));
            None
        }
    };

    let message = required_string(map, "message", &mut errors);
    if let Some(ref text) = message {
        if text.is_empty() {
            errors.push(ValidationError::new("message", ValidationErrorKind::Empty));
        }
    }

    let resource_id = required_string(map, "resourceId", &mut errors);

    let timestamp = required_string(map, "timestamp", &mut errors);
    if let Some(ref raw_ts) = timestamp {
        if parse_timestamp(raw_ts).is_none() {
            errors.push(ValidationError::new(
                "timestamp",
                ValidationErrorKind::InvalidTimestamp {
                    found: raw_ts.clone(),
                },
            ));
        }
    }

    let trace_id = required_string(map, "traceId", &mut errors);
    let span_id = required_string(map, "spanId", &mut errors);
    let commit = required_string(map, "commit", &mut errors);

    let metadata = match map.get("metadata") {
        None | Some(Value::Null) => {
            errors.push(ValidationError::new(
                "metadata",
                ValidationErrorKind::Missing,
            ));
            None
        }
        Some(Value::Object(fields)) => Some(
            fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect::<HashMap<String, Value>>(),
        ),
        Some(_) => {
            errors.push(ValidationError::new(
                "metadata",
                ValidationErrorKind::NotAnObject,
            ));
            None
        }
    };

    match (
        level, message, resource_id, timestamp, trace_id, span_id, commit, metadata,
    ) {
        (
            Some(level),
            Some(message),
            Some(resource_id),
            Some(timestamp),
            Some(trace_id),
            Some(span_id),
            Some(commit),
            Some(metadata),
        ) if errors.is_empty() => Ok(LogEntry {
            level,
            message,
            resource_id,
            timestamp,
            trace_id,
            span_id,
            commit,
            metadata,
        }),
        _ => Err(errors),
    }
}

fn required_string(
    map: &serde_json::Map<String, Value>,
    field: &'static str,
    errors: &mut Vec<ValidationError>,
) -> Option<String> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.push(ValidationError::new(field, ValidationErrorKind::Missing));
            None
        }
        Some(Value::String(text)) => Some(text.clone()),
        Some(_) => {
            errors.push(ValidationError::new(field, ValidationErrorKind::NotAString));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "level": "error",
            "message": "DB timeout",
            "resourceId": "server-1",
            "timestamp": "2024-06-01T12:00:00Z",
            "traceId": "trace-abc",
            "spanId": "span-def",
            "commit": "5e5342f",
            "metadata": { "retries": 3 }
        })
    }

    #[test]
    fn accepts_conforming_record() {
        let entry = validate_entry(&valid_body()).expect("valid record");
        assert_eq!(entry.level, LogLevel::Error);
        assert_eq!(entry.message, "DB timeout");
        assert_eq!(entry.resource_id, "server-1");
        assert_eq!(entry.metadata["retries"], json!(3));
    }

    #[test]
    fn accepts_empty_metadata() {
        let mut body = valid_body();
        body["metadata"] = json!({});
        let entry = validate_entry(&body).expect("valid record");
        assert!(entry.metadata.is_empty());
    }

    #[test]
    fn drops_extraneous_fields() {
        let mut body = valid_body();
        body["hostname"] = json!("web-42");

        let entry = validate_entry(&body).expect("valid record");
        let round_tripped = serde_json::to_value(&entry).expect("serialize");
        assert!(round_tripped.get("hostname").is_none());
    }

    #[test]
    fn rejects_non_object_body() {
        let errors = validate_entry(&json!([1, 2, 3])).expect_err("array body");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "body");
        assert_eq!(errors[0].kind, ValidationErrorKind::NotAnObject);
    }

    #[test]
    fn rejects_unknown_level() {
        let mut body = valid_body();
        body["level"] = json!("bogus");

        let errors = validate_entry(&body).expect_err("bad level");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "level");
        assert!(errors[0].to_string().contains("bogus"));
    }

    #[test]
    fn rejects_uppercase_level() {
        let mut body = valid_body();
        body["level"] = json!("ERROR");
        let errors = validate_entry(&body).expect_err("level is case sensitive");
        assert_eq!(errors[0].field, "level");
    }

    #[test]
    fn rejects_missing_fields_and_reports_each() {
        let body = json!({ "level": "info" });
        let errors = validate_entry(&body).expect_err("missing fields");

        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        for expected in [
            "message",
            "resourceId",
            "timestamp",
            "traceId",
            "spanId",
            "commit",
            "metadata",
        ] {
            assert!(fields.contains(&expected), "missing error for {expected}");
        }
    }

    #[test]
    fn collects_multiple_violations_without_short_circuiting() {
        let body = json!({
            "level": "bogus",
            "message": 42,
            "resourceId": "server-1",
            "timestamp": "not-a-date",
            "traceId": "t",
            "spanId": "s",
            "commit": "c",
            "metadata": "not-an-object"
        });

        let errors = validate_entry(&body).expect_err("several violations");
        assert_eq!(errors.len(), 4);

        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["level", "message", "timestamp", "metadata"]);
    }

    #[test]
    fn rejects_empty_message() {
        let mut body = valid_body();
        body["message"] = json!("");
        let errors = validate_entry(&body).expect_err("empty message");
        assert_eq!(errors[0].kind, ValidationErrorKind::Empty);
    }

    #[test]
    fn rejects_non_string_timestamp() {
        let mut body = valid_body();
        body["timestamp"] = json!(1_717_243_200);
        let errors = validate_entry(&body).expect_err("numeric timestamp");
        assert_eq!(errors[0].field, "timestamp");
        assert_eq!(errors[0].kind, ValidationErrorKind::NotAString);
    }

    #[test]
    fn accepts_date_only_timestamp() {
        let mut body = valid_body();
        body["timestamp"] = json!("2024-06-01");
        let entry = validate_entry(&body).expect("date-only timestamp");
        assert_eq!(entry.timestamp, "2024-06-01");
    }

    #[test]
    fn rejects_unparsable_timestamp() {
        let mut body = valid_body();
        body["timestamp"] = json!("June 1st 2024");
        let errors = validate_entry(&body).expect_err("bad timestamp");
        assert!(matches!(
            errors[0].kind,
            ValidationErrorKind::InvalidTimestamp { .. }
        ));
    }

    #[test]
    fn null_fields_count_as_missing() {
        let mut body = valid_body();
        body["traceId"] = json!(null);
        let errors = validate_entry(&body).expect_err("null field");
        assert_eq!(errors[0].field, "traceId");
        assert_eq!(errors[0].kind, ValidationErrorKind::Missing);
    }

    #[test]
    fn error_display_names_the_field() {
        let err = ValidationError::new("timestamp", ValidationErrorKind::Missing);
        assert_eq!(err.to_string(), "'timestamp' is required");
    }
}
