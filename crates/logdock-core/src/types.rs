//! Core types for log entries and query filtering.
//!
//! This module provides:
//! - [`LogLevel`] — Severity levels for log entries
//! - [`LogEntry`] — Structured log entry with metadata
//! - [`LogFilter`] — Query criteria for searching logs
//! - [`parse_timestamp`] / [`sort_newest_first`] — timestamp helpers

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Log severity levels accepted by the ingestion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error conditions
    Error,
    /// Warning conditions
    Warn,
    /// General information
    Info,
    /// Debugging information
    Debug,
}

impl LogLevel {
    /// The wire names of every accepted level, for error messages.
    pub const ALLOWED: [&'static str; 4] = ["error", "warn", "info", "debug"];

    /// Parses a level from its wire name. Matching is exact (case-sensitive).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "error" => Some(Self::Error),
            "warn" => Some(Self::Warn),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Returns the string representation of this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

/// A structured log entry. Immutable once stored.
///
/// The timestamp is kept as the ISO-8601 string the client sent; it is
/// parsed on demand for range filtering and sorting so that legacy or
/// hand-edited documents with bad timestamps degrade gracefully instead
/// of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// Severity level
    pub level: LogLevel,
    /// The log message
    pub message: String,
    /// Identifier of the resource that emitted the log
    pub resource_id: String,
    /// ISO-8601 datetime string
    pub timestamp: String,
    /// Distributed trace identifier
    pub trace_id: String,
    /// Span identifier within the trace
    pub span_id: String,
    /// Commit hash of the emitting build
    pub commit: String,
    /// Additional structured fields (may be empty)
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl LogEntry {
    /// Parses this entry's timestamp, if it is a valid ISO-8601 datetime.
    #[must_use]
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Checks if this entry matches the given filter.
    ///
    /// Criteria compose with logical AND; absent criteria impose no
    /// constraint. An entry whose timestamp does not parse never matches
    /// a filter that carries a range bound.
    #[must_use]
    pub fn matches(&self, filter: &LogFilter) -> bool {
        if let Some(level) = filter.level {
            if self.level != level {
                return false;
            }
        }

        if let Some(ref needle) = filter.message {
            if !contains_ignore_case(&self.message, needle) {
                return false;
            }
        }

        if let Some(ref needle) = filter.resource_id {
            if !contains_ignore_case(&self.resource_id, needle) {
                return false;
            }
        }

        if let Some(ref needle) = filter.trace_id {
            if !contains_ignore_case(&self.trace_id, needle) {
                return false;
            }
        }

        if let Some(ref needle) = filter.span_id {
            if !contains_ignore_case(&self.span_id, needle) {
                return false;
            }
        }

        if let Some(ref needle) = filter.commit {
            if !contains_ignore_case(&self.commit, needle) {
                return false;
            }
        }

        if filter.start.is_some() || filter.end.is_some() {
            let Some(timestamp) = self.parsed_timestamp() else {
                return false;
            };
            if let Some(start) = filter.start {
                if timestamp < start {
                    return false;
                }
            }
            if let Some(end) = filter.end {
                if timestamp > end {
                    return false;
                }
            }
        }

        true
    }
}

/// Filter criteria for querying logs.
///
/// `level` matches by exact equality; the text criteria match by
/// case-insensitive substring containment; `start`/`end` are inclusive
/// bounds on the parsed timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    /// Filter by severity level (exact match)
    pub level: Option<LogLevel>,
    /// Text search in the message field
    pub message: Option<String>,
    /// Text search in the resource identifier
    pub resource_id: Option<String>,
    /// Text search in the trace identifier
    pub trace_id: Option<String>,
    /// Text search in the span identifier
    pub span_id: Option<String>,
    /// Text search in the commit hash
    pub commit: Option<String>,
    /// Entries at or after this instant (inclusive)
    pub start: Option<DateTime<Utc>>,
    /// Entries at or before this instant (inclusive)
    pub end: Option<DateTime<Utc>>,
}

impl LogFilter {
    /// Creates a new empty filter that matches all entries.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no criterion is supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Adds a level criterion.
    #[must_use]
    pub const fn with_level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    /// Adds a message search criterion.
    #[must_use]
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }

    /// Adds a resource identifier criterion.
    #[must_use]
    pub fn with_resource_id(mut self, text: impl Into<String>) -> Self {
        self.resource_id = Some(text.into());
        self
    }

    /// Adds a trace identifier criterion.
    #[must_use]
    pub fn with_trace_id(mut self, text: impl Into<String>) -> Self {
        self.trace_id = Some(text.into());
        self
    }

    /// Adds a span identifier criterion.
    #[must_use]
    pub fn with_span_id(mut self, text: impl Into<String>) -> Self {
        self.span_id = Some(text.into());
        self
    }

    /// Adds a commit hash criterion.
    #[must_use]
    pub fn with_commit(mut self, text: impl Into<String>) -> Self {
        self.commit = Some(text.into());
        self
    }

    /// Adds an inclusive lower bound on the entry timestamp.
    #[must_use]
    pub const fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    /// Adds an inclusive upper bound on the entry timestamp.
    #[must_use]
    pub const fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }
}

/// Parses an ISO-8601 datetime string into a UTC instant.
///
/// Accepts RFC 3339 (with `Z` or a numeric offset); a datetime without an
/// offset is treated as UTC, and a date-only string as midnight UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

/// Returns the entries matching the filter, preserving relative order.
#[must_use]
pub fn filter_entries(mut entries: Vec<LogEntry>, filter: &LogFilter) -> Vec<LogEntry> {
    entries.retain(|entry| entry.matches(filter));
    entries
}

/// Sorts entries by timestamp descending (newest first).
///
/// The sort is stable: entries with equal timestamps keep their insertion
/// order. Entries whose timestamp does not parse sort last.
pub fn sort_newest_first(entries: &mut [LogEntry]) {
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.parsed_timestamp()));
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
