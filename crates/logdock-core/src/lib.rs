//! # logdock-core
//!
//! Domain logic for the Logdock log ingestion service.
//!
//! This crate provides:
//!
//! - [`LogEntry`] — Structured log entries with metadata
//! - [`LogLevel`] — Severity levels (error, warn, info, debug)
//! - [`LogFilter`] — Query criteria for searching logs
//! - [`validate_entry`] — Schema validation for inbound records
//! - [`JsonLogStore`] — Whole-document JSON file persistence
//!
//! ## Example
//!
//! ```rust
//! use logdock_core::{LogEntry, LogFilter, LogLevel};
//! use std::collections::HashMap;
//!
//! let entry = LogEntry {
//!     level: LogLevel::Error,
//!     message: "Database connection timed out".to_string(),
//!     resource_id: "server-1".to_string(),
//!     timestamp: "2024-06-01T12:00:00Z".to_string(),
//!     trace_id: "abc-123".to_string(),
//!     span_id: "span-456".to_string(),
//!     commit: "5e5342f".to_string(),
//!     metadata: HashMap::new(),
//! };
//!
//! let filter = LogFilter::new()
//!     .with_level(LogLevel::Error)
//!     .with_message("timed out");
//!
//! assert!(entry.matches(&filter));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;
pub mod validate;

// Re-export main types
pub use error::{LogError, Result};
pub use store::JsonLogStore;
pub use types::{filter_entries, parse_timestamp, sort_newest_first, LogEntry, LogFilter, LogLevel};
pub use validate::{validate_entry, ValidationError, ValidationErrorKind};
