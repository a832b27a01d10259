//! # Query Audit Log
//!
//! Every screening interaction appends one row to an append-only log. The
//! log is write-only from the application's point of view: nothing reads it
//! back, and a failed append never fails the query that triggered it.

mod csv_log;

use chrono::{DateTime, Local};
use log::warn;
use serde::Serialize;
use std::fmt;
use std::sync::Mutex;

pub use csv_log::{CsvAuditLog, LOG_HEADER, TIMESTAMP_FORMAT};

/// Errors that can occur while appending to the query log
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// I/O error opening, locking or writing the log
    #[error("Failed to write query log: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV write error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Kind of interaction being logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueryAction {
    /// Free-text substance name search
    NameSearch,
    /// RT window + fragment screening
    Screen,
    /// Stand-alone LRI calculation
    Lri,
}

impl QueryAction {
    /// Label written to the log
    pub fn label(&self) -> &'static str {
        match self {
            QueryAction::NameSearch => "NameSearch",
            QueryAction::Screen => "Screen",
            QueryAction::Lri => "LRI",
        }
    }
}

impl fmt::Display for QueryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One log row
#[derive(Debug, Clone, PartialEq)]
pub struct QueryLogEntry {
    /// When the query ran (local time)
    pub timestamp: DateTime<Local>,
    /// What kind of query it was
    pub action: QueryAction,
    /// Free-text description of the parameters and outcome
    pub details: String,
}

impl QueryLogEntry {
    /// Create an entry stamped with the current local time
    pub fn now(action: QueryAction, details: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            action,
            details: details.into(),
        }
    }
}

/// Sink for query log entries
pub trait QueryRecorder {
    /// Append one entry
    fn record(&self, entry: &QueryLogEntry) -> Result<(), AuditError>;
}

/// Recorder that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecorder;

impl QueryRecorder for NullRecorder {
    fn record(&self, _entry: &QueryLogEntry) -> Result<(), AuditError> {
        Ok(())
    }
}

/// Recorder that keeps entries in memory
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    entries: Mutex<Vec<QueryLogEntry>>,
}

impl MemoryRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded entries
    pub fn entries(&self) -> Vec<QueryLogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl QueryRecorder for MemoryRecorder {
    fn record(&self, entry: &QueryLogEntry) -> Result<(), AuditError> {
        match self.entries.lock() {
            Ok(mut entries) => entries.push(entry.clone()),
            Err(poisoned) => poisoned.into_inner().push(entry.clone()),
        }
        Ok(())
    }
}

/// Record an entry, downgrading any failure to a warning.
///
/// Returns the failure message so the caller can surface it without
/// aborting the query.
pub fn record_soft(recorder: &dyn QueryRecorder, entry: &QueryLogEntry) -> Option<String> {
    match recorder.record(entry) {
        Ok(()) => None,
        Err(e) => {
            warn!("Query log append failed ({}): {}", entry.action, e);
            Some(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingRecorder;

    impl QueryRecorder for FailingRecorder {
        fn record(&self, _entry: &QueryLogEntry) -> Result<(), AuditError> {
            Err(AuditError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_memory_recorder() {
        let recorder = MemoryRecorder::new();
        let entry = QueryLogEntry::now(QueryAction::Screen, "RT: 5.00");

        assert!(record_soft(&recorder, &entry).is_none());
        let entries = recorder.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].details, "RT: 5.00");
    }

    #[test]
    fn test_failure_is_soft() {
        let entry = QueryLogEntry::now(QueryAction::NameSearch, "cocaína");
        let message = record_soft(&FailingRecorder, &entry).unwrap();
        assert!(message.contains("read-only"));
    }

    #[test]
    fn test_action_labels() {
        assert_eq!(QueryAction::Lri.to_string(), "LRI");
        assert_eq!(QueryAction::NameSearch.label(), "NameSearch");
    }
}
