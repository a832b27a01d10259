use fs2::FileExt;
use log::debug;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use super::{AuditError, QueryLogEntry, QueryRecorder};

/// Header row written when the log file is created
pub const LOG_HEADER: [&str; 3] = ["DateHour", "Action", "Details"];

/// Timestamp format used in the first column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only CSV query log.
///
/// Each append holds an exclusive advisory lock on the file, so concurrent
/// writers (threads or processes) produce whole rows.
#[derive(Debug, Clone)]
pub struct CsvAuditLog {
    path: PathBuf,
}

impl CsvAuditLog {
    /// Log at `path`; the file is created on first append
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<File, AuditError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?)
    }

    fn append_locked(&self, file: &File, entry: &QueryLogEntry) -> Result<(), AuditError> {
        let needs_header = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if needs_header {
            debug!("Creating query log {}", self.path.display());
            writer.write_record(LOG_HEADER)?;
        }

        let timestamp = entry.timestamp.format(TIMESTAMP_FORMAT).to_string();
        writer.write_record([timestamp.as_str(), entry.action.label(), entry.details.as_str()])?;
        writer.flush()?;
        Ok(())
    }
}

impl QueryRecorder for CsvAuditLog {
    fn record(&self, entry: &QueryLogEntry) -> Result<(), AuditError> {
        let file = self.open()?;
        file.lock_exclusive()?;
        let appended = self.append_locked(&file, entry);
        let unlocked = FileExt::unlock(&file);
        appended?;
        unlocked?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::QueryAction;
    use tempfile::tempdir;

    #[test]
    fn test_header_written_once() -> Result<(), AuditError> {
        let dir = tempdir()?;
        let log = CsvAuditLog::new(dir.path().join("logs").join("query_log.csv"));

        log.record(&QueryLogEntry::now(QueryAction::NameSearch, "cafeína"))?;
        log.record(&QueryLogEntry::now(
            QueryAction::Screen,
            "Method: DB-1ms | RT: 10.00, tolerance 4%",
        ))?;

        let content = fs::read_to_string(log.path())?;
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "DateHour,Action,Details");
        assert!(lines[1].ends_with(",NameSearch,cafeína"));
        assert!(lines[2].contains("\"Method: DB-1ms | RT: 10.00, tolerance 4%\""));
        Ok(())
    }

    #[test]
    fn test_rows_parse_back() -> Result<(), AuditError> {
        let dir = tempdir()?;
        let log = CsvAuditLog::new(dir.path().join("query_log.csv"));
        let entry = QueryLogEntry::now(QueryAction::Lri, "RT: 5.50 | LRI: 1050.0");
        log.record(&entry)?;

        let mut reader = csv::Reader::from_path(log.path())?;
        let headers = reader.headers()?.clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), LOG_HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], entry.timestamp.format(TIMESTAMP_FORMAT).to_string());
        assert_eq!(&rows[0][1], "LRI");
        assert_eq!(&rows[0][2], "RT: 5.50 | LRI: 1050.0");
        Ok(())
    }

    #[test]
    fn test_concurrent_appends_keep_rows_whole() -> Result<(), AuditError> {
        const THREADS: usize = 8;
        const PER_THREAD: usize = 25;

        let dir = tempdir()?;
        let log = CsvAuditLog::new(dir.path().join("query_log.csv"));

        std::thread::scope(|scope| {
            for t in 0..THREADS {
                let log = log.clone();
                scope.spawn(move || {
                    for i in 0..PER_THREAD {
                        let details = format!("thread {}, query {} | \"Cocaína\"\nline two", t, i);
                        log.record(&QueryLogEntry::now(QueryAction::Screen, details))
                            .unwrap();
                    }
                });
            }
        });

        let mut reader = csv::Reader::from_path(log.path())?;
        assert_eq!(reader.headers()?.iter().collect::<Vec<_>>(), LOG_HEADER.to_vec());

        let rows: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
        assert_eq!(rows.len(), THREADS * PER_THREAD);
        for row in &rows {
            assert_eq!(row.len(), 3);
            assert_eq!(&row[1], "Screen");
            assert!(row[2].ends_with("| \"Cocaína\"\nline two"));
        }

        let mut seen: Vec<&str> = rows.iter().map(|r| r.get(2).unwrap_or("")).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), THREADS * PER_THREAD);
        Ok(())
    }

    #[test]
    fn test_unwritable_path_errors() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();

        let log = CsvAuditLog::new(blocker.join("query_log.csv"));
        let result = log.record(&QueryLogEntry::now(QueryAction::Screen, "x"));
        assert!(result.is_err());
    }
}
