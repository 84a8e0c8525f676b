//! RecordingActivityLog - ログをメモリに溜める（テスト・検証用）

use std::error::Error;
use std::sync::{Mutex, PoisonError};

use crate::ports::ActivityLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    pub source: String,
    pub message: String,
    /// error レベルのときだけ Some
    pub container: Option<String>,
    /// error レベルのときだけ Some（Display 済みの文字列）
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct RecordingActivityLog {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録順のスナップショット
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn errors(&self) -> Vec<LogEntry> {
        self.by_level(LogLevel::Error)
    }

    pub fn infos(&self) -> Vec<LogEntry> {
        self.by_level(LogLevel::Info)
    }

    fn by_level(&self, level: LogLevel) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|e| e.level == level)
            .collect()
    }

    fn push(&self, entry: LogEntry) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }
}

impl ActivityLog for RecordingActivityLog {
    fn info(&self, source: &str, message: &str) {
        self.push(LogEntry {
            level: LogLevel::Info,
            source: source.to_string(),
            message: message.to_string(),
            container: None,
            error: None,
        });
    }

    fn error(&self, source: &str, container: &str, message: &str, err: &(dyn Error + 'static)) {
        self.push(LogEntry {
            level: LogLevel::Error,
            source: source.to_string(),
            message: message.to_string(),
            container: Some(container.to_string()),
            error: Some(err.to_string()),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CleanerError;

    #[test]
    fn records_entries_in_order() {
        let log = RecordingActivityLog::new();
        log.info("agent", "started");
        log.error("agent", "ContainerB", "boom", &CleanerError::failed("timeout"));
        log.info("agent", "done");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "started");
        assert_eq!(entries[1].level, LogLevel::Error);
        assert_eq!(entries[1].container.as_deref(), Some("ContainerB"));
        assert_eq!(entries[1].error.as_deref(), Some("timeout"));
        assert_eq!(entries[0].container, None);
        assert_eq!(entries[2].message, "done");

        assert_eq!(log.infos().len(), 2);
        assert_eq!(log.errors().len(), 1);
    }
}
