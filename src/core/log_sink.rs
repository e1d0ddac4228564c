//! Log sinks for repo-routed diagnostics.
//!
//! Every component reports through its repo (`submit_log`, `submit_warning`,
//! `submit_error`, `submit_fatal`). The repo forwards to a `LogSink`, which is
//! `FacadeSink` (the `log` crate) unless replaced. Tests swap in a
//! `MemorySink` to silence output and assert on what was reported.

use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a repo-routed message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Log,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Log => "log",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Fatal => "fatal",
        };
        f.write_str(name)
    }
}

/// Destination for repo-routed messages.
pub trait LogSink: Send + Sync {
    fn submit(&self, level: LogLevel, sender: &str, message: &str);
}

/// Forwards to the `log` facade. Fatal is logged at error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct FacadeSink;

impl LogSink for FacadeSink {
    fn submit(&self, level: LogLevel, sender: &str, message: &str) {
        match level {
            LogLevel::Log => log::info!("[{}]: {}", sender, message),
            LogLevel::Warning => log::warn!("[{}]: {}", sender, message),
            LogLevel::Error => log::error!("[{}]: {}", sender, message),
            LogLevel::Fatal => log::error!("FATAL ERROR - [{}]: {}", sender, message),
        }
    }
}

/// One captured message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogRecord {
    pub level: LogLevel,
    pub sender: String,
    pub message: String,
}

/// Captures messages in memory instead of printing them.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<LogRecord>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Records at `level` only.
    pub fn at(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == level)
            .collect()
    }

    /// True if any record at `level` contains `needle`.
    pub fn contains(&self, level: LogLevel, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .any(|r| r.level == level && r.message.contains(needle))
    }

    pub fn clear(&self) {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl LogSink for MemorySink {
    fn submit(&self, level: LogLevel, sender: &str, message: &str) {
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(LogRecord {
                level,
                sender: sender.to_string(),
                message: message.to_string(),
            });
    }
}
