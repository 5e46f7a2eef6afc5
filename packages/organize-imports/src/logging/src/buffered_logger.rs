// Buffered Logger
//
// Keeps log records in memory so callers (and tests) can inspect them.

use std::sync::Mutex;

use super::logger::{LogLevel, Logger};

#[derive(Debug)]
pub struct BufferedLogger {
    level: LogLevel,
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl BufferedLogger {
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            records: Mutex::new(Vec::new()),
        }
    }

    /// Messages logged at exactly `level`.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        match self.records.lock() {
            Ok(records) => records
                .iter()
                .filter(|(l, _)| *l == level)
                .map(|(_, msg)| msg.clone())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn push(&self, level: LogLevel, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }
        if let Ok(mut records) = self.records.lock() {
            records.push((level, msg.to_string()));
        }
    }
}

impl Logger for BufferedLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.push(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.push(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.push(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.push(LogLevel::Error, msg);
    }
}
