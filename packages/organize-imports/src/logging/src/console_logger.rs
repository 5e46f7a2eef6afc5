// Console Logger
//
// Logger that writes to stderr. stdout belongs to the host formatter.

use super::logger::{LogLevel, Logger};

/// Console logger.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    fn log(&self, level: LogLevel, msg: &str) {
        if self.is_enabled(level) {
            eprintln!("[organize-imports] [{}] {}", level, msg);
        }
    }
}

impl Logger for ConsoleLogger {
    fn level(&self) -> LogLevel {
        self.level
    }

    fn debug(&self, msg: &str) {
        self.log(LogLevel::Debug, msg);
    }

    fn info(&self, msg: &str) {
        self.log(LogLevel::Info, msg);
    }

    fn warn(&self, msg: &str) {
        self.log(LogLevel::Warn, msg);
    }

    fn error(&self, msg: &str) {
        self.log(LogLevel::Error, msg);
    }
}
