//! Log sinks for discrepancy lines.
//!
//! The detector never touches global logging state. Callers hand it a
//! [`LogSink`] and decide where the lines end up: a size-rotated file for the
//! command line and web front end, or memory for tests and in-process
//! rendering.

mod memory;
mod rotating;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use memory::MemoryLog;
pub use rotating::{DEFAULT_LOG_FILE, LogConfig, RotatingFileLog};

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Level {
    /// Upper-case name used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One line destined for a log sink.
///
/// Displays as `LEVEL:LOGGER_NAME:message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub level: Level,
    pub logger: String,
    pub message: String,
}

impl LogRecord {
    /// Create a record at the given level.
    pub fn new(level: Level, logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            logger: logger.into(),
            message: message.into(),
        }
    }

    /// Create an informational record.
    pub fn info(logger: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Level::Info, logger, message)
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.level, self.logger, self.message)
    }
}

/// Destination for log records.
///
/// Implementations append; they never rewrite earlier records. No locking is
/// implied, so concurrent writers must coordinate themselves.
pub trait LogSink {
    /// Append a single record.
    fn append(&mut self, record: &LogRecord) -> Result<()>;
}

impl<S: LogSink + ?Sized> LogSink for &mut S {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        (**self).append(record)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        (**self).append(record)
    }
}
