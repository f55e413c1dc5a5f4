//! Size-rotated log file.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LogRecord, LogSink};
use crate::error::{Result, ScreenError};

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "concise_data_screening_log.txt";

/// Configuration for a rotating log file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Path of the active log file.
    pub path: PathBuf,
    /// Size at which the file is rolled over (0 = never).
    pub max_bytes: u64,
    /// Number of backup generations kept (0 = never roll over).
    pub backup_count: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
            max_bytes: 10_000,
            backup_count: 2,
        }
    }
}

/// Append-only text log, rotated by size.
///
/// The file is opened on the first append. Before a line is written, if the
/// file already holds data and the line would take it to `max_bytes` or
/// beyond, `log.1` moves to `log.2` (and so on up to `backup_count`), the
/// active file becomes `log.1`, and a fresh file is started.
#[derive(Debug)]
pub struct RotatingFileLog {
    config: LogConfig,
    file: Option<File>,
}

impl RotatingFileLog {
    /// Log to `path` with the default size limits.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_config(LogConfig {
            path: path.into(),
            ..LogConfig::default()
        })
    }

    pub fn with_config(config: LogConfig) -> Self {
        Self { config, file: None }
    }

    /// Path of the active log file.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    /// Path of backup generation `n` (`log.1`, `log.2`, ...).
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = OsString::from(self.config.path.as_os_str());
        name.push(format!(".{}", n));
        PathBuf::from(name)
    }

    /// Current contents of the active log file; empty if it does not exist.
    pub fn contents(&self) -> Result<String> {
        match fs::read_to_string(&self.config.path) {
            Ok(s) => Ok(s),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => Err(self.log_err(e)),
        }
    }

    fn log_err(&self, source: io::Error) -> ScreenError {
        ScreenError::Log {
            path: self.config.path.clone(),
            source,
        }
    }

    fn open(&self) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.config.path)
    }

    fn should_roll_over(&self, file: &File, line_len: u64) -> io::Result<bool> {
        if self.config.max_bytes == 0 || self.config.backup_count == 0 {
            return Ok(false);
        }
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Ok(false);
        }
        let size = metadata.len();
        Ok(size > 0 && size + line_len >= self.config.max_bytes)
    }

    fn roll_over(&mut self) -> io::Result<()> {
        self.file = None;

        for n in (1..self.config.backup_count).rev() {
            let src = self.backup_path(n);
            if src.exists() {
                let dst = self.backup_path(n + 1);
                if dst.exists() {
                    fs::remove_file(&dst)?;
                }
                fs::rename(&src, &dst)?;
            }
        }

        let first = self.backup_path(1);
        if first.exists() {
            fs::remove_file(&first)?;
        }
        if self.config.path.exists() {
            fs::rename(&self.config.path, &first)?;
        }

        debug!("Rotated log file {}", self.config.path.display());
        Ok(())
    }

    fn write_line(&mut self, line: &str) -> io::Result<()> {
        if self.file.is_none() {
            self.file = Some(self.open()?);
        }

        let roll = match &self.file {
            Some(file) => self.should_roll_over(file, line.len() as u64)?,
            None => false,
        };
        if roll {
            self.roll_over()?;
            self.file = Some(self.open()?);
        }

        match self.file.as_mut() {
            Some(file) => {
                file.write_all(line.as_bytes())?;
                file.flush()
            }
            None => Ok(()),
        }
    }
}

impl LogSink for RotatingFileLog {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        let line = format!("{}\n", record);
        self.write_line(&line).map_err(|e| self.log_err(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn log_in(dir: &TempDir, max_bytes: u64, backup_count: usize) -> RotatingFileLog {
        RotatingFileLog::with_config(LogConfig {
            path: dir.path().join("screen.log"),
            max_bytes,
            backup_count,
        })
    }

    #[test]
    fn test_lazy_open() {
        let dir = TempDir::new().unwrap();
        let log = log_in(&dir, 100, 2);

        assert!(!log.path().exists());
        assert_eq!(log.contents().unwrap(), "");
    }

    #[test]
    fn test_appends_lines() {
        let dir = TempDir::new().unwrap();
        let mut log = log_in(&dir, 10_000, 2);

        log.append(&LogRecord::info("root", "one")).unwrap();
        log.append(&LogRecord::info("root", "two")).unwrap();

        assert_eq!(log.contents().unwrap(), "INFO:root:one\nINFO:root:two\n");
    }

    #[test]
    fn test_appends_across_instances() {
        let dir = TempDir::new().unwrap();
        log_in(&dir, 10_000, 2)
            .append(&LogRecord::info("root", "one"))
            .unwrap();
        log_in(&dir, 10_000, 2)
            .append(&LogRecord::info("root", "two"))
            .unwrap();

        let log = log_in(&dir, 10_000, 2);
        assert_eq!(log.contents().unwrap().lines().count(), 2);
    }

    #[test]
    fn test_rotation_keeps_backup_count() {
        let dir = TempDir::new().unwrap();
        // Each line is "INFO:root:N\n" = 12 bytes; two fit below 30.
        let mut log = log_in(&dir, 30, 2);

        for n in 0..8 {
            log.append(&LogRecord::info("root", n.to_string())).unwrap();
        }

        assert_eq!(log.contents().unwrap(), "INFO:root:6\nINFO:root:7\n");
        let first = fs::read_to_string(log.backup_path(1)).unwrap();
        assert_eq!(first, "INFO:root:4\nINFO:root:5\n");
        let second = fs::read_to_string(log.backup_path(2)).unwrap();
        assert_eq!(second, "INFO:root:2\nINFO:root:3\n");
        assert!(!log.backup_path(3).exists());
    }

    #[test]
    fn test_oversized_line_written_to_empty_file() {
        let dir = TempDir::new().unwrap();
        let mut log = log_in(&dir, 5, 2);

        log.append(&LogRecord::info("root", "a long message")).unwrap();

        assert_eq!(log.contents().unwrap(), "INFO:root:a long message\n");
        assert!(!log.backup_path(1).exists());
    }

    #[test]
    fn test_no_rotation_without_backups() {
        let dir = TempDir::new().unwrap();
        let mut log = log_in(&dir, 20, 0);

        for n in 0..5 {
            log.append(&LogRecord::info("root", n.to_string())).unwrap();
        }

        assert_eq!(log.contents().unwrap().lines().count(), 5);
        assert!(!log.backup_path(1).exists());
    }

    #[test]
    fn test_backup_path() {
        let log = RotatingFileLog::new("screen.log");
        assert_eq!(log.backup_path(2), PathBuf::from("screen.log.2"));
    }
}
