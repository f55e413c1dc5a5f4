//! In-memory log sink.

use super::{LogRecord, LogSink};
use crate::error::Result;

/// Collects records in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    records: Vec<LogRecord>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records appended so far, oldest first.
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Records rendered as log lines.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }

    /// All lines joined as file contents would be.
    pub fn contents(&self) -> String {
        self.records.iter().map(|r| format!("{}\n", r)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl LogSink for MemoryLog {
    fn append(&mut self, record: &LogRecord) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_order() {
        let mut log = MemoryLog::new();
        log.append(&LogRecord::info("root", "first")).unwrap();
        log.append(&LogRecord::info("root", "second")).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[1].message, "second");
        assert_eq!(log.contents(), "INFO:root:first\nINFO:root:second\n");
    }
}
