//! Main Screener struct and public API.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::detector::{Detection, DetectorConfig, Discrepancy, DiscrepancyDetector};
use crate::error::Result;
use crate::input::{Dataset, Parser, ParserConfig, SourceMetadata};
use crate::sink::LogSink;

/// Configuration for a screening run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Detector configuration.
    pub detector: DetectorConfig,
}

/// Result of screening a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Parameter columns that were compared.
    pub parameters: Vec<String>,
    /// Summary counts.
    pub summary: ScreenSummary,
    /// Detected discrepancies, in log order.
    pub discrepancies: Vec<Discrepancy>,
}

/// Summary of a screening run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSummary {
    /// Data rows read.
    pub total_rows: usize,
    /// Metadata tuples shared by two or more rows.
    pub duplicate_groups: usize,
    /// Duplicate pairs compared.
    pub groups_compared: usize,
    /// Duplicate groups skipped because they had more than two rows.
    pub groups_skipped: usize,
    /// Rows left out because a metadata cell was missing.
    pub rows_missing_metadata: usize,
    /// Discrepancies reported.
    pub discrepancies: usize,
}

impl ScreenReport {
    fn from_detection(source: SourceMetadata, detection: Detection) -> Self {
        let summary = ScreenSummary {
            total_rows: source.row_count,
            duplicate_groups: detection.duplicate_groups,
            groups_compared: detection.groups_compared,
            groups_skipped: detection.groups_skipped,
            rows_missing_metadata: detection.rows_missing_metadata,
            discrepancies: detection.discrepancies.len(),
        };

        Self {
            source,
            parameters: detection.parameters,
            summary,
            discrepancies: detection.discrepancies,
        }
    }

    /// True when no duplicate pair disagreed.
    pub fn is_clean(&self) -> bool {
        self.discrepancies.is_empty()
    }
}

/// Parses a dataset and screens it for duplicate-record discrepancies.
pub struct Screener {
    parser: Parser,
    detector: DiscrepancyDetector,
}

impl Screener {
    /// Create a Screener with default configuration.
    pub fn new() -> Self {
        Self::with_config(ScreenerConfig::default())
    }

    /// Create a Screener with custom configuration.
    pub fn with_config(config: ScreenerConfig) -> Self {
        Self {
            parser: Parser::with_config(config.parser),
            detector: DiscrepancyDetector::with_config(config.detector),
        }
    }

    /// Screen a file, appending one line per discrepancy to `sink`.
    pub fn screen(&self, path: impl AsRef<Path>, sink: &mut dyn LogSink) -> Result<ScreenReport> {
        let path = path.as_ref();
        debug!("Screening {}", path.display());

        let (dataset, source) = self.parser.parse_file(path)?;
        self.screen_dataset(&dataset, source, sink)
    }

    /// Screen in-memory contents, e.g. an uploaded file.
    pub fn screen_bytes(
        &self,
        contents: &[u8],
        name: impl Into<PathBuf>,
        sink: &mut dyn LogSink,
    ) -> Result<ScreenReport> {
        let (dataset, source) = self.parser.parse_bytes(contents, name)?;
        self.screen_dataset(&dataset, source, sink)
    }

    /// Screen an already parsed dataset.
    pub fn screen_dataset(
        &self,
        dataset: &Dataset,
        source: SourceMetadata,
        sink: &mut dyn LogSink,
    ) -> Result<ScreenReport> {
        let detection = self.detector.run(dataset, sink)?;
        Ok(ScreenReport::from_detection(source, detection))
    }
}

impl Default for Screener {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemoryLog;

    #[test]
    fn test_screen_bytes_summary() {
        let csv = "DXA_subjID,DXA_subVisit,DXA_date#1_1,DXA_date#2_1,DXA_date#3_1,DXA_BMD\n\
                   S01,V1,Jan,5,2020,1.2\n\
                   S01,V1,Jan,5,2020,1.3\n\
                   S02,V1,Jan,6,2020,1.0\n";
        let mut log = MemoryLog::new();

        let report = Screener::new()
            .screen_bytes(csv.as_bytes(), "upload.csv", &mut log)
            .unwrap();

        assert_eq!(report.summary.total_rows, 3);
        assert_eq!(report.summary.duplicate_groups, 1);
        assert_eq!(report.summary.discrepancies, 1);
        assert_eq!(report.parameters, vec!["DXA_BMD"]);
        assert!(!report.is_clean());
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_report_serializes() {
        let csv = "DXA_subjID,DXA_subVisit,DXA_date#1_1,DXA_date#2_1,DXA_date#3_1,DXA_BMD\n\
                   S01,V1,Jan,5,2020,1.2\n\
                   S01,V1,Jan,5,2020,abc\n";
        let mut log = MemoryLog::new();
        let report = Screener::new()
            .screen_bytes(csv.as_bytes(), "upload.csv", &mut log)
            .unwrap();

        let json = serde_json::to_value(&report).unwrap();
        let first = &json["discrepancies"][0];
        assert_eq!(first["parameter"], "DXA_BMD");
        assert_eq!(first["record_1"], "1.2");
        assert_eq!(first["record_2"], "abc");
    }
}
