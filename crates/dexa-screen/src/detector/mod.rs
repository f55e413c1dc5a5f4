//! Duplicate-record discrepancy detection.
//!
//! Rows that share every metadata value form a duplicate group. Groups of
//! exactly two rows are compared parameter by parameter; larger groups and
//! singletons are skipped without comparison. Each disagreeing parameter is
//! reported once per (subject, visit, parameter), first occurrence winning.

mod config;
mod discrepancy;

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScreenError};
use crate::input::{Dataset, Value};
use crate::sink::LogSink;

pub use config::{DetectorConfig, MetadataColumns};
pub use discrepancy::{Discrepancy, composite_date};

/// Outcome of a detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Parameter columns compared, in dataset order.
    pub parameters: Vec<String>,
    /// Detected discrepancies, grouped by (subject, visit).
    pub discrepancies: Vec<Discrepancy>,
    /// Metadata tuples shared by two or more rows.
    pub duplicate_groups: usize,
    /// Duplicate groups of exactly two rows.
    pub groups_compared: usize,
    /// Duplicate groups skipped because they had more than two rows.
    pub groups_skipped: usize,
    /// Rows left out of grouping because a metadata cell was missing.
    pub rows_missing_metadata: usize,
}

/// Column positions resolved against a dataset.
struct Layout<'a> {
    /// Subject, visit, then the three date parts.
    metadata: [usize; 5],
    parameters: Vec<(usize, &'a str)>,
}

/// Finds parameters on which duplicate records disagree.
pub struct DiscrepancyDetector {
    config: DetectorConfig,
}

impl DiscrepancyDetector {
    /// Create a detector for the standard DEXA export layout.
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Parameter columns of `dataset`, in column order.
    pub fn parameter_columns<'a>(&self, dataset: &'a Dataset) -> Vec<&'a str> {
        dataset
            .headers
            .iter()
            .map(String::as_str)
            .filter(|h| self.is_parameter(h))
            .collect()
    }

    fn is_parameter(&self, column: &str) -> bool {
        column.starts_with(&self.config.parameter_prefix) && !self.config.metadata.contains(column)
    }

    fn layout<'a>(&self, dataset: &'a Dataset) -> Result<Layout<'a>> {
        let mut metadata = [0; 5];
        for (slot, name) in metadata.iter_mut().zip(self.config.metadata.names()) {
            *slot = dataset
                .column_index(name)
                .ok_or_else(|| ScreenError::MissingColumn {
                    column: name.to_string(),
                })?;
        }

        let parameters = dataset
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| self.is_parameter(h))
            .map(|(i, h)| (i, h.as_str()))
            .collect();

        Ok(Layout {
            metadata,
            parameters,
        })
    }

    /// Detect discrepancies without writing anything.
    pub fn detect(&self, dataset: &Dataset) -> Result<Detection> {
        let layout = self.layout(dataset)?;

        // Metadata tuple -> row indices, in order of first appearance.
        let mut groups: IndexMap<[&Value; 5], Vec<usize>> = IndexMap::new();
        let mut rows_missing_metadata = 0;

        for (idx, row) in dataset.rows.iter().enumerate() {
            let key: [&Value; 5] = layout.metadata.map(move |col| &row[col]);
            if key.iter().any(|v| v.is_missing()) {
                rows_missing_metadata += 1;
                continue;
            }
            groups.entry(key).or_default().push(idx);
        }

        let mut seen: HashSet<(&Value, &Value, &str)> = HashSet::new();
        let mut by_visit: IndexMap<(&Value, &Value), Vec<Discrepancy>> = IndexMap::new();
        let mut duplicate_groups = 0;
        let mut groups_compared = 0;
        let mut groups_skipped = 0;

        for (key, rows) in &groups {
            if rows.len() < 2 {
                continue;
            }
            duplicate_groups += 1;

            let &[first, second] = rows.as_slice() else {
                debug!(
                    "Skipping duplicate group of {} rows for subject '{}', visit '{}'",
                    rows.len(),
                    key[0],
                    key[1]
                );
                groups_skipped += 1;
                continue;
            };
            groups_compared += 1;

            let row1 = &dataset.rows[first];
            let row2 = &dataset.rows[second];
            let (subject, visit) = (key[0], key[1]);

            for &(col, name) in &layout.parameters {
                if row1[col] == row2[col] || !seen.insert((subject, visit, name)) {
                    continue;
                }
                by_visit
                    .entry((subject, visit))
                    .or_default()
                    .push(Discrepancy {
                        subject_id: subject.clone(),
                        visit: visit.clone(),
                        date: composite_date([key[2], key[3], key[4]]),
                        parameter: name.to_string(),
                        record_1: row1[col].clone(),
                        record_2: row2[col].clone(),
                        rows: [first, second],
                    });
            }
        }

        let discrepancies: Vec<Discrepancy> = by_visit.into_values().flatten().collect();

        debug!(
            "Compared {} duplicate pairs, {} discrepancies",
            groups_compared,
            discrepancies.len()
        );

        Ok(Detection {
            parameters: layout.parameters.iter().map(|(_, n)| n.to_string()).collect(),
            discrepancies,
            duplicate_groups,
            groups_compared,
            groups_skipped,
            rows_missing_metadata,
        })
    }

    /// Detect discrepancies and append one informational line per record.
    ///
    /// Nothing is written unless detection succeeds as a whole.
    pub fn run(&self, dataset: &Dataset, sink: &mut dyn LogSink) -> Result<Detection> {
        let detection = self.detect(dataset)?;
        for discrepancy in &detection.discrepancies {
            sink.append(&discrepancy.to_record(&self.config.logger_name))?;
        }
        Ok(detection)
    }
}

impl Default for DiscrepancyDetector {
    fn default() -> Self {
        Self::new()
    }
}
