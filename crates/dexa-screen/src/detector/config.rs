//! Detector configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScreenError};

/// Names of the columns that identify a logical record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataColumns {
    pub subject: String,
    pub visit: String,
    /// Three date-part columns, joined as `"{0} {1}, {2}"`.
    pub date_parts: [String; 3],
}

impl MetadataColumns {
    /// All metadata columns in grouping order.
    pub fn names(&self) -> [&str; 5] {
        [
            &self.subject,
            &self.visit,
            &self.date_parts[0],
            &self.date_parts[1],
            &self.date_parts[2],
        ]
    }

    pub fn contains(&self, column: &str) -> bool {
        self.names().contains(&column)
    }
}

impl Default for MetadataColumns {
    fn default() -> Self {
        Self {
            subject: "DXA_subjID".to_string(),
            visit: "DXA_subVisit".to_string(),
            date_parts: [
                "DXA_date#1_1".to_string(),
                "DXA_date#2_1".to_string(),
                "DXA_date#3_1".to_string(),
            ],
        }
    }
}

/// Configuration for discrepancy detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Columns starting with this prefix are parameters.
    pub parameter_prefix: String,
    /// Columns identifying a record.
    pub metadata: MetadataColumns,
    /// Logger name written into each log line.
    pub logger_name: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            parameter_prefix: "DXA_".to_string(),
            metadata: MetadataColumns::default(),
            logger_name: "root".to_string(),
        }
    }
}

impl DetectorConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ScreenError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot identify records.
    pub fn validate(&self) -> Result<()> {
        let names = self.metadata.names();
        if names.iter().any(|n| n.is_empty()) {
            return Err(ScreenError::Config(
                "metadata column names must not be empty".to_string(),
            ));
        }
        for (i, name) in names.iter().enumerate() {
            if names[..i].contains(name) {
                return Err(ScreenError::Config(format!(
                    "metadata column '{}' listed twice",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.parameter_prefix, "DXA_");
        assert!(config.metadata.contains("DXA_date#2_1"));
        assert!(!config.metadata.contains("DXA_BMD"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config: DetectorConfig = serde_json::from_str(r#"{"parameter_prefix": "SCAN_"}"#).unwrap();
        assert_eq!(config.parameter_prefix, "SCAN_");
        assert_eq!(config.metadata, MetadataColumns::default());
    }

    #[test]
    fn test_duplicate_metadata_rejected() {
        let mut config = DetectorConfig::default();
        config.metadata.visit = config.metadata.subject.clone();
        assert!(matches!(config.validate(), Err(ScreenError::Config(_))));
    }
}
