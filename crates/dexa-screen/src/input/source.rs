//! Data source abstraction and metadata.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::value::Value;

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file (or the upload name).
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was screened.
    pub screened_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been parsed.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            screened_at: Utc::now(),
        }
    }
}

/// Parsed tabular data with typed cells.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Column headers, in file order.
    pub headers: Vec<String>,
    /// Row data (row-major). Every row has exactly `headers.len()` cells.
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Build a dataset from raw string cells, typing each column.
    ///
    /// Short rows are padded with missing cells; extra cells are dropped.
    pub fn from_raw(headers: Vec<String>, raw_rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        fn cell(row: &[String], col: usize) -> &str {
            row.get(col).map(String::as_str).unwrap_or("")
        }

        let columns: Vec<Vec<Value>> = (0..width)
            .map(|col| Value::type_column(raw_rows.iter().map(move |row| cell(row, col))))
            .collect();

        let mut rows: Vec<Vec<Value>> = (0..raw_rows.len())
            .map(|_| Vec::with_capacity(width))
            .collect();
        for column in columns {
            for (row, value) in rows.iter_mut().zip(column) {
                row.push(value);
            }
        }

        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}
