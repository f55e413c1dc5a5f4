//! CSV/TSV parser with delimiter detection.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::source::{Dataset, SourceMetadata};
use crate::error::{Result, ScreenError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

/// Parses tabular data files.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let io_err = |source| ScreenError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_err)?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_err)?;

        self.parse_bytes(&contents, path)
    }

    /// Parse in-memory contents, e.g. an uploaded file.
    ///
    /// `name` is recorded in the source metadata only.
    pub fn parse_bytes(
        &self,
        contents: &[u8],
        name: impl Into<PathBuf>,
    ) -> Result<(Dataset, SourceMetadata)> {
        let mut hasher = Sha256::new();
        hasher.update(contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(contents)?,
        };

        let dataset = self.parse_delimited(contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let metadata = SourceMetadata::new(
            name.into(),
            hash,
            contents.len() as u64,
            format,
            dataset.row_count(),
            dataset.column_count(),
        );

        Ok((dataset, metadata))
    }

    /// Parse delimited bytes with a known delimiter.
    fn parse_delimited(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(|s| s.to_string()).collect();

        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err(ScreenError::EmptyData("No header row found".to_string()));
        }

        let expected_cols = headers.len();
        let mut rows = Vec::new();

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;

            if record.len() > expected_cols {
                return Err(ScreenError::Parse {
                    row: row_idx + 1,
                    message: format!(
                        "expected {} fields, found {}",
                        expected_cols,
                        record.len()
                    ),
                });
            }

            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        Ok(Dataset::from_raw(headers, rows))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .map_while(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ScreenError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab breaks ties.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_detect_delimiter_empty() {
        assert!(matches!(
            detect_delimiter(b"\n\n"),
            Err(ScreenError::EmptyData(_))
        ));
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"DXA_subjID,DXA_BMD\nS01,1.2\nS02,1.3";
        let (dataset, metadata) = parser.parse_bytes(data, "upload.csv").unwrap();

        assert_eq!(dataset.headers, vec!["DXA_subjID", "DXA_BMD"]);
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.rows[1][1], Value::Number(1.3));
        assert_eq!(metadata.file, "upload.csv");
        assert_eq!(metadata.format, "csv");
        assert!(metadata.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_header_only_is_empty_dataset() {
        let parser = Parser::new();
        let (dataset, _) = parser.parse_bytes(b"a,b,c\n", "empty.csv").unwrap();

        assert_eq!(dataset.column_count(), 3);
        assert_eq!(dataset.row_count(), 0);
    }

    #[test]
    fn test_long_row_is_parse_error() {
        let parser = Parser::new();
        let result = parser.parse_bytes(b"a,b\n1,2\n3,4,5\n", "bad.csv");

        match result {
            Err(ScreenError::Parse { row, .. }) => assert_eq!(row, 2),
            other => panic!("expected parse error, got {:?}", other.map(|(d, _)| d.rows)),
        }
    }

    #[test]
    fn test_explicit_delimiter() {
        let parser = Parser::with_config(ParserConfig {
            delimiter: Some(b';'),
            ..ParserConfig::default()
        });
        let (dataset, metadata) = parser.parse_bytes(b"a;b\n1;2\n", "semi.csv").unwrap();

        assert_eq!(dataset.column_count(), 2);
        assert_eq!(metadata.format, "csv-semicolon");
    }
}
