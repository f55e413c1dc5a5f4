//! dexa-screen: consistency screening for DEXA scan exports.
//!
//! Scan exports sometimes carry the same visit twice. When both copies of a
//! record survive, their measured parameters should agree. This crate finds
//! the pairs that do not and reports every disagreeing parameter.
//!
//! # Core Principles
//!
//! - **Detect only**: the dataset is never modified or merged
//! - **Explicit sinks**: discrepancy lines go to a caller-supplied [`LogSink`]
//! - **Typed values**: cells are [`Value`]s with defined equality rules
//!
//! # Example
//!
//! ```no_run
//! use dexa_screen::{RotatingFileLog, Screener};
//!
//! let screener = Screener::new();
//! let mut log = RotatingFileLog::new("concise_data_screening_log.txt");
//! let report = screener.screen("dexa_export.csv", &mut log).unwrap();
//!
//! println!("Discrepancies: {}", report.discrepancies.len());
//! ```

pub mod detector;
pub mod error;
pub mod input;
pub mod sink;

mod screener;

pub use crate::screener::{ScreenReport, ScreenSummary, Screener, ScreenerConfig};
pub use detector::{DetectorConfig, Discrepancy, DiscrepancyDetector, Detection, MetadataColumns};
pub use error::{Result, ScreenError};
pub use input::{Dataset, Parser, ParserConfig, SourceMetadata, Value};
pub use sink::{DEFAULT_LOG_FILE, Level, LogConfig, LogRecord, LogSink, MemoryLog, RotatingFileLog};
