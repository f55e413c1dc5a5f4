//! CLI command implementations.

pub mod check;
pub mod log;
pub mod serve;

use std::path::PathBuf;

use dexa_screen::{DetectorConfig, ScreenError};

/// Load detector configuration from `path`, or use the defaults.
pub fn detector_config(path: Option<&PathBuf>) -> Result<DetectorConfig, ScreenError> {
    match path {
        Some(path) => DetectorConfig::load(path),
        None => Ok(DetectorConfig::default()),
    }
}
