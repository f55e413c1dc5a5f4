//! Application state for the web server.

use std::sync::Arc;
use tokio::sync::Mutex;

use dexa_screen::{RotatingFileLog, Screener};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Screener applied to every upload.
    pub screener: Arc<Screener>,
    /// The screening log. Uploads append to it one at a time.
    pub log: Arc<Mutex<RotatingFileLog>>,
}

impl AppState {
    /// Create new application state.
    pub fn new(screener: Screener, log: RotatingFileLog) -> Self {
        Self {
            screener: Arc::new(screener),
            log: Arc::new(Mutex::new(log)),
        }
    }
}
