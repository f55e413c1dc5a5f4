//! Web front end: upload, screening, and log download.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
