//! API request handlers.

mod log;
mod screen;

pub use log::*;
pub use screen::*;
