//! Fuzz target for parsing and screening.
//!
//! Parsing arbitrary bytes and screening the result must never panic,
//! whatever delimiter or column layout the input happens to have.

#![no_main]

use dexa_screen::{MemoryLog, Screener};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let mut log = MemoryLog::new();
    let _ = Screener::new().screen_bytes(data, "fuzz.csv", &mut log);
});
