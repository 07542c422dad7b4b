//! Fuzz target: `parse_override_flag`
//!
//! Arbitrary override file content must never panic, and anything whose
//! first line is not an integer must be rejected rather than read as "on".
//!
//! cargo fuzz run fuzz_override_flag

#![no_main]

use fancontrol::adapters::override_file::parse_override_flag;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    if let Ok(true) = parse_override_flag(&text) {
        let first = text.lines().next().unwrap_or_default().trim();
        assert!(first.parse::<i64>().is_ok_and(|v| v != 0));
    }
});
