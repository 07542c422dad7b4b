//! Fuzz target: `parse_vcgencmd`
//!
//! Feeds arbitrary text as if it were the sensor command's output and
//! asserts the parser never panics and never yields a non-finite reading.
//!
//! cargo fuzz run fuzz_temp_parser

#![no_main]

use fancontrol::error::SensorError;
use fancontrol::sensors::vcgencmd::parse_vcgencmd;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    match parse_vcgencmd(text) {
        Ok(celsius) => assert!(celsius.is_finite(), "parser yielded {celsius}"),
        Err(SensorError::Malformed) => {
            let after_eq = text.split_once('=').map(|(_, rest)| rest);
            assert!(after_eq.is_none_or(|rest| !rest.contains('\'')));
        }
        Err(_) => {}
    }
});
