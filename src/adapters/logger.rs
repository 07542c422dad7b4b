//! Console logger backend.
//!
//! Every line goes to stdout with the `[FanControl]` prefix.  INFO lines
//! carry no severity marker; everything else names its level:
//!
//! ```text
//! [FanControl]: Successfully ran self test on init
//! [FanControl] WARN: Threshold of 45°C reached (46.2°C) - turning on fan
//! ```
//!
//! The default level is INFO; `RUST_LOG` overrides it.

use std::io::Write;

use log::{Level, LevelFilter, SetLoggerError};

pub const PREFIX: &str = "[FanControl]";

/// Render one log line without the trailing newline.
pub fn render(level: Level, message: &str) -> String {
    match level {
        Level::Info => format!("{PREFIX}: {message}"),
        other => format!("{PREFIX} {other}: {message}"),
    }
}

/// Install the stdout logger.  Fails if a logger is already installed.
pub fn init() -> Result<(), SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Stdout)
        .format(|buf, record| {
            writeln!(buf, "{}", render(record.level(), &record.args().to_string()))
        })
        .try_init()
}
