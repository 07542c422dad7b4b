//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured fan events through the
//! `log` facade (stdout via [`super::logger`] in production).

use log::{debug, error, info, warn};

use crate::app::events::FanEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`FanEvent`] to the console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &FanEvent) {
        match event {
            FanEvent::SelfTestPassed => info!("Successfully ran self test on init"),
            FanEvent::SelfTestFailed(e) => error!("while self-test: {}", e),
            FanEvent::Stabilizing {
                temp_c,
                elapsed,
                required,
            } => {
                info!(
                    "{:.1}\u{00b0}C above threshold, stabilizing ({}s/{}s)",
                    temp_c,
                    elapsed.as_secs(),
                    required.as_secs()
                );
            }
            FanEvent::Activated {
                temp_c,
                threshold_c,
            } => {
                warn!(
                    "Threshold of {}\u{00b0}C reached ({:.1}\u{00b0}C) - turning on fan",
                    threshold_c, temp_c
                );
            }
            FanEvent::HoldingForCooling { temp_c, remaining } => {
                debug!(
                    "{:.1}\u{00b0}C below stop threshold, keeping fan on for {}s",
                    temp_c,
                    remaining.as_secs()
                );
            }
            FanEvent::Deactivated {
                temp_c,
                ran_for,
                started_at,
            } => {
                info!(
                    "STOP fan after {}s at {:.1}\u{00b0}C, started at {}",
                    ran_for.as_secs(),
                    temp_c,
                    started_at
                );
            }
            FanEvent::ForcedOn => info!("User requested manual starting fan"),
            FanEvent::ModeChanged { from, to } => info!("MODE | {:?} -> {:?}", from, to),
            FanEvent::SensorFault(e) => error!("reading temperature: {}", e),
            FanEvent::OutputFault(e) => warn!("fan output: {}", e),
            FanEvent::Telemetry(t) => {
                info!(
                    "STATUS | phase={:?} mode={:?} | T={} | fan={} | overheat={}s | on={}s",
                    t.phase,
                    t.mode,
                    t.temperature_c
                        .map_or_else(|| "n/a".to_owned(), |c| format!("{c:.1}\u{00b0}C")),
                    if t.fan_on { "ON" } else { "OFF" },
                    t.overheat_for.map_or(0, |d| d.as_secs()),
                    t.fan_on_for.map_or(0, |d| d.as_secs()),
                );
            }
            FanEvent::Shutdown => info!("fan off, shutting down"),
        }
    }
}
