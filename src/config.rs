//! System configuration parameters
//!
//! All tunable parameters for the fan controller.  Values can be
//! overridden by a JSON file (see [`crate::adapters::config_file`]);
//! any field left out of the file keeps its default.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::pins;

/// Where temperature readings come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TempSource {
    /// Run a command and parse `temp=<value>'C` from its first line.
    Vcgencmd { command: String, args: Vec<String> },
    /// Read integer millidegrees from a sysfs thermal zone.
    ThermalZone {
        #[serde(default = "default_thermal_zone")]
        path: PathBuf,
    },
}

fn default_thermal_zone() -> PathBuf {
    PathBuf::from(pins::THERMAL_ZONE_PATH)
}

impl Default for TempSource {
    fn default() -> Self {
        Self::Vcgencmd {
            command: pins::TEMP_COMMAND.to_owned(),
            args: pins::TEMP_COMMAND_ARGS.iter().map(|s| (*s).to_owned()).collect(),
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    // --- Thresholds ---
    /// Temperature (°C) above which an overheat episode starts
    pub max_temp_c: f32,
    /// Temperature (°C) below which cooling is considered complete
    pub stop_temp_c: f32,

    // --- Hysteresis timing ---
    /// Continuous overheat required before the fan switches on (seconds)
    pub stable_secs: u64,
    /// Minimum fan run time once switched on (seconds)
    pub cooling_secs: u64,

    // --- Loop timing ---
    /// Control loop interval (milliseconds)
    pub loop_interval_ms: u64,
    /// Upper bound on a single temperature read (milliseconds)
    pub sensor_timeout_ms: u64,
    /// Status line interval (seconds, 0 disables)
    pub telemetry_interval_secs: u64,

    // --- Self-test ---
    pub self_test_on_ms: u32,
    pub self_test_off_ms: u32,

    // --- Hardware ---
    /// BCM pin driving the fan
    pub fan_gpio: u8,
    pub temp_source: TempSource,
    /// File polled for the manual override flag
    pub override_path: PathBuf,
}

impl Default for SystemConfig {
    fn default() -> Self {
        let max_temp_c = 45.0;
        Self {
            // Thresholds
            max_temp_c,
            stop_temp_c: max_temp_c - 7.5,

            // Hysteresis timing
            stable_secs: 30,
            cooling_secs: 3 * 60,

            // Loop timing
            loop_interval_ms: 5_000,
            sensor_timeout_ms: 2_000,
            telemetry_interval_secs: 300,

            // Self-test
            self_test_on_ms: 5_000,
            self_test_off_ms: 1_000,

            // Hardware
            fan_gpio: pins::FAN_GPIO,
            temp_source: TempSource::default(),
            override_path: PathBuf::from(pins::OVERRIDE_FILE),
        }
    }
}

impl SystemConfig {
    /// Reject values that would break the hysteresis or stall the loop.
    ///
    /// Invalid ranges are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_temp_c.is_finite() || !self.stop_temp_c.is_finite() {
            return Err(ConfigError::ValidationFailed("thresholds must be finite"));
        }
        if self.stop_temp_c >= self.max_temp_c {
            return Err(ConfigError::ValidationFailed(
                "stop_temp_c must be below max_temp_c",
            ));
        }
        if self.loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("loop_interval_ms must be > 0"));
        }
        if self.sensor_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("sensor_timeout_ms must be > 0"));
        }
        Ok(())
    }

    pub fn loop_interval(&self) -> Duration {
        Duration::from_millis(self.loop_interval_ms)
    }

    pub fn sensor_timeout(&self) -> Duration {
        Duration::from_millis(self.sensor_timeout_ms)
    }

    /// `None` when telemetry is disabled.
    pub fn telemetry_interval(&self) -> Option<Duration> {
        (self.telemetry_interval_secs > 0)
            .then(|| Duration::from_secs(self.telemetry_interval_secs))
    }
}
