//! Fixed hardware assignments and well-known paths.
//!
//! Single source of truth — the config defaults reference this module
//! rather than hard-coding pin numbers or file locations.

// ---------------------------------------------------------------------------
// Fan output
// ---------------------------------------------------------------------------

/// BCM GPIO driving the fan transistor / relay (active HIGH).
pub const FAN_GPIO: u8 = 18;

// ---------------------------------------------------------------------------
// Temperature source
// ---------------------------------------------------------------------------

/// VideoCore command printing `temp=<value>'C`.
pub const TEMP_COMMAND: &str = "vcgencmd";
pub const TEMP_COMMAND_ARGS: &[&str] = &["measure_temp"];

/// Kernel thermal zone for the SoC (integer millidegrees Celsius).
pub const THERMAL_ZONE_PATH: &str = "/sys/class/thermal/thermal_zone0/temp";

// ---------------------------------------------------------------------------
// Operator files
// ---------------------------------------------------------------------------

/// Writing `1` here forces the fan on; `0` or absence returns to automatic.
pub const OVERRIDE_FILE: &str = "/opt/fancontrol/manual";

/// Optional JSON configuration.
pub const CONFIG_FILE: &str = "/opt/fancontrol/config.json";

/// Environment variable overriding [`CONFIG_FILE`].
pub const CONFIG_ENV: &str = "FANCONTROL_CONFIG";
