//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FanController (domain)
//! ```
//!
//! Driven adapters (temperature source, fan output, override file, event
//! sinks, clock, config file) implement these traits.  The
//! [`FanController`](super::controller::FanController) and
//! [`ControlLoop`](super::control_loop::ControlLoop) consume them via
//! generics, so the domain core never touches hardware directly.

use crate::config::SystemConfig;
use crate::error::{ActuatorError, SensorError};
use crate::time::Timestamp;

// ───────────────────────────────────────────────────────────────
// Temperature port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per tick.
pub trait TemperaturePort {
    /// Current CPU temperature in °C.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Fan output port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the binary fan line.
///
/// Writes are fire-and-forget: there is no feedback from the fan, and the
/// controller's belief about the fan follows the last command even when
/// the write reports an error.
pub trait FanOutputPort {
    /// Drive the line high (`true`) or low (`false`).
    fn set_output(&mut self, active: bool) -> Result<(), ActuatorError>;

    /// Deassert the line and give the pin back to the system.
    /// Further writes return [`ActuatorError::Released`].
    fn release(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Manual override port
// ───────────────────────────────────────────────────────────────

/// Operator request to force the fan on.
pub trait OverridePort {
    /// Never fails: any read or parse problem means "no override".
    fn detect_manual_override(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`FanEvent`](super::events::FanEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::FanEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source for the driving loop.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads system configuration.
///
/// Implementations MUST run [`SystemConfig::validate`] before returning a
/// config; invalid ranges are reported, never silently clamped.
pub trait ConfigPort {
    fn load(&self) -> Result<SystemConfig, ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config file present.
    NotFound,
    /// The file is not valid JSON for [`SystemConfig`].
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error reading the file.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
