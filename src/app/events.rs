//! Outbound application events.
//!
//! The [`FanController`](super::controller::FanController) and
//! [`ControlLoop`](super::control_loop::ControlLoop) emit these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other side
//! decide what to do with them.

use std::time::Duration;

use crate::error::{ActuatorError, SelfTestError, SensorError};
use crate::time::Timestamp;

use super::control_loop::ControlMode;
use super::controller::FanPhase;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum FanEvent {
    /// The startup pulse completed.
    SelfTestPassed,
    /// The startup pulse failed; startup continues.
    SelfTestFailed(SelfTestError),

    /// Above `max_temp` but not for long enough yet.
    Stabilizing {
        temp_c: f32,
        elapsed: Duration,
        required: Duration,
    },
    /// The fan was switched on by the hysteresis logic.
    Activated { temp_c: f32, threshold_c: f32 },
    /// Below `stop_temp` but the minimum run time has not elapsed.
    HoldingForCooling { temp_c: f32, remaining: Duration },
    /// The fan was switched off after cooling.
    Deactivated {
        temp_c: f32,
        ran_for: Duration,
        started_at: Timestamp,
    },
    /// The fan was forced on by the operator.
    ForcedOn,

    /// The driving loop switched between automatic and manual control.
    ModeChanged { from: ControlMode, to: ControlMode },

    /// A tick was skipped because the temperature could not be read.
    SensorFault(SensorError),
    /// A write to the fan line failed.
    OutputFault(ActuatorError),

    /// Periodic status snapshot.
    Telemetry(TelemetryData),

    /// The output was deasserted and released.
    Shutdown,
}

/// A point-in-time status snapshot suitable for logging.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub phase: FanPhase,
    pub mode: ControlMode,
    /// Last successful reading, `None` before the first one.
    pub temperature_c: Option<f32>,
    pub fan_on: bool,
    /// How long the current overheat episode has lasted.
    pub overheat_for: Option<Duration>,
    /// How long the fan has been running.
    pub fan_on_for: Option<Duration>,
}
