//! Fan controller — the hysteresis state machine.
//!
//! [`FanController`] owns the immutable [`Thresholds`] and the mutable
//! [`FanState`].  All I/O flows through port traits injected at call
//! sites, making the whole state machine testable with mock adapters.
//!
//! ```text
//!            temp > max for ≥ stable
//!   Idle ──▶ Stabilizing ─────────────────▶ Active
//!    ▲           │ temp < stop                │ temp < stop
//!    │◀──────────┘                            ▼
//!    └──────────────────────────────────── Cooling
//!                on for ≥ cooling
//! ```
//!
//! Readings between `stop_temp` and `max_temp` never change the fan: that
//! gap is the hysteresis dead band.
//!
//! A reading below `stop_temp` always ends the overheat episode, whether or
//! not the fan is allowed to switch off yet.  A new excursion above
//! `max_temp` therefore has to stabilize again from scratch.

use std::time::Duration;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::config::SystemConfig;
use crate::error::{SelfTestError, SensorError};
use crate::time::Timestamp;

use super::control_loop::ControlMode;
use super::events::{FanEvent, TelemetryData};
use super::ports::{EventSink, FanOutputPort, TemperaturePort};

// ───────────────────────────────────────────────────────────────
// Configuration view
// ───────────────────────────────────────────────────────────────

/// Immutable controller limits, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Above this (°C) an overheat episode starts.
    pub max_temp: f32,
    /// Below this (°C) cooling is complete.
    pub stop_temp: f32,
    /// Continuous overheat required before switching on.
    pub stable: Duration,
    /// Minimum run time once switched on.
    pub cooling: Duration,
}

impl From<&SystemConfig> for Thresholds {
    fn from(config: &SystemConfig) -> Self {
        Self {
            max_temp: config.max_temp_c,
            stop_temp: config.stop_temp_c,
            stable: Duration::from_secs(config.stable_secs),
            cooling: Duration::from_secs(config.cooling_secs),
        }
    }
}

/// Timing of the startup pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelfTestTiming {
    pub on_ms: u32,
    pub off_ms: u32,
}

impl From<&SystemConfig> for SelfTestTiming {
    fn from(config: &SystemConfig) -> Self {
        Self {
            on_ms: config.self_test_on_ms,
            off_ms: config.self_test_off_ms,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Mutable state
// ───────────────────────────────────────────────────────────────

/// Everything the controller mutates.
///
/// `fan_started_at.is_some() == is_active` holds after every operation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FanState {
    /// First reading above `max_temp` in the current episode.
    pub overheat_since: Option<Timestamp>,
    /// When the output was last asserted.
    pub fan_started_at: Option<Timestamp>,
    /// Most recent successful reading.
    pub current_temp: Option<f32>,
    /// Commanded output level (belief, not read back from hardware).
    pub is_active: bool,
}

/// Derived view of [`FanState`] for logging and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanPhase {
    /// Fan off, no overheat episode.
    Idle,
    /// Overheat episode running, fan still off.
    Stabilizing,
    /// Fan on.
    Active,
    /// Fan on, temperature below `stop_temp`, minimum run time not over.
    Cooling,
}

// ───────────────────────────────────────────────────────────────
// FanController
// ───────────────────────────────────────────────────────────────

pub struct FanController {
    limits: Thresholds,
    self_test: SelfTestTiming,
    state: FanState,
}

impl FanController {
    pub fn new(config: &SystemConfig) -> Self {
        Self::with_limits(Thresholds::from(config), SelfTestTiming::from(config))
    }

    pub fn with_limits(limits: Thresholds, self_test: SelfTestTiming) -> Self {
        Self {
            limits,
            self_test,
            state: FanState::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Pulse the fan once so the operator can hear/see the wiring works.
    ///
    /// Best effort: a failure is reported through `sink` and startup
    /// continues.  The output is left deasserted either way.
    pub fn initialize(
        &mut self,
        hw: &mut impl FanOutputPort,
        delay: &mut impl DelayNs,
        sink: &mut impl EventSink,
    ) {
        match self.run_self_test(hw, delay) {
            Ok(()) => sink.emit(&FanEvent::SelfTestPassed),
            Err(e) => {
                let _ = hw.set_output(false);
                sink.emit(&FanEvent::SelfTestFailed(e));
            }
        }
        self.state.is_active = false;
        self.state.fan_started_at = None;
    }

    /// Deassert the output and release the pin.
    pub fn shutdown(&mut self, hw: &mut impl FanOutputPort, sink: &mut impl EventSink) {
        if let Err(e) = hw.set_output(false) {
            sink.emit(&FanEvent::OutputFault(e));
        }
        hw.release();
        self.state = FanState {
            current_temp: self.state.current_temp,
            ..FanState::default()
        };
        sink.emit(&FanEvent::Shutdown);
        info!("fan output released");
    }

    // ── Per-tick evaluation ───────────────────────────────────

    /// Read the temperature and apply one hysteresis step.
    ///
    /// On a sensor error nothing is mutated and the error is returned for
    /// the caller to log; the next tick simply tries again.
    pub fn tick(
        &mut self,
        now: Timestamp,
        hw: &mut (impl TemperaturePort + FanOutputPort),
        sink: &mut impl EventSink,
    ) -> Result<(), SensorError> {
        let temp = hw.read_temperature()?;
        self.state.current_temp = Some(temp);

        if temp > self.limits.max_temp {
            let since = *self.state.overheat_since.get_or_insert(now);
            self.try_activate(now, since, temp, hw, sink);
        } else if temp < self.limits.stop_temp {
            self.try_deactivate(now, temp, hw, sink);
            self.state.overheat_since = None;
        }
        Ok(())
    }

    /// Assert the output regardless of temperature or episode state.
    ///
    /// Restarts the minimum run time; `overheat_since` is left alone.
    pub fn force_on(
        &mut self,
        now: Timestamp,
        hw: &mut impl FanOutputPort,
        sink: &mut impl EventSink,
    ) {
        self.drive(true, now, hw, sink);
        sink.emit(&FanEvent::ForcedOn);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &FanState {
        &self.state
    }

    pub fn limits(&self) -> &Thresholds {
        &self.limits
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn phase(&self) -> FanPhase {
        let below_stop = self
            .state
            .current_temp
            .is_some_and(|t| t < self.limits.stop_temp);
        match (self.state.is_active, self.state.overheat_since) {
            (false, None) => FanPhase::Idle,
            (false, Some(_)) => FanPhase::Stabilizing,
            (true, _) if below_stop => FanPhase::Cooling,
            (true, _) => FanPhase::Active,
        }
    }

    pub fn build_telemetry(&self, now: Timestamp, mode: ControlMode) -> TelemetryData {
        TelemetryData {
            phase: self.phase(),
            mode,
            temperature_c: self.state.current_temp,
            fan_on: self.state.is_active,
            overheat_for: self.state.overheat_since.map(|t| now.saturating_since(t)),
            fan_on_for: self.state.fan_started_at.map(|t| now.saturating_since(t)),
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn try_activate(
        &mut self,
        now: Timestamp,
        since: Timestamp,
        temp: f32,
        hw: &mut impl FanOutputPort,
        sink: &mut impl EventSink,
    ) {
        if self.state.is_active {
            return;
        }
        let elapsed = now.saturating_since(since);
        if elapsed < self.limits.stable {
            sink.emit(&FanEvent::Stabilizing {
                temp_c: temp,
                elapsed,
                required: self.limits.stable,
            });
            return;
        }
        self.drive(true, now, hw, sink);
        sink.emit(&FanEvent::Activated {
            temp_c: temp,
            threshold_c: self.limits.max_temp,
        });
    }

    fn try_deactivate(
        &mut self,
        now: Timestamp,
        temp: f32,
        hw: &mut impl FanOutputPort,
        sink: &mut impl EventSink,
    ) {
        let Some(started_at) = self.state.fan_started_at.filter(|_| self.state.is_active) else {
            return;
        };
        let ran_for = now.saturating_since(started_at);
        if ran_for < self.limits.cooling {
            sink.emit(&FanEvent::HoldingForCooling {
                temp_c: temp,
                remaining: self.limits.cooling - ran_for,
            });
            return;
        }
        self.drive(false, now, hw, sink);
        sink.emit(&FanEvent::Deactivated {
            temp_c: temp,
            ran_for,
            started_at,
        });
    }

    /// Command the output and update the belief in one place so the
    /// `fan_started_at` / `is_active` pairing cannot drift.
    fn drive(
        &mut self,
        active: bool,
        now: Timestamp,
        hw: &mut impl FanOutputPort,
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = hw.set_output(active) {
            sink.emit(&FanEvent::OutputFault(e));
        }
        self.state.is_active = active;
        self.state.fan_started_at = active.then_some(now);
    }

    fn run_self_test(
        &self,
        hw: &mut impl FanOutputPort,
        delay: &mut impl DelayNs,
    ) -> Result<(), SelfTestError> {
        hw.set_output(true)
            .map_err(|_| SelfTestError::OutputWriteFailed)?;
        delay.delay_ms(self.self_test.on_ms);
        hw.set_output(false)
            .map_err(|_| SelfTestError::OutputWriteFailed)?;
        delay.delay_ms(self.self_test.off_ms);
        Ok(())
    }
}
