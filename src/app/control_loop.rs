//! Driving loop — polls the override flag and ticks the controller.
//!
//! The loop carries its own [`ControlMode`].  Manual override is
//! edge-triggered: [`FanController::force_on`] runs once when the flag
//! appears, not on every iteration while it stays set.  When the flag
//! disappears the loop drops back to automatic control and the normal
//! minimum run time decides when the fan may stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::{debug, info};

use crate::config::SystemConfig;
use crate::time::Timestamp;

use super::controller::FanController;
use super::events::FanEvent;
use super::ports::{Clock, EventSink, FanOutputPort, OverridePort, TemperaturePort};

/// Sleep granularity while waiting for the next iteration, so a stop
/// request is honoured well before a full interval elapses.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMode {
    /// Temperature hysteresis decides.
    Automatic,
    /// Operator forced the fan on.
    ManualForced,
}

pub struct ControlLoop<O, C> {
    controller: FanController,
    override_port: O,
    clock: C,
    mode: ControlMode,
    interval: Duration,
    telemetry_interval: Option<Duration>,
    last_telemetry: Option<Timestamp>,
    iterations: u64,
}

impl<O: OverridePort, C: Clock> ControlLoop<O, C> {
    pub fn new(controller: FanController, override_port: O, clock: C, config: &SystemConfig) -> Self {
        Self {
            controller,
            override_port,
            clock,
            mode: ControlMode::Automatic,
            interval: config.loop_interval(),
            telemetry_interval: config.telemetry_interval(),
            last_telemetry: None,
            iterations: 0,
        }
    }

    /// One loop iteration.  Never fails: sensor errors are reported through
    /// `sink` and the next iteration retries.
    pub fn step(
        &mut self,
        hw: &mut (impl TemperaturePort + FanOutputPort),
        sink: &mut impl EventSink,
    ) {
        self.iterations += 1;
        let now = self.clock.now();
        let requested = self.override_port.detect_manual_override();

        match (requested, self.mode) {
            (true, ControlMode::Automatic) => {
                self.switch_mode(ControlMode::ManualForced, sink);
                self.controller.force_on(now, hw, sink);
            }
            (true, ControlMode::ManualForced) => {
                debug!("manual override still active, skipping evaluation");
            }
            (false, ControlMode::ManualForced) => {
                self.switch_mode(ControlMode::Automatic, sink);
                self.evaluate(now, hw, sink);
            }
            (false, ControlMode::Automatic) => self.evaluate(now, hw, sink),
        }

        self.maybe_emit_telemetry(now, sink);
    }

    /// Run until `running` is cleared.  The caller is responsible for
    /// [`shutdown`](Self::shutdown) afterwards.
    pub fn run(
        &mut self,
        hw: &mut (impl TemperaturePort + FanOutputPort),
        sink: &mut impl EventSink,
        running: &AtomicBool,
    ) {
        info!(
            "entering control loop ({}ms interval)",
            self.interval.as_millis()
        );
        while running.load(Ordering::SeqCst) {
            self.step(hw, sink);
            self.sleep_interval(running);
        }
        info!("control loop stopped after {} iterations", self.iterations);
    }

    pub fn shutdown(&mut self, hw: &mut impl FanOutputPort, sink: &mut impl EventSink) {
        self.controller.shutdown(hw, sink);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn controller(&self) -> &FanController {
        &self.controller
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    // ── Internal ──────────────────────────────────────────────

    fn evaluate(
        &mut self,
        now: Timestamp,
        hw: &mut (impl TemperaturePort + FanOutputPort),
        sink: &mut impl EventSink,
    ) {
        if let Err(e) = self.controller.tick(now, hw, sink) {
            sink.emit(&FanEvent::SensorFault(e));
        }
    }

    fn switch_mode(&mut self, to: ControlMode, sink: &mut impl EventSink) {
        let from = self.mode;
        self.mode = to;
        sink.emit(&FanEvent::ModeChanged { from, to });
    }

    fn maybe_emit_telemetry(&mut self, now: Timestamp, sink: &mut impl EventSink) {
        let Some(every) = self.telemetry_interval else {
            return;
        };
        let due = self
            .last_telemetry
            .is_none_or(|last| now.saturating_since(last) >= every);
        if due {
            self.last_telemetry = Some(now);
            sink.emit(&FanEvent::Telemetry(
                self.controller.build_telemetry(now, self.mode),
            ));
        }
    }

    fn sleep_interval(&self, running: &AtomicBool) {
        let mut remaining = self.interval;
        while !remaining.is_zero() && running.load(Ordering::SeqCst) {
            let slice = remaining.min(SLEEP_SLICE);
            std::thread::sleep(slice);
            remaining = remaining.saturating_sub(slice);
        }
    }
}
