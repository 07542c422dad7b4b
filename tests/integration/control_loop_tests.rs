//! Integration tests for the driving loop: manual override handling,
//! sensor-error recovery at the loop boundary, and telemetry cadence.

use std::sync::atomic::AtomicBool;

use fancontrol::app::control_loop::{ControlLoop, ControlMode};
use fancontrol::app::controller::FanController;
use fancontrol::app::events::FanEvent;
use fancontrol::config::SystemConfig;
use fancontrol::error::SensorError;

use crate::mock_hw::{ManualClock, MockHardware, MockOverride, OutputCall, RecordingSink};

struct Rig {
    control: ControlLoop<MockOverride, ManualClock>,
    manual: MockOverride,
    clock: ManualClock,
    hw: MockHardware,
    sink: RecordingSink,
}

fn make_rig(config: &SystemConfig) -> Rig {
    let manual = MockOverride::default();
    let clock = ManualClock::default();
    let control = ControlLoop::new(
        FanController::new(config),
        manual.clone(),
        clock.clone(),
        config,
    );
    Rig {
        control,
        manual,
        clock,
        hw: MockHardware::new(),
        sink: RecordingSink::new(),
    }
}

fn quiet_config() -> SystemConfig {
    SystemConfig {
        telemetry_interval_secs: 0,
        ..SystemConfig::default()
    }
}

impl Rig {
    fn step_at(&mut self, secs: u64) {
        self.clock.set_secs(secs);
        self.control.step(&mut self.hw, &mut self.sink);
    }
}

#[test]
fn override_forces_fan_on_regardless_of_temperature() {
    let mut rig = make_rig(&quiet_config());
    rig.hw.set_temp(20.0);
    rig.manual.set(true);

    for t in [0, 5, 10] {
        rig.step_at(t);
        assert!(rig.control.controller().is_active(), "fan on at t={t}");
        assert_eq!(rig.control.mode(), ControlMode::ManualForced);
    }

    // Edge-triggered: one write, one ForcedOn, however long the flag stays.
    assert_eq!(rig.hw.calls, vec![OutputCall::Set(true)]);
    assert_eq!(rig.sink.count(|e| *e == FanEvent::ForcedOn), 1);
}

#[test]
fn override_skips_temperature_evaluation() {
    let mut rig = make_rig(&quiet_config());
    rig.hw.push(Err(SensorError::Malformed));
    rig.manual.set(true);

    rig.step_at(0);
    rig.step_at(5);
    assert_eq!(
        rig.sink
            .count(|e| matches!(e, FanEvent::SensorFault(_))),
        0
    );
}

#[test]
fn releasing_override_returns_to_automatic_with_cooling_hold() {
    let mut rig = make_rig(&quiet_config());
    rig.hw.set_temp(30.0);
    rig.manual.set(true);
    rig.step_at(0);

    rig.manual.set(false);
    rig.step_at(60);
    assert_eq!(rig.control.mode(), ControlMode::Automatic);
    assert!(
        rig.control.controller().is_active(),
        "forced run still inside the minimum cooling time"
    );

    rig.step_at(185);
    assert!(!rig.control.controller().is_active());
    assert!(rig.sink.events.contains(&FanEvent::ModeChanged {
        from: ControlMode::ManualForced,
        to: ControlMode::Automatic,
    }));
}

#[test]
fn reasserting_override_forces_again() {
    let mut rig = make_rig(&quiet_config());
    rig.hw.set_temp(30.0);

    rig.manual.set(true);
    rig.step_at(0);
    rig.manual.set(false);
    rig.step_at(200);
    assert!(!rig.control.controller().is_active());

    rig.manual.set(true);
    rig.step_at(205);
    assert!(rig.control.controller().is_active());
    assert_eq!(rig.sink.count(|e| *e == FanEvent::ForcedOn), 2);
}

#[test]
fn sensor_errors_are_reported_and_loop_continues() {
    let mut rig = make_rig(&quiet_config());
    rig.hw.push(Err(SensorError::Malformed));
    rig.hw.push(Ok(46.0));

    rig.step_at(0);
    assert!(rig
        .sink
        .events
        .contains(&FanEvent::SensorFault(SensorError::Malformed)));
    assert_eq!(rig.control.controller().state().overheat_since, None);

    rig.step_at(5);
    rig.step_at(40);
    assert!(rig.control.controller().is_active());
    assert_eq!(rig.control.iterations(), 3);
}

#[test]
fn telemetry_follows_configured_interval() {
    let config = SystemConfig {
        telemetry_interval_secs: 60,
        ..SystemConfig::default()
    };
    let mut rig = make_rig(&config);

    for t in (0..=180).step_by(5) {
        rig.step_at(t);
    }
    // t = 0, 60, 120, 180
    assert_eq!(
        rig.sink.count(|e| matches!(e, FanEvent::Telemetry(_))),
        4
    );
}

#[test]
fn run_returns_immediately_when_stopped() {
    let mut rig = make_rig(&quiet_config());
    let running = AtomicBool::new(false);
    rig.control.run(&mut rig.hw, &mut rig.sink, &running);
    assert_eq!(rig.control.iterations(), 0);

    rig.control.shutdown(&mut rig.hw, &mut rig.sink);
    assert!(rig.hw.released());
    assert_eq!(rig.sink.events.last(), Some(&FanEvent::Shutdown));
}
