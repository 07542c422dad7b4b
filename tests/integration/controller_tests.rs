//! Integration tests for the hysteresis state machine.
//!
//! Each test drives [`FanController::tick`] with scripted readings at
//! explicit timestamps and checks both the controller's belief and the
//! writes that reached the (mock) fan line.

use std::time::Duration;

use fancontrol::app::controller::{FanController, FanPhase, FanState};
use fancontrol::app::events::FanEvent;
use fancontrol::config::SystemConfig;
use fancontrol::error::SensorError;
use fancontrol::time::Timestamp;

use crate::mock_hw::{InstantDelay, MockHardware, OutputCall, RecordingSink};

fn make_controller() -> (FanController, MockHardware, RecordingSink) {
    (
        FanController::new(&SystemConfig::default()),
        MockHardware::new(),
        RecordingSink::new(),
    )
}

fn at(secs: u64) -> Timestamp {
    Timestamp::from_secs(secs)
}

/// Drive the controller to the Active state with the fan started at `t`.
fn heat_until_on(c: &mut FanController, hw: &mut MockHardware, sink: &mut RecordingSink, t: u64) {
    hw.set_temp(46.0);
    c.tick(at(t.saturating_sub(30)), hw, sink).unwrap();
    c.tick(at(t), hw, sink).unwrap();
    assert!(c.is_active());
}

// ── Stabilization ─────────────────────────────────────────────

#[test]
fn short_overheat_does_not_start_fan() {
    let (mut c, mut hw, mut sink) = make_controller();
    hw.set_temp(46.0);

    for t in [0, 10, 20] {
        c.tick(at(t), &mut hw, &mut sink).unwrap();
        assert!(!c.is_active(), "fan must stay off at t={t}");
    }
    assert_eq!(hw.writes(), 0);
    assert_eq!(c.state().overheat_since, Some(at(0)));
    assert_eq!(
        sink.count(|e| matches!(e, FanEvent::Stabilizing { .. })),
        3
    );
}

#[test]
fn sustained_overheat_starts_fan() {
    let (mut c, mut hw, mut sink) = make_controller();
    hw.set_temp(46.0);

    for t in [0, 10, 20, 35] {
        c.tick(at(t), &mut hw, &mut sink).unwrap();
    }
    assert!(c.is_active());
    assert_eq!(c.state().fan_started_at, Some(at(35)));
    assert_eq!(hw.calls, vec![OutputCall::Set(true)]);
    assert!(matches!(
        sink.events.last(),
        Some(FanEvent::Activated { threshold_c, .. }) if (*threshold_c - 45.0).abs() < f32::EPSILON
    ));
}

#[test]
fn exactly_stable_seconds_is_enough() {
    let (mut c, mut hw, mut sink) = make_controller();
    hw.set_temp(45.5);
    c.tick(at(100), &mut hw, &mut sink).unwrap();
    c.tick(at(130), &mut hw, &mut sink).unwrap();
    assert!(c.is_active());
}

#[test]
fn reading_at_max_temp_is_dead_band() {
    let (mut c, mut hw, mut sink) = make_controller();
    hw.set_temp(45.0);
    c.tick(at(0), &mut hw, &mut sink).unwrap();
    c.tick(at(60), &mut hw, &mut sink).unwrap();
    assert_eq!(c.phase(), FanPhase::Idle);
    assert_eq!(c.state().overheat_since, None);
}

#[test]
fn dip_below_stop_restarts_stabilization() {
    let (mut c, mut hw, mut sink) = make_controller();
    hw.push(Ok(46.0));
    hw.push(Ok(30.0));
    hw.push(Ok(46.0));
    hw.push(Ok(46.0));

    c.tick(at(0), &mut hw, &mut sink).unwrap();
    c.tick(at(20), &mut hw, &mut sink).unwrap();
    assert_eq!(c.state().overheat_since, None);
    c.tick(at(25), &mut hw, &mut sink).unwrap();
    c.tick(at(40), &mut hw, &mut sink).unwrap();
    assert!(!c.is_active(), "episode restarted at t=25, only 15s elapsed");
    assert_eq!(c.state().overheat_since, Some(at(25)));
}

#[test]
fn dead_band_dip_does_not_restart_stabilization() {
    let (mut c, mut hw, mut sink) = make_controller();
    hw.push(Ok(46.0));
    hw.push(Ok(40.0));
    hw.push(Ok(46.0));

    c.tick(at(0), &mut hw, &mut sink).unwrap();
    c.tick(at(15), &mut hw, &mut sink).unwrap();
    c.tick(at(31), &mut hw, &mut sink).unwrap();
    assert!(c.is_active());
}

// ── Cooling ───────────────────────────────────────────────────

#[test]
fn fan_holds_for_minimum_cooling_time() {
    let (mut c, mut hw, mut sink) = make_controller();
    c.force_on(at(0), &mut hw, &mut sink);

    hw.set_temp(30.0);
    c.tick(at(60), &mut hw, &mut sink).unwrap();
    assert!(c.is_active(), "60s < 180s minimum run time");
    assert_eq!(c.phase(), FanPhase::Cooling);

    c.tick(at(200), &mut hw, &mut sink).unwrap();
    assert!(!c.is_active());
    assert_eq!(c.state().fan_started_at, None);
    assert_eq!(hw.calls, vec![OutputCall::Set(true), OutputCall::Set(false)]);
    assert!(matches!(
        sink.events.last(),
        Some(FanEvent::Deactivated { ran_for, started_at, .. })
            if *ran_for == Duration::from_secs(200) && *started_at == at(0)
    ));
}

#[test]
fn dead_band_never_stops_the_fan() {
    let (mut c, mut hw, mut sink) = make_controller();
    heat_until_on(&mut c, &mut hw, &mut sink, 30);

    hw.set_temp(40.0);
    for t in (60..2_000).step_by(60) {
        c.tick(at(t), &mut hw, &mut sink).unwrap();
    }
    assert!(c.is_active());
    assert_eq!(hw.writes(), 1);
}

#[test]
fn overheat_while_running_does_not_rewrite_output() {
    let (mut c, mut hw, mut sink) = make_controller();
    heat_until_on(&mut c, &mut hw, &mut sink, 30);

    for t in [40, 50, 60] {
        c.tick(at(t), &mut hw, &mut sink).unwrap();
    }
    assert_eq!(hw.writes(), 1);
    assert_eq!(c.state().fan_started_at, Some(at(30)));
}

#[test]
fn full_cycle_returns_to_idle() {
    let (mut c, mut hw, mut sink) = make_controller();
    heat_until_on(&mut c, &mut hw, &mut sink, 30);

    hw.set_temp(35.0);
    c.tick(at(100), &mut hw, &mut sink).unwrap();
    c.tick(at(210), &mut hw, &mut sink).unwrap();

    assert_eq!(c.phase(), FanPhase::Idle);
    let expected = FanState {
        current_temp: Some(35.0),
        ..FanState::default()
    };
    assert_eq!(*c.state(), expected);
}

// ── Sensor errors ─────────────────────────────────────────────

#[test]
fn malformed_reading_leaves_state_untouched() {
    let (mut c, mut hw, mut sink) = make_controller();
    hw.set_temp(46.0);
    c.tick(at(0), &mut hw, &mut sink).unwrap();
    let before = *c.state();

    hw.push(Err(SensorError::Malformed));
    let result = c.tick(at(40), &mut hw, &mut sink);

    assert_eq!(result, Err(SensorError::Malformed));
    assert_eq!(*c.state(), before);
    assert_eq!(hw.writes(), 0);
}

#[test]
fn error_while_running_keeps_fan_on() {
    let (mut c, mut hw, mut sink) = make_controller();
    heat_until_on(&mut c, &mut hw, &mut sink, 30);
    let before = *c.state();

    hw.push(Err(SensorError::Timeout));
    assert!(c.tick(at(500), &mut hw, &mut sink).is_err());
    assert_eq!(*c.state(), before);
    assert!(hw.fan_on());
}

// ── Lifecycle ─────────────────────────────────────────────────

#[test]
fn initialize_then_shutdown_leaves_line_low_and_released() {
    let (mut c, mut hw, mut sink) = make_controller();
    c.initialize(&mut hw, &mut InstantDelay, &mut sink);
    c.force_on(at(1), &mut hw, &mut sink);
    c.shutdown(&mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![
            OutputCall::Set(true),
            OutputCall::Set(false),
            OutputCall::Set(true),
            OutputCall::Set(false),
            OutputCall::Release,
        ]
    );
    assert!(!c.is_active());
    assert_eq!(sink.events.first(), Some(&FanEvent::SelfTestPassed));
}
