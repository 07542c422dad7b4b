//! FanControl — Main Entry Point
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                    │
//! │                                                           │
//! │  HardwareAdapter      OverrideFile    LogEventSink        │
//! │  (Temperature+Fan)    (Override)      (EventSink)         │
//! │  JsonConfigFile       MonotonicClock                      │
//! │  (Config)             (Clock)                             │
//! │                                                           │
//! │  ─────────────── Port Trait Boundary ─────────────────    │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │   ControlLoop ─▶ FanController (hysteresis core)    │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use log::{error, info};
use rppal::gpio::Gpio;
use rppal::hal::Delay;

use fancontrol::adapters::config_file::JsonConfigFile;
use fancontrol::adapters::hardware::HardwareAdapter;
use fancontrol::adapters::log_sink::LogEventSink;
use fancontrol::adapters::logger;
use fancontrol::adapters::override_file::OverrideFile;
use fancontrol::adapters::time::MonotonicClock;
use fancontrol::app::control_loop::ControlLoop;
use fancontrol::app::controller::FanController;
use fancontrol::drivers::fan::FanDriver;
use fancontrol::error::SetupError;
use fancontrol::sensors::TemperatureSensor;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    logger::init().context("installing logger")?;
    info!("Starting FanController v{}...", env!("CARGO_PKG_VERSION"));

    // ── 2. Config (defaults on any problem) ───────────────────
    let config = JsonConfigFile::from_env().load_or_default();

    // ── 3. Stop flag (SIGINT / SIGTERM) ───────────────────────
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || {
            info!("Termination requested, stopping...");
            running.store(false, Ordering::SeqCst);
        })
        .context("installing signal handler")?;
    }

    // ── 4. Claim the fan line (fatal on failure) ──────────────
    let gpio = Gpio::new().map_err(|e| {
        error!("while setup: {}", e);
        SetupError::GpioUnavailable
    })?;
    let pin = gpio
        .get(config.fan_gpio)
        .map_err(|e| {
            error!("while setup: {}", e);
            SetupError::PinClaimFailed(config.fan_gpio)
        })?
        .into_output_low();
    info!("GPIO {} claimed for fan output", config.fan_gpio);

    // `hw` deasserts and releases the pin when dropped, on every path
    // out of this function.
    let mut hw = HardwareAdapter::new(TemperatureSensor::from_config(&config), FanDriver::new(pin));
    let mut sink = LogEventSink::new();

    // ── 5. Self-test + control loop ───────────────────────────
    let mut controller = FanController::new(&config);
    controller.initialize(&mut hw, &mut Delay::new(), &mut sink);

    let mut control = ControlLoop::new(
        controller,
        OverrideFile::new(config.override_path.clone()),
        MonotonicClock::new(),
        &config,
    );
    control.run(&mut hw, &mut sink, &running);

    // ── 6. Shutdown ───────────────────────────────────────────
    control.shutdown(&mut hw, &mut sink);
    Ok(())
}
