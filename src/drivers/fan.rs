//! Binary fan driver.
//!
//! Drives a transistor or relay on a single digital line.  Generic over
//! [`embedded_hal::digital::OutputPin`] so the same driver runs on the
//! Raspberry Pi (rppal) and against in-memory pins in tests.
//!
//! ## Safety contract
//!
//! The line is LOW when the driver hands the pin back via
//! [`FanDriver::release`].  The hysteresis logic lives in the controller;
//! this driver is a dumb actuator.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanLevel {
    Off,
    On,
}

pub struct FanDriver<P> {
    pin: P,
    level: FanLevel,
}

impl<P: OutputPin> FanDriver<P> {
    /// Take ownership of an already-configured output pin.  The line is
    /// driven LOW immediately.
    pub fn new(mut pin: P) -> Self {
        if pin.set_low().is_err() {
            warn!("fan driver: initial set_low failed");
        }
        Self {
            pin,
            level: FanLevel::Off,
        }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        self.pin
            .set_state(PinState::from(on))
            .map_err(|_| ActuatorError::OutputWriteFailed)?;
        self.level = if on { FanLevel::On } else { FanLevel::Off };
        Ok(())
    }

    pub fn level(&self) -> FanLevel {
        self.level
    }

    pub fn is_on(&self) -> bool {
        self.level == FanLevel::On
    }

    /// Drive LOW and return the pin.  Dropping the returned pin gives the
    /// line back to the system on platforms that reset on drop.
    pub fn release(mut self) -> P {
        if self.pin.set_low().is_err() {
            warn!("fan driver: set_low on release failed");
        }
        self.pin
    }
}
