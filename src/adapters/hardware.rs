//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`TemperatureSensor`] and the [`FanDriver`], exposing them
//! through [`TemperaturePort`] and [`FanOutputPort`].  This is the only
//! module in the system that touches actual hardware.
//!
//! The adapter is also the scoped guard for the fan line: dropping it
//! deasserts and releases the pin, so every exit path out of `main`
//! (including `?` during setup and unwinding panics) leaves the fan off.

use embedded_hal::digital::OutputPin;
use log::info;

use crate::app::ports::{FanOutputPort, TemperaturePort};
use crate::drivers::fan::FanDriver;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::TemperatureSensor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<P: OutputPin> {
    sensor: TemperatureSensor,
    /// `None` once released.
    fan: Option<FanDriver<P>>,
}

impl<P: OutputPin> HardwareAdapter<P> {
    pub fn new(sensor: TemperatureSensor, fan: FanDriver<P>) -> Self {
        Self {
            sensor,
            fan: Some(fan),
        }
    }

    pub fn is_released(&self) -> bool {
        self.fan.is_none()
    }
}

// ── TemperaturePort implementation ────────────────────────────

impl<P: OutputPin> TemperaturePort for HardwareAdapter<P> {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.sensor.read()
    }
}

// ── FanOutputPort implementation ──────────────────────────────

impl<P: OutputPin> FanOutputPort for HardwareAdapter<P> {
    fn set_output(&mut self, active: bool) -> Result<(), ActuatorError> {
        self.fan
            .as_mut()
            .ok_or(ActuatorError::Released)?
            .set(active)
    }

    fn release(&mut self) {
        if let Some(fan) = self.fan.take() {
            drop(fan.release());
            info!("fan GPIO released");
        }
    }
}

impl<P: OutputPin> Drop for HardwareAdapter<P> {
    fn drop(&mut self) {
        self.release();
    }
}
