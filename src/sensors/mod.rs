//! Temperature sources.
//!
//! [`TemperatureSensor`] wraps whichever source the config selects and
//! presents a single `read()` to the hardware adapter.

pub mod thermal_zone;
pub mod vcgencmd;

use std::time::Duration;

use crate::config::{SystemConfig, TempSource};
use crate::error::SensorError;
use thermal_zone::ThermalZoneSensor;
use vcgencmd::VcgencmdSensor;

pub enum TemperatureSensor {
    Vcgencmd(VcgencmdSensor),
    ThermalZone(ThermalZoneSensor),
}

impl TemperatureSensor {
    pub fn from_config(config: &SystemConfig) -> Self {
        Self::from_source(&config.temp_source, config.sensor_timeout())
    }

    pub fn from_source(source: &TempSource, timeout: Duration) -> Self {
        match source {
            TempSource::Vcgencmd { command, args } => {
                Self::Vcgencmd(VcgencmdSensor::new(command.clone(), args.clone(), timeout))
            }
            TempSource::ThermalZone { path } => Self::ThermalZone(ThermalZoneSensor::new(path)),
        }
    }

    /// Current temperature in °C.
    pub fn read(&self) -> Result<f32, SensorError> {
        match self {
            Self::Vcgencmd(s) => s.read(),
            Self::ThermalZone(s) => s.read(),
        }
    }
}
