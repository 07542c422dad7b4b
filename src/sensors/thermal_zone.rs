//! Kernel thermal zone (`/sys/class/thermal/thermal_zoneN/temp`).
//!
//! The file holds a single integer in millidegrees Celsius.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SensorError;

pub struct ThermalZoneSensor {
    path: PathBuf,
}

impl ThermalZoneSensor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read(&self) -> Result<f32, SensorError> {
        let text = fs::read_to_string(&self.path).map_err(|_| SensorError::ReadFailed)?;
        let millis: i64 = text
            .trim()
            .parse()
            .map_err(|_| SensorError::InvalidNumber)?;
        Ok(millis as f32 / 1000.0)
    }
}
