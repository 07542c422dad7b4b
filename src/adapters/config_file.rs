//! JSON configuration file adapter.
//!
//! Implements [`ConfigPort`] over a single JSON document.  Fields missing
//! from the file keep their defaults; the result is validated before it
//! is handed out.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::SystemConfig;
use crate::pins;

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$FANCONTROL_CONFIG` if set, otherwise the well-known path.
    pub fn from_env() -> Self {
        let path = std::env::var_os(pins::CONFIG_ENV)
            .map_or_else(|| PathBuf::from(pins::CONFIG_FILE), PathBuf::from);
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load, falling back to defaults on any error.  Configuration problems
    /// never stop the fan controller from starting.
    pub fn load_or_default(&self) -> SystemConfig {
        match self.load() {
            Ok(cfg) => {
                info!("Config loaded from {}", self.path.display());
                cfg
            }
            Err(ConfigError::NotFound) => {
                info!("No config at {}, using defaults", self.path.display());
                SystemConfig::default()
            }
            Err(e) => {
                warn!("Config {} rejected ({}), using defaults", self.path.display(), e);
                SystemConfig::default()
            }
        }
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> Result<SystemConfig, ConfigError> {
        let text = fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config: SystemConfig =
            serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }
}
