//! Manual override file adapter.
//!
//! The operator writes `1` to the override file to force the fan on and
//! `0` (or deletes the file) to hand control back.  Anything unreadable
//! or non-numeric counts as "no override": the controller falls back to
//! automatic mode, never to forcing the fan.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::app::ports::OverridePort;
use crate::error::OverrideReadError;

/// Interpret the first line of the override file.  Any non-zero integer
/// requests the fan on.
pub fn parse_override_flag(text: &str) -> Result<bool, OverrideReadError> {
    let first = text.lines().next().unwrap_or_default().trim();
    let value: i64 = first.parse().map_err(|_| OverrideReadError::NotNumeric)?;
    Ok(value != 0)
}

pub struct OverrideFile {
    path: PathBuf,
}

impl OverrideFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_flag(&self) -> Result<bool, OverrideReadError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => parse_override_flag(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(_) => Err(OverrideReadError::Io),
        }
    }
}

impl OverridePort for OverrideFile {
    fn detect_manual_override(&mut self) -> bool {
        self.read_flag().unwrap_or_else(|e| {
            debug!("{}: {}, staying automatic", self.path.display(), e);
            false
        })
    }
}
