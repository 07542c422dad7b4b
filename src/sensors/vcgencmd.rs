//! VideoCore temperature command (`vcgencmd measure_temp`).
//!
//! The command prints a single line such as `temp=48.3'C`.  The value is
//! whatever sits between the first `=` and the following `'`.
//!
//! The child process is bounded by a timeout; a hung firmware mailbox
//! must not stall the control loop.

use std::io::Read;
use std::process::{Command, Stdio};
use std::time::Duration;

use log::debug;
use wait_timeout::ChildExt;

use crate::error::SensorError;

/// Parse `temp=<value>'C` into degrees Celsius.
///
/// Both delimiters are mandatory.  Surrounding whitespace and a trailing
/// newline are accepted.
pub fn parse_vcgencmd(line: &str) -> Result<f32, SensorError> {
    let (_, rest) = line.split_once('=').ok_or(SensorError::Malformed)?;
    let (value, _) = rest.split_once('\'').ok_or(SensorError::Malformed)?;
    let celsius: f32 = value
        .trim()
        .parse()
        .map_err(|_| SensorError::InvalidNumber)?;
    if !celsius.is_finite() {
        return Err(SensorError::InvalidNumber);
    }
    Ok(celsius)
}

pub struct VcgencmdSensor {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl VcgencmdSensor {
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
        }
    }

    pub fn read(&self) -> Result<f32, SensorError> {
        let line = self.run()?;
        parse_vcgencmd(&line)
    }

    /// Run the command and return the first line of its stdout.
    fn run(&self) -> Result<String, SensorError> {
        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                debug!("spawning {} failed: {}", self.command, e);
                SensorError::CommandFailed
            })?;

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(SensorError::Timeout);
            }
            Err(_) => return Err(SensorError::CommandFailed),
        };
        if !status.success() {
            debug!("{} exited with {}", self.command, status);
            return Err(SensorError::CommandFailed);
        }

        let mut out = String::new();
        child
            .stdout
            .take()
            .ok_or(SensorError::ReadFailed)?
            .read_to_string(&mut out)
            .map_err(|_| SensorError::ReadFailed)?;
        Ok(out.lines().next().unwrap_or_default().to_owned())
    }
}
