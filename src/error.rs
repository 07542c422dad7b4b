//! Unified error types for the fan controller.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can travel through events and the loop boundary without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The temperature source could not be read or returned malformed text.
    Sensor(SensorError),
    /// The fan output line could not be claimed at startup.
    Setup(SetupError),
    /// The startup self-test could not complete.
    SelfTest(SelfTestError),
    /// A fan output write failed.
    Actuator(ActuatorError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Setup(e) => write!(f, "setup: {e}"),
            Self::SelfTest(e) => write!(f, "self-test: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// Recovered locally: the tick is skipped and the previous state retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The sensor command could not be spawned or exited unsuccessfully.
    CommandFailed,
    /// The sensor command did not finish within the configured timeout.
    Timeout,
    /// Output was missing the `=` or `'` delimiter.
    Malformed,
    /// The value between the delimiters is not a finite number.
    InvalidNumber,
    /// The sensor output or file could not be read.
    ReadFailed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandFailed => write!(f, "temperature command failed"),
            Self::Timeout => write!(f, "temperature command timed out"),
            Self::Malformed => write!(f, "expected formatted output \"temp=[value float]'C\""),
            Self::InvalidNumber => write!(f, "temperature value is not a number"),
            Self::ReadFailed => write!(f, "temperature source unreadable"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Setup errors
// ---------------------------------------------------------------------------

/// Fatal: the process cannot run without the fan output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    /// The GPIO peripheral could not be opened.
    GpioUnavailable,
    /// The given pin could not be claimed as an output.
    PinClaimFailed(u8),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioUnavailable => write!(f, "GPIO peripheral unavailable"),
            Self::PinClaimFailed(pin) => write!(f, "could not claim GPIO {pin} for output"),
        }
    }
}

impl std::error::Error for SetupError {}

impl From<SetupError> for Error {
    fn from(e: SetupError) -> Self {
        Self::Setup(e)
    }
}

// ---------------------------------------------------------------------------
// Self-test errors
// ---------------------------------------------------------------------------

/// Non-fatal: logged, startup proceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelfTestError {
    /// Driving the output during the self-test pulse failed.
    OutputWriteFailed,
}

impl fmt::Display for SelfTestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputWriteFailed => write!(f, "fan output write failed during self-test"),
        }
    }
}

impl std::error::Error for SelfTestError {}

impl From<SelfTestError> for Error {
    fn from(e: SelfTestError) -> Self {
        Self::SelfTest(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// The GPIO write returned an error.
    OutputWriteFailed,
    /// The output line has already been released.
    Released,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputWriteFailed => write!(f, "GPIO write failed"),
            Self::Released => write!(f, "output already released"),
        }
    }
}

impl std::error::Error for ActuatorError {}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Override read errors
// ---------------------------------------------------------------------------

/// Never surfaced past the override adapter; it maps every variant to
/// "no override".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideReadError {
    /// The override file exists but could not be read.
    Io,
    /// The first line is not an integer.
    NotNumeric,
}

impl fmt::Display for OverrideReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io => write!(f, "override file unreadable"),
            Self::NotNumeric => write!(f, "override value is not numeric"),
        }
    }
}

impl std::error::Error for OverrideReadError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
