//! Application core — pure domain logic, zero I/O.
//!
//! The hysteresis state machine and the loop that drives it.  All
//! interaction with hardware happens through **port traits** defined in
//! [`ports`], keeping this layer fully testable without real peripherals.

pub mod control_loop;
pub mod controller;
pub mod events;
pub mod ports;
