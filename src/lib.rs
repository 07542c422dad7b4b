//! FanControl library.
//!
//! Exposes the pure-logic modules for integration testing and the
//! adapters the binary wires together.  Nothing here depends on the
//! Raspberry Pi GPIO crate; the fan line is any
//! `embedded_hal::digital::OutputPin`.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;
pub mod pins;
pub mod time;

pub mod adapters;
pub mod drivers;
pub mod sensors;
