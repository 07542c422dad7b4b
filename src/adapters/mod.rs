//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter          | Implements         | Connects to                    |
//! |------------------|--------------------|--------------------------------|
//! | `hardware`       | TemperaturePort    | vcgencmd / sysfs thermal zone  |
//! |                  | FanOutputPort      | GPIO via embedded-hal          |
//! | `override_file`  | OverridePort       | operator override file         |
//! | `config_file`    | ConfigPort         | JSON config file               |
//! | `log_sink`       | EventSink          | `log` facade                   |
//! | `time`           | Clock              | `std::time::Instant`           |
//!
//! `logger` is the stdout backend behind the `log` facade.

pub mod config_file;
pub mod hardware;
pub mod log_sink;
pub mod logger;
pub mod override_file;
pub mod time;
