//! Adapters — concrete implementations of the application port traits.
//!
//! Each adapter binds one outside-world concern (hardware, WiFi, HTTP,
//! NVS, logging, time) to the trait boundary in [`crate::app::ports`].

pub mod collector;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
pub mod wifi;

pub use collector::HttpCollector;
pub use hardware::HardwareAdapter;
pub use log_sink::LogEventSink;
pub use nvs::NvsConfigStore;
pub use time::SystemDelay;
pub use wifi::{ConnectivityPort, WifiAdapter};
