//! Application layer: port traits, outbound events, and the cycle
//! orchestrator.

pub mod events;
pub mod ports;
pub mod service;

pub use events::AppEvent;
pub use service::{CycleReport, MonitorService};
