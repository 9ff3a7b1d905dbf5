//! Port traits — the boundary between the monitor core and the outside
//! world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, actuators, WiFi, HTTP collector, NVS)
//! implement these traits. The [`MonitorService`](super::service::
//! MonitorService) consumes them via generics, so the domain core never
//! touches hardware directly and every port can be mocked on the host.

use crate::actuators::DisplayFrame;
use crate::config::MonitorConfig;
use crate::reading::RawSample;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per cycle.
pub trait SensorPort {
    /// Read every channel and return one raw sample.
    ///
    /// Must be total: sensor failures surface as NaN / degenerate raw
    /// values, never as an error.
    fn acquire(&mut self) -> RawSample;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain re-applies the full output state each
/// cycle, so every method must be idempotent.
pub trait ActuatorPort {
    /// Set the red hazard indicator level.
    fn set_red(&mut self, on: bool);

    /// Set the green all-clear indicator level.
    fn set_green(&mut self, on: bool);

    /// Set the buzzer level. Pulse cadence is the controller's job.
    fn set_buzzer(&mut self, on: bool);

    /// Push one frame to the status display.
    fn show_frame(&mut self, frame: &DisplayFrame);

    /// Kill all outputs (safe shutdown).
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Link + collector ports (driven adapters: domain → network)
// ───────────────────────────────────────────────────────────────

/// Current network association status, checked before every remote
/// delivery attempt.
pub trait LinkPort {
    fn is_associated(&self) -> bool;
}

/// One-shot JSON POST to the telemetry collector.
///
/// Returns the HTTP response code; client-side failures (connect,
/// transfer) are reported as non-positive codes, mirroring how the
/// transport judges success purely by code sign.
pub trait CollectorPort {
    fn post_json(&mut self, json: &str) -> i32;
}

/// Stand-ins for standalone nodes, which carry no radio at all.
pub struct NoLink;

impl LinkPort for NoLink {
    fn is_associated(&self) -> bool {
        false
    }
}

impl CollectorPort for NoLink {
    fn post_json(&mut self, _json: &str) -> i32 {
        0
    }
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, a
/// future MQTT bridge, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Delay port (blocking waits inside a cycle)
// ───────────────────────────────────────────────────────────────

/// Blocking delay. The buzzer pulse and the end-of-cycle sleep go
/// through this so tests can observe timing instead of waiting it out.
pub trait DelayPort {
    fn delay_ms(&mut self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists system configuration.
///
/// Implementations MUST validate before persisting: a corrupted or
/// hostile blob must never be able to disable the hazard thresholds.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    fn load(&self) -> Result<MonitorConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &MonitorConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
