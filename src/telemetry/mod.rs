//! Telemetry subsystem — fixed-schema record encoding and the
//! serial/network fan-out.

pub mod encoder;
pub mod transport;

pub use encoder::{TelemetryEncoder, TelemetryRecord};
pub use transport::{TelemetryTransport, TransportOutcome};
