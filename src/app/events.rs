//! Outbound application events.
//!
//! The [`MonitorService`](super::service::MonitorService) emits these
//! through the [`EventSink`](super::ports::EventSink) port. Adapters on
//! the other side decide what to do with them — write to serial, feed a
//! future MQTT bridge, etc.

use crate::config::Variant;
use crate::telemetry::TransportOutcome;

/// Structured events emitted by the monitor core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The monitor has started (carries the active variant).
    Started(Variant),

    /// One cycle's telemetry record, already serialized to its JSON
    /// line. The serial sink writes this verbatim.
    Telemetry { line: String },

    /// The hazard predicate flipped from NORMAL to HAZARD this cycle.
    AlertRaised,

    /// The hazard predicate flipped back to NORMAL this cycle.
    AlertCleared,

    /// Result of this cycle's remote delivery attempt.
    RemoteOutcome(TransportOutcome),
}
