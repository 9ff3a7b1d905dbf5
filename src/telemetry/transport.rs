//! Telemetry fan-out.
//!
//! Every cycle's record goes to the serial channel unconditionally; on
//! networked nodes the same cycle also gets one lossy, independent
//! delivery attempt to the collector. The remote outcome is purely
//! informational — it never feeds back into the hazard pipeline or the
//! actuators.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{CollectorPort, EventSink, LinkPort};

use super::encoder::TelemetryRecord;

/// Result of one remote delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOutcome {
    /// POST issued and the server answered with a positive code.
    Sent(i32),
    /// No network association at attempt time; nothing was sent.
    SkippedNoLink,
    /// POST attempted but failed (non-positive code, incl. client-side
    /// connect errors reported as negative codes).
    Failed(i32),
}

pub struct TelemetryTransport;

impl Default for TelemetryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryTransport {
    pub fn new() -> Self {
        Self
    }

    /// Write the record to the serial channel. Always executes and
    /// cannot fail in any modeled way.
    pub fn emit_local(&self, record: &TelemetryRecord, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Telemetry {
            line: record.to_json(),
        });
    }

    /// One independent, lossy delivery attempt to the collector.
    ///
    /// Skipped without touching the network when the link is down; no
    /// retry, no backoff, no queueing of failed records.
    pub fn emit_remote(
        &self,
        record: &TelemetryRecord,
        link: &impl LinkPort,
        collector: &mut impl CollectorPort,
        sink: &mut impl EventSink,
    ) -> TransportOutcome {
        let outcome = if link.is_associated() {
            let code = collector.post_json(&record.to_json());
            if code > 0 {
                info!("telemetry POST ok (code {code})");
                TransportOutcome::Sent(code)
            } else {
                warn!("telemetry POST failed (code {code})");
                TransportOutcome::Failed(code)
            }
        } else {
            debug!("telemetry POST skipped: no link");
            TransportOutcome::SkippedNoLink
        };

        sink.emit(&AppEvent::RemoteOutcome(outcome));
        outcome
    }
}
