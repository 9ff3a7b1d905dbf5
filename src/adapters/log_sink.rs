//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the serial
//! console. Telemetry records are printed as raw JSON lines rather than
//! log records: the serial bridge on the other end of the UART parses
//! one JSON object per line and must not see logger prefixes on them.
//! Everything else goes through the ESP-IDF logger.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::telemetry::TransportOutcome;

/// Adapter that writes every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry { line } => {
                println!("{line}");
            }
            AppEvent::Started(variant) => {
                info!("START | variant={:?}", variant);
            }
            AppEvent::AlertRaised => {
                warn!("ALERT | hazard raised");
            }
            AppEvent::AlertCleared => {
                info!("ALERT | hazard cleared");
            }
            AppEvent::RemoteOutcome(outcome) => match outcome {
                TransportOutcome::Sent(code) => {
                    info!("POST  | sent (code {code})");
                }
                TransportOutcome::SkippedNoLink => {
                    info!("POST  | skipped, no link");
                }
                TransportOutcome::Failed(code) => {
                    warn!("POST  | failed (code {code})");
                }
            },
        }
    }
}
