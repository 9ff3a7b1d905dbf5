//! Telemetry record encoding.
//!
//! One fixed-schema JSON record per cycle. The key set and order are
//! fixed per variant regardless of input values — collectors and the
//! serial bridge rely on the schema never changing shape at runtime.
//!
//! The serial channel always carries the full converted snapshot, in
//! both variants. The collector-bound record drops vibration and soil
//! moisture (debuggable from the serial line) and instead carries the
//! raw gas ADC count so the collector can run its own calibration.

use serde::Serialize;

use crate::config::Variant;
use crate::reading::Reading;

/// Serial-only record: full converted snapshot.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StandaloneRecord {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub vibration: f32,
    pub soil_moisture: f32,
    pub pm2_5: f32,
}

/// Collector-bound record: converted climate/pressure/particulate plus
/// the unconverted gas channel.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NetworkedRecord {
    pub temperature: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub pm2_5: f32,
    pub gas_raw: u16,
}

/// Fixed-schema numeric record representing one [`Reading`].
#[derive(Debug, Clone, Copy)]
pub enum TelemetryRecord {
    Standalone(StandaloneRecord),
    Networked(NetworkedRecord),
}

impl TelemetryRecord {
    /// Serialize to a single JSON line.
    ///
    /// Only finite numbers reach the encoder (Reading invariant), so
    /// serialization cannot fail; the empty-object fallback exists to
    /// keep this total without a panic path.
    pub fn to_json(&self) -> String {
        let result = match self {
            Self::Standalone(r) => serde_json::to_string(r),
            Self::Networked(r) => serde_json::to_string(r),
        };
        result.unwrap_or_else(|_| String::from("{}"))
    }
}

/// Encodes one `Reading` per cycle into the serial and collector
/// record schemas.
pub struct TelemetryEncoder {
    variant: Variant,
}

impl TelemetryEncoder {
    pub fn new(variant: Variant) -> Self {
        Self { variant }
    }

    /// Record for the local serial channel: the full converted
    /// snapshot, regardless of variant.
    pub fn encode_local(&self, reading: &Reading) -> TelemetryRecord {
        TelemetryRecord::Standalone(StandaloneRecord {
            temperature: reading.temperature_c,
            humidity: reading.humidity_pct,
            pressure: reading.pressure_hpa,
            vibration: reading.vibration,
            soil_moisture: reading.soil_moisture,
            pm2_5: reading.pm2_5,
        })
    }

    /// Record for the collector POST, in the variant's wire schema.
    pub fn encode_remote(&self, reading: &Reading) -> TelemetryRecord {
        match self.variant {
            Variant::Standalone => self.encode_local(reading),
            Variant::Networked => TelemetryRecord::Networked(NetworkedRecord {
                temperature: reading.temperature_c,
                humidity: reading.humidity_pct,
                pressure: reading.pressure_hpa,
                pm2_5: reading.pm2_5,
                gas_raw: reading.gas_raw,
            }),
        }
    }
}
