//! System configuration parameters
//!
//! All tunable parameters for the TerraSense monitor. Values can be
//! overridden via NVS (non-volatile storage); the firmware falls back to
//! these defaults on first boot or when the stored blob is unreadable.

use serde::{Deserialize, Serialize};

/// Build/deployment variant of the monitor.
///
/// `Standalone` nodes emit telemetry over serial only and run a fast
/// cycle; `Networked` nodes additionally POST each record to the
/// collector and run a slower cycle to stay within the WiFi power
/// budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Variant {
    Standalone,
    Networked,
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Deployment variant (selects cycle period and telemetry schema).
    pub variant: Variant,

    // --- Hazard thresholds ---
    /// Temperature (Celsius) above which a hazard is raised (strict >).
    pub temperature_alert_c: f32,
    /// Vibration level (0-10 scale) above which a hazard is raised (strict >).
    pub vibration_alert_level: f32,

    // --- Timing ---
    /// Cycle period for standalone nodes (milliseconds).
    pub standalone_cycle_ms: u32,
    /// Cycle period for networked nodes (milliseconds).
    pub networked_cycle_ms: u32,
    /// Buzzer pulse hold/release delay during a hazard cycle (milliseconds).
    pub buzzer_pulse_ms: u32,

    // --- Network (networked variant only) ---
    /// WiFi station SSID.
    pub wifi_ssid: heapless::String<32>,
    /// WiFi station password (WPA2).
    pub wifi_password: heapless::String<64>,
    /// Collector ingest endpoint for telemetry POSTs.
    pub collector_url: heapless::String<96>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Standalone,

            // Hazard thresholds
            temperature_alert_c: 50.0,
            vibration_alert_level: 8.0,

            // Timing
            standalone_cycle_ms: 500,
            networked_cycle_ms: 2000,
            buzzer_pulse_ms: 100,

            // Network
            wifi_ssid: heapless::String::new(),
            wifi_password: heapless::String::new(),
            collector_url: heapless::String::new(),
        }
    }
}

impl MonitorConfig {
    /// Cycle period in milliseconds for the configured variant.
    pub fn cycle_ms(&self) -> u32 {
        match self.variant {
            Variant::Standalone => self.standalone_cycle_ms,
            Variant::Networked => self.networked_cycle_ms,
        }
    }

    /// Range-check every field. Called before persisting to NVS so a
    /// corrupted or hostile config blob can never disable the hazard
    /// thresholds.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.temperature_alert_c.is_finite() || self.temperature_alert_c <= 0.0 {
            return Err("temperature_alert_c must be finite and positive");
        }
        if !self.vibration_alert_level.is_finite()
            || self.vibration_alert_level <= 0.0
            || self.vibration_alert_level > 10.0
        {
            return Err("vibration_alert_level must be in (0, 10]");
        }
        if self.standalone_cycle_ms == 0 || self.networked_cycle_ms == 0 {
            return Err("cycle periods must be non-zero");
        }
        if self.buzzer_pulse_ms == 0 || self.buzzer_pulse_ms > self.cycle_ms() {
            return Err("buzzer_pulse_ms must be non-zero and shorter than the cycle");
        }
        if self.variant == Variant::Networked && self.collector_url.is_empty() {
            return Err("networked variant requires a collector_url");
        }
        Ok(())
    }
}
