//! Integration tests: full pipeline from simulated sensors through the
//! hazard predicate to actuators and telemetry.
//!
//! These run the real `SensorHub`, drivers, and adapters on the host —
//! hardware access is cfg-gated inside the drivers, so what executes
//! here is the same orchestration code the device runs, fed by the
//! simulation hooks.

#![cfg(not(target_os = "espidf"))]

use std::sync::{Mutex, MutexGuard, OnceLock};

use terrasense::actuators::{Banner, DisplayFrame};
use terrasense::adapters::collector::{
    sim_last_body, sim_post_count, sim_set_response_code, HttpCollector,
};
use terrasense::adapters::hardware::HardwareAdapter;
use terrasense::adapters::wifi::{ConnectivityPort, WifiAdapter};
use terrasense::app::events::AppEvent;
use terrasense::app::ports::{DelayPort, EventSink, LinkPort, NoLink};
use terrasense::app::service::MonitorService;
use terrasense::config::{MonitorConfig, Variant};
use terrasense::drivers::buzzer::Buzzer;
use terrasense::drivers::display::StatusDisplay;
use terrasense::drivers::indicator::IndicatorLeds;
use terrasense::hazard::AlertState;
use terrasense::pins::PinMap;
use terrasense::sensors::{self, SensorHub};
use terrasense::telemetry::TransportOutcome;

// The sensor simulation hooks are process-wide statics, so tests that
// touch them must not interleave.
fn sim_lock() -> MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn quiet_environment() {
    sensors::climate::sim_set_climate(21.0, 50.0);
    sensors::vibration::sim_set_vibration_adc(820);
    sensors::pressure::sim_set_pressure_adc(2048);
    sensors::soil::sim_set_soil_adc(1024);
    sensors::gas::sim_set_gas(false, 300);
}

fn hardware() -> HardwareAdapter {
    let pins = PinMap::esp32_devkit();
    HardwareAdapter::new(
        SensorHub::new(&pins),
        IndicatorLeds::new(pins.led_red_gpio, pins.led_green_gpio),
        Buzzer::new(pins.buzzer_gpio),
        StatusDisplay::new(),
    )
}

fn networked_config() -> MonitorConfig {
    let mut config = MonitorConfig::default();
    config.variant = Variant::Networked;
    config.wifi_ssid = heapless::String::try_from("FieldNet").unwrap();
    config.wifi_password = heapless::String::try_from("password1").unwrap();
    config.collector_url = heapless::String::try_from("http://collector.local/ingest").unwrap();
    config
}

struct NoDelay;
impl DelayPort for NoDelay {
    fn delay_ms(&mut self, _ms: u32) {}
}

#[derive(Default)]
struct CapturingSink {
    events: Vec<AppEvent>,
}

impl CapturingSink {
    fn telemetry_lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::Telemetry { line } => Some(line.clone()),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for CapturingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Standalone pipeline ───────────────────────────────────────

#[test]
fn quiet_environment_runs_normal_cycle() {
    let _guard = sim_lock();
    quiet_environment();

    let mut service = MonitorService::new(MonitorConfig::default(), 42);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let report = service.run_cycle(&mut hw, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);

    assert_eq!(report.alert, AlertState::Normal);
    assert!((report.reading.temperature_c - 21.0).abs() < 0.01);
    assert!((report.reading.pm2_5 - 15.0).abs() < f32::EPSILON);
    assert_eq!(report.remote, None);

    let lines = sink.telemetry_lines();
    assert_eq!(lines.len(), 1);
    let json: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert!((json["temperature"].as_f64().unwrap() - 21.0).abs() < 0.01);
    assert!((json["humidity"].as_f64().unwrap() - 50.0).abs() < 0.01);
    assert!(json.get("soil_moisture").is_some());
    assert!(json.get("gas_raw").is_none());
}

#[test]
fn gas_detection_raises_hazard() {
    let _guard = sim_lock();
    quiet_environment();
    sensors::gas::sim_set_gas(true, 2400);

    let mut service = MonitorService::new(MonitorConfig::default(), 42);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let report = service.run_cycle(&mut hw, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);

    assert_eq!(report.alert, AlertState::Hazard);
    assert!((report.reading.pm2_5 - 150.0).abs() < f32::EPSILON);
    assert!(report.reading.gas_triggered);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::AlertRaised)));
}

#[test]
fn over_temperature_raises_hazard() {
    let _guard = sim_lock();
    quiet_environment();
    sensors::climate::sim_set_climate(55.0, 30.0);

    let mut service = MonitorService::new(MonitorConfig::default(), 42);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let report = service.run_cycle(&mut hw, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
    assert_eq!(report.alert, AlertState::Hazard);
}

#[test]
fn hazard_clears_when_environment_recovers() {
    let _guard = sim_lock();
    quiet_environment();
    sensors::gas::sim_set_gas(true, 2400);

    let mut service = MonitorService::new(MonitorConfig::default(), 42);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let report = service.run_cycle(&mut hw, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
    assert_eq!(report.alert, AlertState::Hazard);

    sensors::gas::sim_set_gas(false, 300);
    let report = service.run_cycle(&mut hw, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
    assert_eq!(report.alert, AlertState::Normal);
    assert!(sink
        .events
        .iter()
        .any(|e| matches!(e, AppEvent::AlertCleared)));
}

#[test]
fn failed_climate_read_substitutes_nominal_values() {
    let _guard = sim_lock();
    quiet_environment();
    sensors::climate::sim_fail_climate();

    let mut service = MonitorService::new(MonitorConfig::default(), 7);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let report = service.run_cycle(&mut hw, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);

    // Substituted values, not NaN, and nowhere near the alert threshold.
    assert!(report.reading.temperature_c >= 24.0 && report.reading.temperature_c < 26.0);
    assert!(report.reading.humidity_pct >= 58.0 && report.reading.humidity_pct < 62.0);
    assert_eq!(report.alert, AlertState::Normal);

    // The serial record carries the substituted values silently.
    let json: serde_json::Value =
        serde_json::from_str(&sink.telemetry_lines()[0]).unwrap();
    let t = json["temperature"].as_f64().unwrap();
    assert!((24.0..26.0).contains(&t));
}

#[test]
fn flat_zero_vibration_never_reaches_telemetry() {
    let _guard = sim_lock();
    quiet_environment();
    sensors::vibration::sim_set_vibration_adc(0);

    let mut service = MonitorService::new(MonitorConfig::default(), 13);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let report = service.run_cycle(&mut hw, &NoLink, &mut NoLink, &mut NoDelay, &mut sink);
    assert!(report.reading.vibration >= 0.5 && report.reading.vibration < 1.0);

    let json: serde_json::Value =
        serde_json::from_str(&sink.telemetry_lines()[0]).unwrap();
    let v = json["vibration"].as_f64().unwrap();
    assert!((0.5..1.0).contains(&v));
}

// ── Networked pipeline ────────────────────────────────────────

#[test]
fn networked_cycle_posts_to_collector() {
    let _guard = sim_lock();
    quiet_environment();
    sim_set_response_code(200);

    let config = networked_config();
    let mut wifi = WifiAdapter::new(&config).unwrap();
    wifi.connect().unwrap();
    let mut collector = HttpCollector::new(&config.collector_url);

    let mut service = MonitorService::new(config, 42);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let report = service.run_cycle(&mut hw, &wifi, &mut collector, &mut NoDelay, &mut sink);

    assert_eq!(report.remote, Some(TransportOutcome::Sent(200)));

    // Serial keeps the full snapshot alongside the POST.
    assert_eq!(sink.telemetry_lines().len(), 1);
    let serial: serde_json::Value =
        serde_json::from_str(&sink.telemetry_lines()[0]).unwrap();
    assert!(serial.get("vibration").is_some());
    assert!(serial.get("soil_moisture").is_some());
    assert!(serial.get("gas_raw").is_none());

    // The POST body is the narrower wire schema.
    let posted: serde_json::Value = serde_json::from_str(&sim_last_body()).unwrap();
    assert!(posted.get("gas_raw").is_some());
    assert!(posted.get("vibration").is_none());
    assert!(posted.get("soil_moisture").is_none());
}

#[test]
fn link_down_skips_post_but_monitors_on() {
    let _guard = sim_lock();
    quiet_environment();
    sensors::gas::sim_set_gas(true, 2400);

    let config = networked_config();
    let wifi = WifiAdapter::new(&config).unwrap(); // never connected
    let mut collector = HttpCollector::new(&config.collector_url);

    let mut service = MonitorService::new(config, 42);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let posts_before = sim_post_count();
    let report = service.run_cycle(&mut hw, &wifi, &mut collector, &mut NoDelay, &mut sink);

    assert!(!wifi.is_associated());
    assert_eq!(report.remote, Some(TransportOutcome::SkippedNoLink));
    // No outbound call was made at all.
    assert_eq!(sim_post_count(), posts_before);
    assert_eq!(report.alert, AlertState::Hazard);
    assert_eq!(sink.telemetry_lines().len(), 1);
}

#[test]
fn collector_error_is_reported_not_fatal() {
    let _guard = sim_lock();
    quiet_environment();
    sim_set_response_code(-1);

    let config = networked_config();
    let mut wifi = WifiAdapter::new(&config).unwrap();
    wifi.connect().unwrap();
    let mut collector = HttpCollector::new(&config.collector_url);

    let mut service = MonitorService::new(config, 42);
    let mut hw = hardware();
    let mut sink = CapturingSink::default();

    let report = service.run_cycle(&mut hw, &wifi, &mut collector, &mut NoDelay, &mut sink);
    assert_eq!(report.remote, Some(TransportOutcome::Failed(-1)));
    assert!(sink.events.iter().any(|e| matches!(
        e,
        AppEvent::RemoteOutcome(TransportOutcome::Failed(-1))
    )));

    // The next cycle proceeds normally once the collector recovers.
    sim_set_response_code(200);
    let report = service.run_cycle(&mut hw, &wifi, &mut collector, &mut NoDelay, &mut sink);
    assert_eq!(report.remote, Some(TransportOutcome::Sent(200)));
}

// ── Display content through the port ──────────────────────────

struct FrameProbe {
    frames: Vec<DisplayFrame>,
}

impl terrasense::app::ports::SensorPort for FrameProbe {
    fn acquire(&mut self) -> terrasense::reading::RawSample {
        terrasense::reading::RawSample {
            humidity_pct: 50.0,
            temperature_c: 21.0,
            vibration_adc: 820,
            pressure_adc: 2048,
            soil_adc: 1024,
            gas_adc: 300,
            gas_triggered: false,
        }
    }
}

impl terrasense::app::ports::ActuatorPort for FrameProbe {
    fn set_red(&mut self, _on: bool) {}
    fn set_green(&mut self, _on: bool) {}
    fn set_buzzer(&mut self, _on: bool) {}
    fn show_frame(&mut self, frame: &DisplayFrame) {
        self.frames.push(*frame);
    }
    fn all_off(&mut self) {}
}

#[test]
fn networked_display_frame_shows_link_state() {
    let config = networked_config();
    let wifi = WifiAdapter::new(&config).unwrap(); // link down
    let mut collector = HttpCollector::new(&config.collector_url);

    let mut service = MonitorService::new(config, 42);
    let mut probe = FrameProbe { frames: Vec::new() };
    let mut sink = CapturingSink::default();

    service.run_cycle(&mut probe, &wifi, &mut collector, &mut NoDelay, &mut sink);

    let frame = &probe.frames[0];
    assert_eq!(frame.banner, Banner::Optimal);
    assert_eq!(frame.link_up, Some(false));
    assert_eq!(frame.humidity_pct, Some(50.0));
}
