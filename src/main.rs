//! TerraSense firmware — main entry point.
//!
//! Hexagonal layout: drivers and network services live in adapters on
//! the outer ring, the monitor core sees only port traits.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  HardwareAdapter   LogEventSink   NvsConfigStore         │
//! │  (Sensor+Actuator) (EventSink)    (ConfigPort)           │
//! │  WifiAdapter       HttpCollector  SystemDelay            │
//! │  (Link)            (Collector)    (Delay)                │
//! │                                                          │
//! │  ────────────── Port Trait Boundary ──────────────       │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │         MonitorService (pure logic)            │      │
//! │  │  conversion · hazard predicate · telemetry     │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```

#![deny(unused_must_use)]

use anyhow::Result;
use log::{error, info, warn};

use terrasense::adapters::collector::HttpCollector;
use terrasense::adapters::hardware::HardwareAdapter;
use terrasense::adapters::log_sink::LogEventSink;
use terrasense::adapters::nvs::NvsConfigStore;
use terrasense::adapters::time::{entropy_seed, SystemDelay};
use terrasense::adapters::wifi::{ConnectivityPort, WifiAdapter};
use terrasense::app::ports::{ActuatorPort, ConfigPort, DelayPort, NoLink};
use terrasense::app::service::MonitorService;
use terrasense::config::{MonitorConfig, Variant};
use terrasense::drivers::buzzer::Buzzer;
use terrasense::drivers::display::StatusDisplay;
use terrasense::drivers::hw_init;
use terrasense::drivers::indicator::IndicatorLeds;
use terrasense::pins::PinMap;
use terrasense::sensors::SensorHub;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("TerraSense v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let config = load_config();
    info!(
        "Config: variant={:?} cycle={}ms T_alert={}C vib_alert={}",
        config.variant,
        config.cycle_ms(),
        config.temperature_alert_c,
        config.vibration_alert_level
    );

    // ── 3. Initialise hardware peripherals ────────────────────
    let pins = PinMap::esp32_devkit();
    let mut hw = match init_hardware(&pins) {
        Ok(hw) => hw,
        Err(e) => {
            // Peripheral init failure is critical: without working GPIO
            // the hazard outputs cannot be driven. Log and halt; the
            // watchdog resets the node after timeout.
            error!("peripheral init failed: {e} — halting");
            #[allow(clippy::empty_loop)]
            loop {}
        }
    };
    let mut sink = LogEventSink::new();
    let mut delay = SystemDelay::new();

    let mut service = MonitorService::new(config.clone(), entropy_seed());
    service.start(&mut sink);

    let cycle_ms = service.cycle_ms();

    // ── 4. Variant-specific loop ──────────────────────────────
    match config.variant {
        Variant::Standalone => loop {
            service.run_cycle(&mut hw, &NoLink, &mut NoLink, &mut delay, &mut sink);
            delay.delay_ms(cycle_ms);
        },
        Variant::Networked => {
            let mut wifi = bring_up_wifi(&config)?;
            let mut collector = HttpCollector::new(&config.collector_url);

            loop {
                // Reconnects are advisory: a failed attempt backs off
                // and the cycle runs on regardless.
                wifi.poll();
                service.run_cycle(&mut hw, &wifi, &mut collector, &mut delay, &mut sink);
                delay.delay_ms(cycle_ms);
            }
        }
    }
}

/// Bring up every peripheral and assemble the hardware adapter.
///
/// Display failure is tolerated — the monitor runs headless and the
/// LEDs and buzzer still signal the hazard state. Everything else is
/// fatal to the caller.
fn init_hardware(pins: &PinMap) -> terrasense::error::Result<HardwareAdapter> {
    hw_init::init_peripherals(pins)?;

    let sensor_hub = SensorHub::new(pins);
    let leds = IndicatorLeds::new(pins.led_red_gpio, pins.led_green_gpio);
    let buzzer = Buzzer::new(pins.buzzer_gpio);
    let mut display = StatusDisplay::new();
    if let Err(e) = display.init() {
        warn!("display init failed: {e} — continuing headless");
    }

    let mut hw = HardwareAdapter::new(sensor_hub, leds, buzzer, display);
    // Known-off baseline until the first cycle computes a real state.
    hw.all_off();
    Ok(hw)
}

/// Load persisted config, falling back to defaults when NVS or the
/// stored blob is unusable. The monitor must always come up.
fn load_config() -> MonitorConfig {
    let nvs = match NvsConfigStore::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({e}), running with defaults and no persistence");
            return MonitorConfig::default();
        }
    };
    match nvs.load() {
        Ok(cfg) => match cfg.validate() {
            Ok(()) => cfg,
            Err(e) => {
                warn!("stored config invalid ({e}), using defaults");
                MonitorConfig::default()
            }
        },
        Err(e) => {
            warn!("config load failed ({e}), using defaults");
            MonitorConfig::default()
        }
    }
}

/// Construct the WiFi driver and make the initial connection attempt.
///
/// A node that cannot reach its AP still monitors: the adapter is
/// returned in its backoff state and `poll()` keeps retrying from the
/// main loop.
fn bring_up_wifi(config: &MonitorConfig) -> terrasense::error::Result<WifiAdapter> {
    use esp_idf_hal::peripherals::Peripherals;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;
    use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

    use terrasense::error::{CommsError, Error};

    let peripherals =
        Peripherals::take().map_err(|_| Error::Init("modem peripheral unavailable"))?;
    let sysloop =
        EspSystemEventLoop::take().map_err(|_| Error::Init("system event loop unavailable"))?;
    let nvs_partition =
        EspDefaultNvsPartition::take().map_err(|_| Error::Init("NVS partition unavailable"))?;

    let driver = EspWifi::new(peripherals.modem, sysloop.clone(), Some(nvs_partition))
        .and_then(|wifi| BlockingWifi::wrap(wifi, sysloop))
        .map_err(|_| Error::Comms(CommsError::WifiConnectFailed))?;

    let mut wifi =
        WifiAdapter::new(driver, config).map_err(|e| Error::Comms(CommsError::from(e)))?;
    if let Err(e) = wifi.connect() {
        warn!("initial WiFi connect failed ({e}), continuing offline");
    }
    Ok(wifi)
}
