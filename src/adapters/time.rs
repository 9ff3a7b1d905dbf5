//! Delay and entropy adapter.
//!
//! - **`target_os = "espidf"`** — delays go through the FreeRTOS
//!   scheduler so the idle task (and the watchdog it feeds) keeps
//!   running; the substitution-RNG seed comes from the hardware RNG.
//! - **all other targets** — `std::thread::sleep` and a clock-derived
//!   seed for host-side runs.

use crate::app::ports::DelayPort;

/// Blocking delay through the platform scheduler.
pub struct SystemDelay;

impl Default for SystemDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemDelay {
    pub fn new() -> Self {
        Self
    }
}

impl DelayPort for SystemDelay {
    #[cfg(target_os = "espidf")]
    fn delay_ms(&mut self, ms: u32) {
        esp_idf_hal::delay::FreeRtos::delay_ms(ms);
    }

    #[cfg(not(target_os = "espidf"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(ms as u64));
    }
}

/// One boot-time seed for the simulated-value generator.
#[cfg(target_os = "espidf")]
pub fn entropy_seed() -> u32 {
    // SAFETY: esp_random is callable any time after system init; with
    // WiFi or Bluetooth running it is a true hardware RNG.
    unsafe { esp_idf_svc::sys::esp_random() }
}

/// One boot-time seed for the simulated-value generator.
#[cfg(not(target_os = "espidf"))]
pub fn entropy_seed() -> u32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1)
}
