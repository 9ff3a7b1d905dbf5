//! DHT11 humidity/temperature sensor driver.
//!
//! Single-wire protocol bit-banged over an open-drain GPIO: a 20 ms
//! host start pulse, an 80/80 µs sensor response, then 40 data bits
//! whose high-phase duration encodes 0 or 1.
//!
//! A failed read (timeout or checksum mismatch) is reported as NaN in
//! both fields — the conversion step substitutes simulated nominal
//! values, so acquisition never fails from the caller's perspective.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: bit-bangs the data pin with busy-wait timing.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_BITS: AtomicU32 = AtomicU32::new(0x41A8_0000); // 21.0
#[cfg(not(target_os = "espidf"))]
static SIM_HUMIDITY_BITS: AtomicU32 = AtomicU32::new(0x4248_0000); // 50.0

/// Inject a climate reading for host-side tests.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_climate(temperature_c: f32, humidity_pct: f32) {
    SIM_TEMP_BITS.store(temperature_c.to_bits(), Ordering::Relaxed);
    SIM_HUMIDITY_BITS.store(humidity_pct.to_bits(), Ordering::Relaxed);
}

/// Simulate a failed DHT11 read (both fields NaN).
#[cfg(not(target_os = "espidf"))]
pub fn sim_fail_climate() {
    sim_set_climate(f32::NAN, f32::NAN);
}

/// One raw climate read. Either field is NaN when the read failed.
#[derive(Debug, Clone, Copy)]
pub struct ClimateRaw {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

pub struct ClimateSensor {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    gpio: i32,
}

impl ClimateSensor {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn read(&mut self) -> ClimateRaw {
        match self.read_raw() {
            Some((t, h)) => ClimateRaw {
                temperature_c: t,
                humidity_pct: h,
            },
            None => ClimateRaw {
                temperature_c: f32::NAN,
                humidity_pct: f32::NAN,
            },
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&self) -> Option<(f32, f32)> {
        let t = f32::from_bits(SIM_TEMP_BITS.load(Ordering::Relaxed));
        let h = f32::from_bits(SIM_HUMIDITY_BITS.load(Ordering::Relaxed));
        if t.is_nan() || h.is_nan() {
            None
        } else {
            Some((t, h))
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&self) -> Option<(f32, f32)> {
        use esp_idf_svc::sys::{esp_rom_delay_us, gpio_set_level};

        let pin = self.gpio;

        // SAFETY: pin was configured open-drain with pull-up in hw_init;
        // level writes/reads are register accesses from the main loop only.
        unsafe {
            // Host start: pull low >18 ms, then release.
            gpio_set_level(pin, 0);
            esp_rom_delay_us(20_000);
            gpio_set_level(pin, 1);
            esp_rom_delay_us(30);
        }

        // Sensor response: ~80 µs low, ~80 µs high.
        wait_level(pin, false, 100)?;
        wait_level(pin, true, 100)?;
        wait_level(pin, false, 100)?;

        // 40 data bits: 50 µs low preamble, then ~27 µs high = 0 / ~70 µs high = 1.
        let mut bytes = [0u8; 5];
        for i in 0..40 {
            wait_level(pin, true, 80)?;
            let high_us = wait_level(pin, false, 100)?;
            if high_us > 45 {
                bytes[i / 8] |= 1 << (7 - (i % 8));
            }
        }

        let sum = bytes[0]
            .wrapping_add(bytes[1])
            .wrapping_add(bytes[2])
            .wrapping_add(bytes[3]);
        if sum != bytes[4] {
            return None;
        }

        // DHT11 reports integer + tenths bytes.
        let humidity = bytes[0] as f32 + bytes[1] as f32 / 10.0;
        let temperature = bytes[2] as f32 + bytes[3] as f32 / 10.0;
        Some((temperature, humidity))
    }
}

/// Busy-wait until the pin reaches `level`, returning the elapsed time
/// in µs, or None after `timeout_us`.
#[cfg(target_os = "espidf")]
fn wait_level(pin: i32, level: bool, timeout_us: u32) -> Option<u32> {
    use esp_idf_svc::sys::{esp_rom_delay_us, gpio_get_level};
    let want = if level { 1 } else { 0 };
    let mut elapsed = 0u32;
    // SAFETY: register-level reads on a configured pin; 1 µs granularity
    // is adequate for the DHT11's 26-70 µs pulse discrimination.
    while unsafe { gpio_get_level(pin) } != want {
        if elapsed >= timeout_us {
            return None;
        }
        unsafe { esp_rom_delay_us(1) };
        elapsed += 1;
    }
    Some(elapsed)
}
