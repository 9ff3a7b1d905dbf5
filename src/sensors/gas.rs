//! MQ-2 combustible-gas sensor driver.
//!
//! The module exposes two channels: an on-board comparator output
//! (DO, **active-low** — 0 means gas above the trim-pot threshold) and
//! the raw heater-divider voltage (AO). The comparator drives the
//! hazard predicate; the raw count is kept for the networked telemetry
//! record only and is never converted.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the DO pin level and the ADC1 channel.
//! On host/test: reads from static atomics for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_GAS_TRIGGERED: AtomicBool = AtomicBool::new(false);
#[cfg(not(target_os = "espidf"))]
static SIM_GAS_ADC: AtomicU16 = AtomicU16::new(300);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_gas(triggered: bool, adc: u16) {
    SIM_GAS_TRIGGERED.store(triggered, Ordering::Relaxed);
    SIM_GAS_ADC.store(adc, Ordering::Relaxed);
}

/// One raw gas read.
#[derive(Debug, Clone, Copy)]
pub struct GasRaw {
    /// Comparator state, normalised: `true` = gas detected.
    pub triggered: bool,
    /// Raw 12-bit ADC count from the analog output.
    pub adc: u16,
}

pub struct GasSensor {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    digital_gpio: i32,
    _adc_gpio: i32,
}

impl GasSensor {
    pub fn new(digital_gpio: i32, adc_gpio: i32) -> Self {
        Self {
            digital_gpio,
            _adc_gpio: adc_gpio,
        }
    }

    pub fn read(&self) -> GasRaw {
        GasRaw {
            triggered: self.read_digital(),
            adc: self.read_adc(),
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_digital(&self) -> bool {
        // DO is active-low: a low pin level means the comparator tripped.
        !hw_init::gpio_read(self.digital_gpio)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_digital(&self) -> bool {
        SIM_GAS_TRIGGERED.load(Ordering::Relaxed)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(pins::ADC1_CH_GAS)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_GAS_ADC.load(Ordering::Relaxed)
    }
}
