//! Analog pressure transducer driver (MPX-series, 0.2-4.7 V output).
//!
//! The transducer output is divided down into the ADC range; the
//! conversion step rescales the raw count onto [900, 1100] hPa.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the ADC1 channel via the oneshot API.
//! On host/test: reads from a static AtomicU16 for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_PRESSURE_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_pressure_adc(raw: u16) {
    SIM_PRESSURE_ADC.store(raw, Ordering::Relaxed);
}

pub struct PressureSensor {
    _adc_gpio: i32,
}

impl PressureSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self { _adc_gpio: adc_gpio }
    }

    /// Raw 12-bit ADC count (0..=4095).
    pub fn read(&self) -> u16 {
        self.read_adc()
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(pins::ADC1_CH_PRESSURE)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_PRESSURE_ADC.load(Ordering::Relaxed)
    }
}
