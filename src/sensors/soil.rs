//! Resistive soil/water moisture probe driver.
//!
//! Two-electrode probe read through a voltage divider; higher counts
//! mean wetter soil. The conversion step maps the raw count onto a
//! [0, 1] moisture fraction.
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
static SIM_SOIL_ADC: AtomicU16 = AtomicU16::new(1024);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_soil_adc(raw: u16) {
    SIM_SOIL_ADC.store(raw, Ordering::Relaxed);
}

pub struct SoilSensor {
    _adc_gpio: i32,
}

impl SoilSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self { _adc_gpio: adc_gpio }
    }

    /// Raw 12-bit ADC count (0..=4095).
    pub fn read(&self) -> u16 {
        self.read_adc()
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(pins::ADC1_CH_SOIL)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_SOIL_ADC.load(Ordering::Relaxed)
    }
}
