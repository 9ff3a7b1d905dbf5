//! SW-420 vibration module driver.
//!
//! The module's analog output rides on a spring-contact sensor, so the
//! raw count is noisy by nature; smoothing and rescaling to the [0, 10]
//! scale happen in the conversion step, not here.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads the ADC1 channel via the oneshot API (initialised
//! by hw_init). On host/test: reads from a static AtomicU16 for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

#[cfg(not(target_os = "espidf"))]
static SIM_VIBRATION_ADC: AtomicU16 = AtomicU16::new(820);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_vibration_adc(raw: u16) {
    SIM_VIBRATION_ADC.store(raw, Ordering::Relaxed);
}

pub struct VibrationSensor {
    _adc_gpio: i32,
}

impl VibrationSensor {
    pub fn new(adc_gpio: i32) -> Self {
        Self { _adc_gpio: adc_gpio }
    }

    /// Raw 12-bit ADC count (0..=4095).
    pub fn read(&self) -> u16 {
        self.read_adc()
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> u16 {
        hw_init::adc1_read(pins::ADC1_CH_VIBRATION)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> u16 {
        SIM_VIBRATION_ADC.load(Ordering::Relaxed)
    }
}
