//! Piezo buzzer driver.
//!
//! Single GPIO, active HIGH. Pulse cadence (hold/release timing) is the
//! actuator controller's job — this driver only sets the level.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the real GPIO level via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct Buzzer {
    gpio: i32,
    on: bool,
}

impl Buzzer {
    pub fn new(gpio: i32) -> Self {
        Self { gpio, on: false }
    }

    pub fn set(&mut self, on: bool) {
        hw_init::gpio_write(self.gpio, on);
        self.on = on;
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
