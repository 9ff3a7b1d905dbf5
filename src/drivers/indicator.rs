//! Red/green indicator LED pair driver.
//!
//! Two discrete LEDs on plain GPIO outputs: red = hazard, green = all
//! clear. Levels are rewritten every cycle, so the driver just mirrors
//! the last commanded state.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO levels via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct IndicatorLeds {
    red_gpio: i32,
    green_gpio: i32,
    current: (bool, bool),
}

impl IndicatorLeds {
    pub fn new(red_gpio: i32, green_gpio: i32) -> Self {
        Self {
            red_gpio,
            green_gpio,
            current: (false, false),
        }
    }

    pub fn set_red(&mut self, on: bool) {
        hw_init::gpio_write(self.red_gpio, on);
        self.current.0 = on;
    }

    pub fn set_green(&mut self, on: bool) {
        hw_init::gpio_write(self.green_gpio, on);
        self.current.1 = on;
    }

    pub fn off(&mut self) {
        self.set_red(false);
        self.set_green(false);
    }

    /// Last commanded (red, green) levels.
    pub fn current(&self) -> (bool, bool) {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrors_last_commanded_levels() {
        let mut leds = IndicatorLeds::new(25, 26);
        assert_eq!(leds.current(), (false, false));
        leds.set_red(true);
        leds.set_green(false);
        assert_eq!(leds.current(), (true, false));
    }

    #[test]
    fn off_clears_both() {
        let mut leds = IndicatorLeds::new(25, 26);
        leds.set_red(true);
        leds.set_green(true);
        leds.off();
        assert_eq!(leds.current(), (false, false));
    }
}
