//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`]. This is the only module
//! in the system that touches actual hardware. On non-espidf targets,
//! the underlying drivers use cfg-gated simulation stubs.

use crate::actuators::DisplayFrame;
use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::buzzer::Buzzer;
use crate::drivers::display::StatusDisplay;
use crate::drivers::indicator::IndicatorLeds;
use crate::reading::RawSample;
use crate::sensors::SensorHub;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensor_hub: SensorHub,
    leds: IndicatorLeds,
    buzzer: Buzzer,
    display: StatusDisplay,
}

impl HardwareAdapter {
    pub fn new(
        sensor_hub: SensorHub,
        leds: IndicatorLeds,
        buzzer: Buzzer,
        display: StatusDisplay,
    ) -> Self {
        Self {
            sensor_hub,
            leds,
            buzzer,
            display,
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn acquire(&mut self) -> RawSample {
        self.sensor_hub.acquire()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_red(&mut self, on: bool) {
        self.leds.set_red(on);
    }

    fn set_green(&mut self, on: bool) {
        self.leds.set_green(on);
    }

    fn set_buzzer(&mut self, on: bool) {
        self.buzzer.set(on);
    }

    fn show_frame(&mut self, frame: &DisplayFrame) {
        self.display.render(frame);
    }

    fn all_off(&mut self) {
        self.leds.off();
        self.buzzer.set(false);
    }
}
