//! Actuator output layer.
//!
//! Rather than mutating pins incrementally, the controller computes the
//! complete target [`ActuatorState`] for the cycle from the alert state
//! and the current reading, then applies it through the port. Repeated
//! applications of the same state converge to the same physical output,
//! so a cycle can always re-apply unconditionally.
//!
//! The hazard buzzer pulse is a *blocking* sub-step of `apply`: buzzer
//! on, hold, off, hold — two short fixed delays inside the cycle, per
//! the alarm cadence the monitor has always had. It is not a background
//! effect.

use crate::config::{MonitorConfig, Variant};
use crate::hazard::AlertState;
use crate::reading::Reading;

use crate::app::ports::{ActuatorPort, DelayPort};

// ---------------------------------------------------------------------------
// Display frame
// ---------------------------------------------------------------------------

/// Banner shown on the top half of the status display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Optimal,
    Danger,
}

/// Complete content of the status display for one cycle.
///
/// Semantic, not pixel-level: the display driver owns the rendering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayFrame {
    pub banner: Banner,
    /// Current temperature, shown under the OPTIMAL banner.
    pub temperature_c: Option<f32>,
    /// Current humidity, shown on networked nodes under OPTIMAL.
    pub humidity_pct: Option<f32>,
    /// Link status line, networked nodes only.
    pub link_up: Option<bool>,
}

/// Descriptive tag shown under the DANGER banner.
pub const DANGER_TAG: &str = "GAS/TEMP CRITICAL";

// ---------------------------------------------------------------------------
// ActuatorState
// ---------------------------------------------------------------------------

/// Full target output state for one cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActuatorState {
    pub red: bool,
    pub green: bool,
    /// Whether this cycle's output phase includes one buzzer pulse.
    pub buzzer_pulse: bool,
    pub frame: DisplayFrame,
}

// ---------------------------------------------------------------------------
// ActuatorController
// ---------------------------------------------------------------------------

/// Two-state output machine, re-evaluated fully every cycle.
///
/// Entry and exit actions are identical to the steady-state actions, so
/// there is no transition tracking at all.
pub struct ActuatorController {
    variant: Variant,
    buzzer_pulse_ms: u32,
}

impl ActuatorController {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            variant: config.variant,
            buzzer_pulse_ms: config.buzzer_pulse_ms,
        }
    }

    /// Compute the complete target state for this cycle.
    ///
    /// `link_up` is only shown on networked nodes; standalone nodes
    /// ignore it.
    pub fn target(
        &self,
        alert: AlertState,
        reading: &Reading,
        link_up: Option<bool>,
    ) -> ActuatorState {
        let link = match self.variant {
            Variant::Networked => link_up,
            Variant::Standalone => None,
        };

        match alert {
            AlertState::Normal => ActuatorState {
                red: false,
                green: true,
                buzzer_pulse: false,
                frame: DisplayFrame {
                    banner: Banner::Optimal,
                    temperature_c: Some(reading.temperature_c),
                    humidity_pct: match self.variant {
                        Variant::Networked => Some(reading.humidity_pct),
                        Variant::Standalone => None,
                    },
                    link_up: link,
                },
            },
            AlertState::Hazard => ActuatorState {
                red: true,
                green: false,
                buzzer_pulse: true,
                frame: DisplayFrame {
                    banner: Banner::Danger,
                    temperature_c: None,
                    humidity_pct: None,
                    link_up: link,
                },
            },
        }
    }

    /// Apply a target state through the actuator port.
    ///
    /// Blocking: when the state carries a buzzer pulse, this holds the
    /// cycle for two `buzzer_pulse_ms` delays before returning.
    pub fn apply(
        &self,
        state: &ActuatorState,
        hw: &mut impl ActuatorPort,
        delay: &mut impl DelayPort,
    ) {
        hw.set_red(state.red);
        hw.set_green(state.green);
        hw.show_frame(&state.frame);

        if state.buzzer_pulse {
            hw.set_buzzer(true);
            delay.delay_ms(self.buzzer_pulse_ms);
            hw.set_buzzer(false);
            delay.delay_ms(self.buzzer_pulse_ms);
        } else {
            hw.set_buzzer(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MonitorConfig;

    struct RecordedHw {
        red: Option<bool>,
        green: Option<bool>,
        buzzer_levels: Vec<bool>,
        frames: Vec<DisplayFrame>,
    }

    impl RecordedHw {
        fn new() -> Self {
            Self {
                red: None,
                green: None,
                buzzer_levels: Vec::new(),
                frames: Vec::new(),
            }
        }
    }

    impl ActuatorPort for RecordedHw {
        fn set_red(&mut self, on: bool) {
            self.red = Some(on);
        }
        fn set_green(&mut self, on: bool) {
            self.green = Some(on);
        }
        fn set_buzzer(&mut self, on: bool) {
            self.buzzer_levels.push(on);
        }
        fn show_frame(&mut self, frame: &DisplayFrame) {
            self.frames.push(*frame);
        }
        fn all_off(&mut self) {}
    }

    struct RecordedDelay(Vec<u32>);
    impl DelayPort for RecordedDelay {
        fn delay_ms(&mut self, ms: u32) {
            self.0.push(ms);
        }
    }

    fn reading() -> Reading {
        Reading {
            temperature_c: 22.0,
            humidity_pct: 48.0,
            pressure_hpa: 1005.0,
            vibration: 1.2,
            soil_moisture: 0.4,
            pm2_5: 15.0,
            gas_triggered: false,
            gas_raw: 280,
        }
    }

    #[test]
    fn normal_state_green_on_red_off_no_pulse() {
        let ctl = ActuatorController::new(&MonitorConfig::default());
        let state = ctl.target(AlertState::Normal, &reading(), None);
        assert!(!state.red && state.green && !state.buzzer_pulse);
        assert_eq!(state.frame.banner, Banner::Optimal);
        assert_eq!(state.frame.temperature_c, Some(22.0));
        // Standalone nodes show neither humidity nor link status.
        assert_eq!(state.frame.humidity_pct, None);
        assert_eq!(state.frame.link_up, None);
    }

    #[test]
    fn hazard_state_red_on_green_off_with_pulse() {
        let ctl = ActuatorController::new(&MonitorConfig::default());
        let state = ctl.target(AlertState::Hazard, &reading(), None);
        assert!(state.red && !state.green && state.buzzer_pulse);
        assert_eq!(state.frame.banner, Banner::Danger);
    }

    #[test]
    fn networked_normal_frame_carries_humidity_and_link() {
        let mut config = MonitorConfig::default();
        config.variant = Variant::Networked;
        let ctl = ActuatorController::new(&config);
        let state = ctl.target(AlertState::Normal, &reading(), Some(true));
        assert_eq!(state.frame.humidity_pct, Some(48.0));
        assert_eq!(state.frame.link_up, Some(true));
    }

    #[test]
    fn apply_pulses_buzzer_once_with_two_delays() {
        let ctl = ActuatorController::new(&MonitorConfig::default());
        let state = ctl.target(AlertState::Hazard, &reading(), None);
        let mut hw = RecordedHw::new();
        let mut delay = RecordedDelay(Vec::new());
        ctl.apply(&state, &mut hw, &mut delay);
        assert_eq!(hw.buzzer_levels, vec![true, false]);
        assert_eq!(delay.0, vec![100, 100]);
    }

    #[test]
    fn apply_is_idempotent() {
        let ctl = ActuatorController::new(&MonitorConfig::default());
        let state = ctl.target(AlertState::Normal, &reading(), None);
        let mut hw = RecordedHw::new();
        let mut delay = RecordedDelay(Vec::new());
        ctl.apply(&state, &mut hw, &mut delay);
        ctl.apply(&state, &mut hw, &mut delay);
        assert_eq!(hw.red, Some(false));
        assert_eq!(hw.green, Some(true));
        // Buzzer is rewritten off each application, never pulsed.
        assert_eq!(hw.buzzer_levels, vec![false, false]);
        assert!(delay.0.is_empty());
        assert_eq!(hw.frames[0], hw.frames[1]);
    }
}
