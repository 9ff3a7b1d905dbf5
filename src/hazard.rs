//! Hazard evaluation.
//!
//! A pure predicate over one [`Reading`]: any single threshold breach is
//! sufficient to raise a hazard, with no weighting, hysteresis or memory
//! of previous cycles. The evaluator is re-run from scratch every cycle
//! and the actuator layer re-applies the full output state, so there is
//! deliberately no edge-triggered logic here.

use crate::config::MonitorConfig;
use crate::reading::Reading;

/// Binary hazard classification for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertState {
    Normal,
    Hazard,
}

impl AlertState {
    pub fn is_hazard(self) -> bool {
        self == Self::Hazard
    }
}

/// Stateless evaluator carrying the configured thresholds.
pub struct HazardEvaluator {
    temperature_alert_c: f32,
    vibration_alert_level: f32,
}

impl HazardEvaluator {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            temperature_alert_c: config.temperature_alert_c,
            vibration_alert_level: config.vibration_alert_level,
        }
    }

    /// HAZARD iff gas is detected OR temperature exceeds the threshold
    /// OR vibration exceeds the threshold. Comparisons are strict: a
    /// reading exactly at a boundary is NORMAL.
    pub fn evaluate(&self, reading: &Reading) -> AlertState {
        if reading.gas_triggered
            || reading.temperature_c > self.temperature_alert_c
            || reading.vibration > self.vibration_alert_level
        {
            AlertState::Hazard
        } else {
            AlertState::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_reading() -> Reading {
        Reading {
            temperature_c: 21.0,
            humidity_pct: 50.0,
            pressure_hpa: 1000.0,
            vibration: 1.0,
            soil_moisture: 0.3,
            pm2_5: 15.0,
            gas_triggered: false,
            gas_raw: 250,
        }
    }

    fn evaluator() -> HazardEvaluator {
        HazardEvaluator::new(&MonitorConfig::default())
    }

    #[test]
    fn quiet_reading_is_normal() {
        assert_eq!(evaluator().evaluate(&quiet_reading()), AlertState::Normal);
    }

    #[test]
    fn gas_alone_raises_hazard() {
        let mut r = quiet_reading();
        r.gas_triggered = true;
        assert_eq!(evaluator().evaluate(&r), AlertState::Hazard);
    }

    #[test]
    fn temperature_alone_raises_hazard() {
        let mut r = quiet_reading();
        r.temperature_c = 60.0;
        assert_eq!(evaluator().evaluate(&r), AlertState::Hazard);
    }

    #[test]
    fn vibration_alone_raises_hazard() {
        let mut r = quiet_reading();
        r.vibration = 8.5;
        assert_eq!(evaluator().evaluate(&r), AlertState::Hazard);
    }

    #[test]
    fn boundary_values_stay_normal() {
        let mut r = quiet_reading();
        r.temperature_c = 50.0;
        assert_eq!(evaluator().evaluate(&r), AlertState::Normal);

        let mut r = quiet_reading();
        r.vibration = 8.0;
        assert_eq!(evaluator().evaluate(&r), AlertState::Normal);
    }

    #[test]
    fn just_past_boundary_is_hazard() {
        let mut r = quiet_reading();
        r.temperature_c = 50.0 + 1e-3;
        assert_eq!(evaluator().evaluate(&r), AlertState::Hazard);

        let mut r = quiet_reading();
        r.vibration = 8.0 + 1e-3;
        assert_eq!(evaluator().evaluate(&r), AlertState::Hazard);
    }
}
