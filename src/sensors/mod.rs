//! Sensor subsystem — individual drivers and the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces one [`RawSample`] per
//! cycle. Conversion to physical units is a separate, pure step
//! ([`Reading::from_raw`](crate::reading::Reading::from_raw)) so the
//! substitution policies stay testable without hardware.

pub mod climate;
pub mod gas;
pub mod pressure;
pub mod soil;
pub mod vibration;

use crate::pins::PinMap;
use crate::reading::RawSample;
use climate::ClimateSensor;
use gas::GasSensor;
use pressure::PressureSensor;
use soil::SoilSensor;
use vibration::VibrationSensor;

/// Aggregates all sensor drivers and produces one raw sample per cycle.
pub struct SensorHub {
    climate: ClimateSensor,
    vibration: VibrationSensor,
    pressure: PressureSensor,
    soil: SoilSensor,
    gas: GasSensor,
}

impl SensorHub {
    /// Construct every driver from the resolved pin map.
    pub fn new(pins: &PinMap) -> Self {
        Self {
            climate: ClimateSensor::new(pins.dht_gpio),
            vibration: VibrationSensor::new(pins.vibration_adc_gpio),
            pressure: PressureSensor::new(pins.pressure_adc_gpio),
            soil: SoilSensor::new(pins.soil_adc_gpio),
            gas: GasSensor::new(pins.gas_digital_gpio, pins.gas_adc_gpio),
        }
    }

    /// Read every channel once.
    ///
    /// This never fails: a bad DHT11 read surfaces as NaN climate fields
    /// and is substituted during conversion.
    pub fn acquire(&mut self) -> RawSample {
        let climate = self.climate.read();
        let gas = self.gas.read();

        RawSample {
            humidity_pct: climate.humidity_pct,
            temperature_c: climate.temperature_c,
            vibration_adc: self.vibration.read(),
            pressure_adc: self.pressure.read(),
            soil_adc: self.soil.read(),
            gas_adc: gas.adc,
            gas_triggered: gas.triggered,
        }
    }
}
