//! Domain types for one acquisition cycle.
//!
//! [`RawSample`] is the unconverted sensor output collected by the
//! `SensorHub`; [`Reading`] is the physical-unit snapshot derived from
//! exactly one sample. Both live for a single cycle and are never
//! persisted.
//!
//! The conversion step owns the two substitution policies:
//!
//! - a NaN climate read (DHT11 checksum failure or bus glitch) replaces
//!   **both** temperature and humidity with simulated nominal values;
//! - a vibration sample that rescales to exactly zero is replaced with a
//!   simulated low-level value so downstream consumers never see a
//!   suspicious flat zero.
//!
//! Neither substitution is an error — `Reading` construction is total
//! and every field of the result is finite. Substitutions are logged at
//! `debug!` so operators can spot a flaky sensor from the serial log.

use log::debug;

/// Full-scale value of the 12-bit ESP32 ADC.
pub const ADC_MAX: u16 = 4095;

/// Simulated climate fallback: temperature centre and half-spread (°C).
pub const SIM_TEMP_BASE_C: f32 = 25.0;
pub const SIM_TEMP_SPREAD_C: f32 = 1.0;
/// Simulated climate fallback: humidity centre and half-spread (%RH).
pub const SIM_HUMIDITY_BASE_PCT: f32 = 60.0;
pub const SIM_HUMIDITY_SPREAD_PCT: f32 = 2.0;

/// Substitution range for a degenerate-zero vibration reading: [0.5, 1.0).
pub const VIBRATION_FLOOR_LO: f32 = 0.5;
pub const VIBRATION_FLOOR_HI: f32 = 1.0;

/// Particulate proxy (µg/m³) reported while the MQ-2 comparator is tripped.
pub const PM25_TRIGGERED: f32 = 150.0;
/// Particulate proxy (µg/m³) reported while the gas channel is clear.
pub const PM25_CLEAR: f32 = 15.0;

// ---------------------------------------------------------------------------
// RawSample
// ---------------------------------------------------------------------------

/// One raw value per physical channel, as acquired by the `SensorHub`.
#[derive(Debug, Clone, Copy)]
pub struct RawSample {
    /// DHT11 humidity (%RH). NaN when the read failed.
    pub humidity_pct: f32,
    /// DHT11 temperature (°C). NaN when the read failed.
    pub temperature_c: f32,
    /// SW-420 vibration, raw ADC count (0..=4095).
    pub vibration_adc: u16,
    /// Pressure transducer, raw ADC count (0..=4095).
    pub pressure_adc: u16,
    /// Soil/water probe, raw ADC count (0..=4095).
    pub soil_adc: u16,
    /// MQ-2 analog output, raw ADC count (0..=4095).
    pub gas_adc: u16,
    /// MQ-2 digital comparator, already normalised from the active-low
    /// pin level: `true` = gas detected.
    pub gas_triggered: bool,
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Physical-unit sensor snapshot for one cycle.
///
/// Invariant: every float field is finite. Guaranteed by
/// [`Reading::from_raw`], which substitutes before construction.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    /// Temperature (°C).
    pub temperature_c: f32,
    /// Relative humidity (%).
    pub humidity_pct: f32,
    /// Barometric pressure (hPa), rescaled to [900, 1100].
    pub pressure_hpa: f32,
    /// Vibration on a unitless [0, 10] scale.
    pub vibration: f32,
    /// Soil moisture as a fraction in [0, 1].
    pub soil_moisture: f32,
    /// Particulate estimate (µg/m³ proxy): exactly 150.0 or 15.0.
    pub pm2_5: f32,
    /// Gas comparator state (`true` = detected).
    pub gas_triggered: bool,
    /// Raw MQ-2 ADC count, kept for the networked telemetry record.
    pub gas_raw: u16,
}

impl Reading {
    /// Convert one raw sample to physical units, applying the fallback
    /// and degenerate-zero substitution policies.
    pub fn from_raw(raw: &RawSample, rng: &mut SimRng) -> Self {
        let (temperature_c, humidity_pct) =
            if raw.temperature_c.is_nan() || raw.humidity_pct.is_nan() {
                let t = rng.next_in(
                    SIM_TEMP_BASE_C - SIM_TEMP_SPREAD_C,
                    SIM_TEMP_BASE_C + SIM_TEMP_SPREAD_C,
                );
                let h = rng.next_in(
                    SIM_HUMIDITY_BASE_PCT - SIM_HUMIDITY_SPREAD_PCT,
                    SIM_HUMIDITY_BASE_PCT + SIM_HUMIDITY_SPREAD_PCT,
                );
                debug!("climate read failed, substituting T={:.1}C H={:.1}%", t, h);
                (t, h)
            } else {
                (raw.temperature_c, raw.humidity_pct)
            };

        let mut vibration = rescale(raw.vibration_adc, 0.0, 10.0);
        if vibration == 0.0 {
            vibration = rng.next_in(VIBRATION_FLOOR_LO, VIBRATION_FLOOR_HI);
            debug!("vibration flat zero, substituting {:.2}", vibration);
        }

        let pressure_hpa = rescale(raw.pressure_adc, 900.0, 1100.0);
        let soil_moisture = rescale(raw.soil_adc, 0.0, 1.0);

        let pm2_5 = if raw.gas_triggered {
            PM25_TRIGGERED
        } else {
            PM25_CLEAR
        };

        Self {
            temperature_c,
            humidity_pct,
            pressure_hpa,
            vibration,
            soil_moisture,
            pm2_5,
            gas_triggered: raw.gas_triggered,
            gas_raw: raw.gas_adc,
        }
    }
}

/// Linear map from the full ADC input range onto `[lo, hi]`.
fn rescale(adc: u16, lo: f32, hi: f32) -> f32 {
    lo + (adc as f32 / ADC_MAX as f32) * (hi - lo)
}

// ---------------------------------------------------------------------------
// SimRng
// ---------------------------------------------------------------------------

/// Tiny xorshift32 generator for the substitution policies.
///
/// Fabricated fallback values only need to look plausible, not be
/// cryptographic; a 13/17/5 xorshift keeps the crate free of an RNG
/// dependency and stays deterministic under a fixed seed for tests.
/// On device the seed comes from `esp_random()` at boot.
#[derive(Debug, Clone)]
pub struct SimRng {
    state: u32,
}

impl SimRng {
    /// A zero seed would lock xorshift at zero forever, so it is
    /// remapped to an arbitrary non-zero constant.
    pub fn seeded(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform value in the half-open interval `[lo, hi)`.
    pub fn next_in(&mut self, lo: f32, hi: f32) -> f32 {
        // 24-bit mantissa worth of randomness keeps the division exact
        // enough that the result stays strictly below `hi`.
        let unit = (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32;
        lo + unit * (hi - lo)
    }
}
