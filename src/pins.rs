//! GPIO / peripheral pin assignments for the TerraSense main board.
//!
//! Single source of truth — resolved once at startup into a [`PinMap`]
//! that gets injected into the hardware layer. Drivers never hard-code
//! pin numbers; change an assignment here and it propagates everywhere.
//!
/// Complete pin assignment for one board revision.
///
/// Built once in `main()` (or a test harness) and passed by reference
/// into `hw_init` and the drivers.
#[derive(Debug, Clone, Copy)]
pub struct PinMap {
    // --- Sensors: analog (ADC1) ---
    /// SW-420 vibration module — analog voltage output.
    pub vibration_adc_gpio: i32,
    /// MPX-series pressure transducer — analog output via divider.
    pub pressure_adc_gpio: i32,
    /// Resistive soil/water probe — analog output.
    pub soil_adc_gpio: i32,
    /// MQ-2 gas sensor — analog output (AO pin).
    pub gas_adc_gpio: i32,

    // --- Sensors: digital ---
    /// DHT11 humidity/temperature — single-wire data pin.
    pub dht_gpio: i32,
    /// MQ-2 gas sensor — digital comparator output (DO pin, active-low).
    pub gas_digital_gpio: i32,

    // --- Actuators ---
    /// Red hazard indicator LED (active HIGH).
    pub led_red_gpio: i32,
    /// Green all-clear indicator LED (active HIGH).
    pub led_green_gpio: i32,
    /// Piezo buzzer (active HIGH).
    pub buzzer_gpio: i32,

    // --- I2C bus (SSD1306 status display) ---
    pub i2c_sda_gpio: i32,
    pub i2c_scl_gpio: i32,
}

impl PinMap {
    /// Pin map for the ESP32 DevKit rev C carrier board.
    pub const fn esp32_devkit() -> Self {
        Self {
            vibration_adc_gpio: 34,
            pressure_adc_gpio: 35,
            soil_adc_gpio: 32,
            gas_adc_gpio: 33,
            dht_gpio: 4,
            gas_digital_gpio: 27,
            led_red_gpio: 23,
            led_green_gpio: 18,
            buzzer_gpio: 13,
            i2c_sda_gpio: 21,
            i2c_scl_gpio: 22,
        }
    }
}

impl Default for PinMap {
    fn default() -> Self {
        Self::esp32_devkit()
    }
}

// ---------------------------------------------------------------------------
// ADC channel mapping (ESP32 ADC1, 12-bit)
// ---------------------------------------------------------------------------

/// ADC1 channel for the vibration sensor (GPIO 34).
pub const ADC1_CH_VIBRATION: u32 = 6;
/// ADC1 channel for the pressure sensor (GPIO 35).
pub const ADC1_CH_PRESSURE: u32 = 7;
/// ADC1 channel for the soil probe (GPIO 32).
pub const ADC1_CH_SOIL: u32 = 4;
/// ADC1 channel for the MQ-2 analog output (GPIO 33).
pub const ADC1_CH_GAS: u32 = 5;

/// SSD1306 I2C address (0x3C for 128x64 modules).
pub const DISPLAY_I2C_ADDR: u8 = 0x3C;
