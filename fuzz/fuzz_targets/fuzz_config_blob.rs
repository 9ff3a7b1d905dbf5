//! Fuzz target: NVS config blob decoding
//!
//! The config store deserializes a postcard blob straight out of flash,
//! so the decoder sees whatever bytes a torn write or a downgrade left
//! behind. Drives arbitrary byte sequences through the decode path and
//! verifies:
//! - No panics for any input
//! - A blob that decodes still has to pass `validate()` before it can
//!   be trusted, and a validated config always reports a non-zero cycle
//! - A decoded-and-valid config survives a re-encode/decode round trip
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use terrasense::config::MonitorConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = postcard::from_bytes::<MonitorConfig>(data) else {
        return;
    };

    // Decoding is not trusting: validation must be total over whatever
    // postcard accepted.
    if config.validate().is_err() {
        return;
    }

    assert!(config.cycle_ms() > 0, "valid config with a zero cycle");
    assert!(
        config.buzzer_pulse_ms <= config.cycle_ms(),
        "valid config with a pulse longer than the cycle"
    );

    let bytes = postcard::to_allocvec(&config).expect("re-encode of a valid config");
    let again: MonitorConfig =
        postcard::from_bytes(&bytes).expect("decode of a just-encoded config");
    assert_eq!(again.variant, config.variant);
    assert_eq!(again.cycle_ms(), config.cycle_ms());
    assert!(again.validate().is_ok(), "round trip lost validity");
});
