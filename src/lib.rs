//! TerraSense environmental hazard monitor.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module, so the full
//! pipeline — acquisition, hazard evaluation, actuation, telemetry —
//! runs on the host under simulated sensors.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod hazard;
pub mod reading;
pub mod telemetry;

pub mod error;
pub mod pins;

// Hardware-facing modules; the actual peripheral access inside is
// guarded by cfg attributes, host builds get the simulation stubs.
pub mod actuators;
pub mod adapters;
pub mod drivers;
pub mod sensors;
