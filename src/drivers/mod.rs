//! Hardware drivers: one-shot peripheral bring-up plus the actuator
//! and display drivers. All real hardware access is cfg-gated to the
//! `espidf` target; host builds get in-memory simulation behaviour.

pub mod buzzer;
pub mod display;
pub mod hw_init;
pub mod indicator;
