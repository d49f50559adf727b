//! Actuator drivers over `embedded_hal` traits.

pub mod horn;
pub mod motor;
