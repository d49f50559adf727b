//! Porter configuration parameters
//!
//! All tunable parameters for the porter controller.
//! Loaded once at startup through a [`ConfigPort`](crate::app::ports::ConfigPort)
//! source and never mutated by the controller.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Core porter configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PorterConfig {
    // --- Drive ---
    /// Power applied to the driven motor while steering (1-100%)
    pub drive_power_percent: u8,

    // --- Sensor thresholds ---
    /// Reflectance reading strictly below this value means "on the line"
    pub reflectance_threshold: u8,
    /// Distance reading (cm) strictly below this value means "wall detected"
    pub wall_distance_threshold_cm: u16,

    // --- Wait durations (in time units) ---
    /// Length of one time unit (milliseconds)
    pub time_unit_ms: u32,
    /// Wait for an operator instruction before sounding a reminder
    pub instruction_wait_units: u16,
    /// Minimum travel before the wall may stop a transport or reposition run
    pub transit_min_units: u16,
    /// Grace period for a passenger to sit back down mid-transport
    pub fallen_grace_units: u16,
    /// Hold-off after a manual conflict before driving resumes
    pub conflict_resolve_units: u16,

    // --- Timing ---
    /// Control loop interval used by the host scheduler (milliseconds)
    pub control_loop_interval_ms: u32,
}

impl Default for PorterConfig {
    fn default() -> Self {
        Self {
            // Drive
            drive_power_percent: 20,

            // Thresholds
            reflectance_threshold: 20,
            wall_distance_threshold_cm: 10,

            // Waits
            time_unit_ms: 1000, // 1 s
            instruction_wait_units: 5,
            transit_min_units: 3,
            fallen_grace_units: 5,
            conflict_resolve_units: 5,

            // Timing
            control_loop_interval_ms: 10, // 100 Hz
        }
    }
}

impl PorterConfig {
    /// Scale a duration expressed in time units to milliseconds.
    pub fn units_to_ms(&self, units: u16) -> u32 {
        self.time_unit_ms.saturating_mul(units as u32)
    }

    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.drive_power_percent == 0 || self.drive_power_percent > 100 {
            return Err(ConfigError::ValidationFailed(
                "drive_power_percent must be 1-100",
            ));
        }
        if self.reflectance_threshold > 100 {
            return Err(ConfigError::ValidationFailed(
                "reflectance_threshold must be 0-100",
            ));
        }
        if self.time_unit_ms == 0 {
            return Err(ConfigError::ValidationFailed("time_unit_ms must be > 0"));
        }
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "control_loop_interval_ms must be > 0",
            ));
        }
        Ok(())
    }
}
