//! Reactive two-motor line tracer.
//!
//! Bang-bang edge follower driven by one reflectance reading: on the line
//! it pivots left by powering only the right motor, off the line it pivots
//! right by powering only the left motor.  The porter therefore zig-zags
//! along the edge of the guide line.  No internal state.

use crate::fsm::context::ActuatorCommand;

/// Line tracer holding only the configured drive power.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineTracer {
    power: u8,
}

impl LineTracer {
    pub fn new(power_percent: u8) -> Self {
        Self {
            power: power_percent.min(100),
        }
    }

    /// Steering command for one control cycle.
    pub fn follow(&self, on_line: bool) -> ActuatorCommand {
        if on_line {
            // Turn left.
            ActuatorCommand::Drive {
                left: 0,
                right: self.power,
            }
        } else {
            // Turn right.
            ActuatorCommand::Drive {
                left: self.power,
                right: 0,
            }
        }
    }

    /// Stop both drive motors.
    pub fn halt(&self) -> ActuatorCommand {
        ActuatorCommand::StopMotors
    }

    pub fn power(&self) -> u8 {
        self.power
    }
}
