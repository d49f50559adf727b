//! Drive motor driver.
//!
//! One side of the differential drive, controlled through any
//! `embedded_hal` PWM channel.  Power is a percentage (0–100); zero is
//! the same as [`DriveMotor::stop`].
//!
//! The driver is a dumb actuator: it tracks what it last commanded and
//! reports write failures, nothing more.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::{ActuatorError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Stopped,
    Running { power: u8 },
}

pub struct DriveMotor<P> {
    pwm: P,
    state: MotorState,
}

impl<P: SetDutyCycle> DriveMotor<P> {
    pub fn new(pwm: P) -> Self {
        Self {
            pwm,
            state: MotorState::Stopped,
        }
    }

    pub fn set_power(&mut self, power: u8) -> Result<()> {
        let power = power.min(100);
        if power == 0 {
            return self.stop();
        }
        self.pwm
            .set_duty_cycle_percent(power)
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.state = MotorState::Running { power };
        Ok(())
    }

    pub fn stop(&mut self) -> Result<()> {
        self.pwm
            .set_duty_cycle_fully_off()
            .map_err(|_| ActuatorError::PwmWriteFailed)?;
        self.state = MotorState::Stopped;
        Ok(())
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        !matches!(self.state, MotorState::Stopped)
    }

    pub fn power(&self) -> u8 {
        match self.state {
            MotorState::Stopped => 0,
            MotorState::Running { power } => power,
        }
    }
}
