//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorHub`] and all actuator drivers, exposing them
//! through [`SensorPort`] and [`ActuatorPort`].  This is the only
//! module in the system that touches actual hardware.
//!
//! Actuator failures are logged and the write is skipped; the control
//! loop keeps running.  The status display is the log: the title once
//! at startup and the state code whenever it changes.

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;
use log::{info, warn};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::drivers::horn::Horn;
use crate::drivers::motor::DriveMotor;
use crate::fsm::StateId;
use crate::fsm::context::{SensorSnapshot, Signal};
use crate::sensors::{DistanceSensor, ReflectanceSensor, SensorHub};

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<OCC, BMP, W, C, L, R, H> {
    sensor_hub: SensorHub<OCC, BMP, W, C>,
    left: DriveMotor<L>,
    right: DriveMotor<R>,
    horn: Horn<H>,
    displayed: Option<StateId>,
}

impl<OCC, BMP, W, C, L, R, H> HardwareAdapter<OCC, BMP, W, C, L, R, H>
where
    OCC: InputPin,
    BMP: InputPin,
    W: DistanceSensor,
    C: ReflectanceSensor,
    L: SetDutyCycle,
    R: SetDutyCycle,
    H: OutputPin,
{
    pub fn new(
        sensor_hub: SensorHub<OCC, BMP, W, C>,
        left: DriveMotor<L>,
        right: DriveMotor<R>,
        horn: Horn<H>,
    ) -> Self {
        Self {
            sensor_hub,
            left,
            right,
            horn,
            displayed: None,
        }
    }

    /// Advance the horn pattern.  Call from the host loop every cycle.
    pub fn poll(&mut self, delta_ms: u32) {
        if let Err(e) = self.horn.poll(delta_ms) {
            warn!("horn: {}", e);
        }
    }

    pub fn left_motor(&self) -> &DriveMotor<L> {
        &self.left
    }

    pub fn right_motor(&self) -> &DriveMotor<R> {
        &self.right
    }

    pub fn horn(&self) -> &Horn<H> {
        &self.horn
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<OCC, BMP, W, C, L, R, H> SensorPort for HardwareAdapter<OCC, BMP, W, C, L, R, H>
where
    OCC: InputPin,
    BMP: InputPin,
    W: DistanceSensor,
    C: ReflectanceSensor,
{
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensor_hub.read_all()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<OCC, BMP, W, C, L, R, H> ActuatorPort for HardwareAdapter<OCC, BMP, W, C, L, R, H>
where
    L: SetDutyCycle,
    R: SetDutyCycle,
    H: OutputPin,
{
    fn set_drive(&mut self, left: u8, right: u8) {
        if let Err(e) = self.left.set_power(left) {
            warn!("left motor: {}", e);
        }
        if let Err(e) = self.right.set_power(right) {
            warn!("right motor: {}", e);
        }
    }

    fn stop_drive(&mut self) {
        if let Err(e) = self.left.stop() {
            warn!("left motor: {}", e);
        }
        if let Err(e) = self.right.stop() {
            warn!("right motor: {}", e);
        }
    }

    fn sound(&mut self, signal: Signal) {
        if let Err(e) = self.horn.sound(signal) {
            warn!("horn: {}", e);
        }
    }

    fn show_title(&mut self, title: &str) {
        info!("display: {}", title);
    }

    fn show_state(&mut self, state: StateId) {
        if self.displayed != Some(state) {
            info!("display: {} ({:?})", state.index(), state);
            self.displayed = Some(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::pwm::ErrorType as PwmErrorType;

    use crate::drivers::motor::MotorState;
    use crate::error::SensorError;

    struct Pin(bool);

    impl PinErrorType for Pin {
        type Error = Infallible;
    }

    impl InputPin for Pin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.0)
        }
        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.0)
        }
    }

    impl OutputPin for Pin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0 = true;
            Ok(())
        }
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0 = false;
            Ok(())
        }
    }

    struct Pwm;

    impl PwmErrorType for Pwm {
        type Error = Infallible;
    }

    impl SetDutyCycle for Pwm {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }
        fn set_duty_cycle(&mut self, _duty: u16) -> Result<(), Infallible> {
            Ok(())
        }
    }

    struct Fixed;

    impl DistanceSensor for Fixed {
        fn distance_cm(&mut self) -> Result<u16, SensorError> {
            Ok(8)
        }
    }

    impl ReflectanceSensor for Fixed {
        fn reflectance(&mut self) -> Result<u8, SensorError> {
            Ok(12)
        }
    }

    fn rig() -> HardwareAdapter<Pin, Pin, Fixed, Fixed, Pwm, Pwm, Pin> {
        HardwareAdapter::new(
            SensorHub::new(Pin(true), Pin(false), Fixed, Fixed),
            DriveMotor::new(Pwm),
            DriveMotor::new(Pwm),
            Horn::new(Pin(false)),
        )
    }

    #[test]
    fn reads_go_through_hub() {
        let mut hw = rig();
        let s = hw.read_all();
        assert!(s.occupied);
        assert_eq!(s.wall_distance_cm, 8);
        assert_eq!(s.reflectance, 12);
    }

    #[test]
    fn drive_and_stop_reach_both_motors() {
        let mut hw = rig();
        hw.set_drive(0, 20);
        assert_eq!(hw.left_motor().state(), MotorState::Stopped);
        assert_eq!(hw.right_motor().state(), MotorState::Running { power: 20 });
        hw.stop_drive();
        assert!(!hw.left_motor().is_running());
        assert!(!hw.right_motor().is_running());
    }

    #[test]
    fn signal_sounds_horn_until_pattern_ends() {
        let mut hw = rig();
        hw.sound(Signal::Confirmation);
        assert!(hw.horn().is_sounding());
        hw.poll(1_000);
        assert!(!hw.horn().is_sounding());
    }
}
