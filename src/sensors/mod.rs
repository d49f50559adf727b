//! Sensor subsystem: the aggregating [`SensorHub`].
//!
//! The hub owns every sensor driver and produces a [`SensorSnapshot`] each
//! tick that gets written into `FsmContext.sensors`.
//!
//! | Sensor     | Interface                      | Polarity          |
//! |------------|--------------------------------|-------------------|
//! | Occupancy  | `embedded_hal` [`InputPin`]    | high = seat taken |
//! | Bumper     | `embedded_hal` [`InputPin`]    | high = pressed    |
//! | Wall range | [`DistanceSensor`]             | centimetres       |
//! | Line       | [`ReflectanceSensor`]          | 0–100 reflectance |

use embedded_hal::digital::InputPin;
use log::warn;

use crate::error::SensorError;
use crate::fsm::context::SensorSnapshot;

/// Ranging sensor facing the end-of-track wall.
pub trait DistanceSensor {
    fn distance_cm(&mut self) -> Result<u16, SensorError>;
}

/// Downward-facing colour sensor used to track the guide line.
pub trait ReflectanceSensor {
    /// Reflected light intensity, 0 (dark) to 100 (bright).
    fn reflectance(&mut self) -> Result<u8, SensorError>;
}

/// Aggregates all sensor drivers and produces a unified snapshot.
pub struct SensorHub<OCC, BMP, W, C> {
    occupancy: OCC,
    bumper: BMP,
    wall: W,
    line: C,
    /// Last good readings; returned again when a read fails.
    last: SensorSnapshot,
}

impl<OCC, BMP, W, C> SensorHub<OCC, BMP, W, C>
where
    OCC: InputPin,
    BMP: InputPin,
    W: DistanceSensor,
    C: ReflectanceSensor,
{
    /// Construct a new hub from pre-built drivers.
    pub fn new(occupancy: OCC, bumper: BMP, wall: W, line: C) -> Self {
        Self {
            occupancy,
            bumper,
            wall,
            line,
            last: SensorSnapshot::default(),
        }
    }

    /// Read every sensor and return a unified snapshot.
    ///
    /// Individual read failures are logged and the previous good value is
    /// retained, so one flaky sensor never stalls the control loop.
    pub fn read_all(&mut self) -> SensorSnapshot {
        match self.occupancy.is_high() {
            Ok(v) => self.last.occupied = v,
            Err(_) => warn!("sensor: {}", SensorError::OccupancyReadFailed),
        }
        match self.bumper.is_high() {
            Ok(v) => self.last.bumper_pressed = v,
            Err(_) => warn!("sensor: {}", SensorError::BumperReadFailed),
        }
        match self.wall.distance_cm() {
            Ok(v) => self.last.wall_distance_cm = v,
            Err(e) => warn!("sensor: {}", e),
        }
        match self.line.reflectance() {
            Ok(v) => self.last.reflectance = v.min(100),
            Err(e) => warn!("sensor: {}", e),
        }
        self.last
    }

    /// Most recent snapshot without touching the hardware.
    pub fn last(&self) -> SensorSnapshot {
        self.last
    }
}
