//! Simulated track: a virtual world for host runs.
//!
//! Implements [`SensorPort`] and [`ActuatorPort`] over a tiny physics
//! model plus a scripted passenger and operator:
//!
//! ```text
//!   wall ◀──────────────── track ────────────────▶ wall
//!         ▓▓▓▓▓▓▓▓▓▓▓▓▓▓ guide line ▓▓▓▓▓▓▓▓▓▓▓▓▓
//! ```
//!
//! - Forward speed is proportional to the summed motor power.
//! - Steering moves the colour sensor across the line edge: left-only
//!   drive swings it onto the dark line, right-only drive swings it off.
//! - The ranger reports the distance to the wall ahead.  A porter that
//!   sets off while parked at a wall turns around and faces the other end.
//!
//! The script reads the state code from the status display, the same
//! cue a human operator would have:
//!
//! 1. the passenger boards while the porter waits for a load;
//! 2. the operator taps the bumper to send it off;
//! 3. the passenger leaves once the porter stops at the far wall;
//! 4. the operator taps the bumper again to send the empty porter back.
//!
//! A tap holds the bumper for exactly one sensor read.

use log::{debug, info};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::fsm::StateId;
use crate::fsm::context::{SensorSnapshot, Signal};

/// Wall-to-wall track length.
pub const TRACK_LENGTH_CM: f32 = 120.0;

/// Forward speed per percent of summed motor power.
const SPEED_CM_PER_S_PER_PCT: f32 = 0.5;
/// Lateral drift of the colour sensor per percent of power difference.
const DRIFT_MM_PER_S_PER_PCT: f32 = 1.0;
/// How far the sensor can wander from the line edge.
const MAX_OFFSET_MM: f32 = 30.0;
/// Closer than this to a wall counts as parked against it.
const PARKED_CM: f32 = 15.0;

const DARK: u8 = 8;
const BRIGHT: u8 = 60;

/// How long each scripted actor waits before acting.
const ACTOR_DELAY_MS: u64 = 1_000;

/// Progress through the scripted ride.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RidePhase {
    /// Passenger is walking up to the empty porter.
    Boarding,
    /// Passenger is seated; operator is about to send the porter off.
    Dispatching,
    /// Porter is carrying the passenger.
    Riding,
    /// Porter has stopped; passenger is getting out.
    Alighting,
    /// Porter is empty at the far end; operator is about to recall it.
    Recalling,
    /// Empty porter is heading back.
    Returning,
    /// Porter is back and waiting for the next load.
    Done,
}

pub struct SimulatedTrack {
    now_ms: u64,

    // ── World ─────────────────────────────────────────────────
    wall_ahead_cm: f32,
    offset_mm: f32,
    left_power: u8,
    right_power: u8,
    travelled_cm: f32,
    /// Odometer reading when the operator recalled the porter.
    recalled_at_cm: f32,

    // ── Actors ────────────────────────────────────────────────
    phase: RidePhase,
    occupied: bool,
    tap_pending: bool,
    displayed: Option<StateId>,
    displayed_since_ms: u64,

    // ── Record ────────────────────────────────────────────────
    signals: Vec<Signal>,
}

impl Default for SimulatedTrack {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedTrack {
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            wall_ahead_cm: TRACK_LENGTH_CM,
            offset_mm: 5.0,
            left_power: 0,
            right_power: 0,
            travelled_cm: 0.0,
            recalled_at_cm: 0.0,
            phase: RidePhase::Boarding,
            occupied: false,
            tap_pending: false,
            displayed: None,
            displayed_since_ms: 0,
            signals: Vec::new(),
        }
    }

    /// Advance the world and the script by `delta_ms`.
    pub fn step(&mut self, delta_ms: u32) {
        self.now_ms += u64::from(delta_ms);
        let dt = delta_ms as f32 / 1000.0;

        let left = f32::from(self.left_power);
        let right = f32::from(self.right_power);
        let advance = (left + right) * SPEED_CM_PER_S_PER_PCT * dt;
        self.wall_ahead_cm = (self.wall_ahead_cm - advance).max(0.0);
        self.travelled_cm += advance;
        self.offset_mm = (self.offset_mm + (left - right) * DRIFT_MM_PER_S_PER_PCT * dt)
            .clamp(-MAX_OFFSET_MM, MAX_OFFSET_MM);

        self.run_script();
    }

    fn run_script(&mut self) {
        let Some(state) = self.displayed else {
            return;
        };
        let settled = self.now_ms.saturating_sub(self.displayed_since_ms) >= ACTOR_DELAY_MS;

        let next = match (self.phase, state) {
            (RidePhase::Boarding, StateId::AwaitingLoad) if settled => {
                info!("sim: passenger boards");
                self.occupied = true;
                Some(RidePhase::Dispatching)
            }
            (RidePhase::Dispatching, StateId::AwaitingInstruction) if settled => {
                info!("sim: operator taps bumper to dispatch");
                self.tap_pending = true;
                Some(RidePhase::Riding)
            }
            (RidePhase::Riding, StateId::Stopped) => Some(RidePhase::Alighting),
            (RidePhase::Alighting, StateId::Stopped) if settled => {
                info!("sim: passenger leaves");
                self.occupied = false;
                Some(RidePhase::Recalling)
            }
            (RidePhase::Recalling, StateId::AwaitingLoad) if settled => {
                info!("sim: operator taps bumper to recall");
                self.tap_pending = true;
                self.recalled_at_cm = self.travelled_cm;
                Some(RidePhase::Returning)
            }
            (RidePhase::Returning, StateId::AwaitingLoad)
                if self.is_parked() && self.travelled_cm - self.recalled_at_cm > PARKED_CM =>
            {
                info!("sim: porter is back, ride complete");
                Some(RidePhase::Done)
            }
            _ => None,
        };

        if let Some(phase) = next {
            debug!("sim: {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    // ── Inspection ────────────────────────────────────────────

    pub fn phase(&self) -> RidePhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == RidePhase::Done
    }

    pub fn wall_ahead_cm(&self) -> f32 {
        self.wall_ahead_cm
    }

    pub fn travelled_cm(&self) -> f32 {
        self.travelled_cm
    }

    pub fn is_moving(&self) -> bool {
        self.left_power > 0 || self.right_power > 0
    }

    /// Every signal sounded so far, in order.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    fn is_parked(&self) -> bool {
        !self.is_moving() && self.wall_ahead_cm < PARKED_CM
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for SimulatedTrack {
    fn read_all(&mut self) -> SensorSnapshot {
        let bumper_pressed = core::mem::take(&mut self.tap_pending);
        SensorSnapshot {
            occupied: self.occupied,
            bumper_pressed,
            wall_distance_cm: self.wall_ahead_cm.clamp(0.0, 255.0) as u16,
            reflectance: if self.offset_mm > 0.0 { DARK } else { BRIGHT },
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for SimulatedTrack {
    fn set_drive(&mut self, left: u8, right: u8) {
        if !self.is_moving() && self.wall_ahead_cm < PARKED_CM {
            self.wall_ahead_cm = TRACK_LENGTH_CM - self.wall_ahead_cm;
            info!("sim: turning around, {:.0}cm to the far wall", self.wall_ahead_cm);
        }
        self.left_power = left.min(100);
        self.right_power = right.min(100);
    }

    fn stop_drive(&mut self) {
        self.left_power = 0;
        self.right_power = 0;
    }

    fn sound(&mut self, signal: Signal) {
        info!("sim: horn {:?}", signal);
        self.signals.push(signal);
    }

    fn show_title(&mut self, title: &str) {
        info!("sim: display shows {:?}", title);
    }

    fn show_state(&mut self, state: StateId) {
        if self.displayed != Some(state) {
            self.displayed = Some(state);
            self.displayed_since_ms = self.now_ms;
        }
    }
}
