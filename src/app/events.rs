//! Outbound application events.
//!
//! The [`PorterService`](super::service::PorterService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::fsm::StateId;
use crate::fsm::context::Signal;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),

    /// The controller transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// A signal was sounded.
    SignalEmitted(Signal),

    /// The service has started (carries initial state).
    Started(StateId),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryData {
    pub state: StateId,
    pub ticks_in_state: u64,
    pub occupied: bool,
    pub bumper_pressed: bool,
    pub wall_distance_cm: u16,
    pub reflectance: u8,
    /// Milliseconds left on the countdown timer; `None` if never armed.
    pub timer_remaining_ms: Option<u64>,
}
