//! Application service: the hexagonal core.
//!
//! [`PorterService`] owns the [`PorterController`] and exposes a
//! hardware-agnostic API.  All I/O flows through port traits injected at
//! call sites, making the entire service testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!   ClockPort ──▶ │     PorterService      │
//! ActuatorPort ◀──│  FSM · Timer · Tracer  │
//!                 └────────────────────────┘
//! ```

use log::{debug, info};

use crate::config::PorterConfig;
use crate::fsm::StateId;
use crate::fsm::context::ActuatorCommand;
use crate::fsm::controller::PorterController;

use super::events::{AppEvent, TelemetryData};
use super::ports::{ActuatorPort, ClockPort, EventSink, SensorPort};

/// Title shown on the status display at startup.
pub const SERVICE_TITLE: &str = "park_ride_service";

// ───────────────────────────────────────────────────────────────
// PorterService
// ───────────────────────────────────────────────────────────────

/// The application service orchestrates one porter.
pub struct PorterService {
    controller: PorterController,
}

impl PorterService {
    /// Construct the service from configuration.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: PorterConfig) -> Self {
        Self {
            controller: PorterController::new(config),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Show the title and announce the initial state.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        hw.show_title(SERVICE_TITLE);
        hw.show_state(self.controller.state());
        sink.emit(&AppEvent::Started(self.controller.state()));
        info!("PorterService started in {:?}", self.controller.state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: display → read sensors → controller → actuators.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`ActuatorPort`], which avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl SensorPort + ActuatorPort),
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        // 1. Status display shows the state this tick starts in.
        hw.show_state(self.controller.state());

        // 2. Read sensors via SensorPort
        let snapshot = hw.read_all();
        let now_ms = clock.now_ms();

        // 3. Controller tick (pure state logic)
        let commands = self.controller.advance(now_ms, snapshot);

        // 4. Apply actuator commands via ActuatorPort, in issue order
        for cmd in &commands {
            Self::apply(*cmd, hw, sink);
        }

        // 5. Emit state change if the controller moved
        if let Some(t) = self.controller.last_transition() {
            sink.emit(&AppEvent::StateChanged {
                from: t.from,
                to: t.to,
            });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current controller context.
    pub fn build_telemetry(&self) -> TelemetryData {
        let ctx = self.controller.context();
        TelemetryData {
            state: self.controller.state(),
            ticks_in_state: self.controller.ticks_in_state(),
            occupied: ctx.sensors.occupied,
            bumper_pressed: ctx.sensors.bumper_pressed,
            wall_distance_cm: ctx.sensors.wall_distance_cm,
            reflectance: ctx.sensors.reflectance,
            timer_remaining_ms: self.controller.timer_remaining_ms(),
        }
    }

    /// Current controller state.
    pub fn state(&self) -> StateId {
        self.controller.state()
    }

    /// `true` for exactly the tick that entered the current state.
    pub fn just_entered(&self) -> bool {
        self.controller.just_entered()
    }

    /// Total control ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.controller.tick_count()
    }

    /// Live configuration.
    pub fn config(&self) -> &PorterConfig {
        self.controller.config()
    }

    /// Position the controller directly in `state` (bring-up and tests).
    pub fn force_state(
        &mut self,
        state: StateId,
        hw: &mut impl ActuatorPort,
        clock: &impl ClockPort,
        sink: &mut impl EventSink,
    ) {
        let prev = self.controller.state();
        let commands = self.controller.force_state(state, clock.now_ms());
        for cmd in &commands {
            Self::apply(*cmd, hw, sink);
        }
        if prev != state {
            sink.emit(&AppEvent::StateChanged {
                from: prev,
                to: state,
            });
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Translate one controller command into port calls.
    fn apply(cmd: ActuatorCommand, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        match cmd {
            ActuatorCommand::Drive { left, right } => {
                debug!("drive L={} R={}", left, right);
                hw.set_drive(left, right);
            }
            ActuatorCommand::StopMotors => hw.stop_drive(),
            ActuatorCommand::Signal(signal) => {
                hw.sound(signal);
                sink.emit(&AppEvent::SignalEmitted(signal));
            }
        }
    }
}
