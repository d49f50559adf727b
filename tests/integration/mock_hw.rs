//! Mock hardware adapter for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history, and serves whatever sensor snapshot the test sets.

use porter::adapters::time::ManualClock;
use porter::app::events::AppEvent;
use porter::app::ports::{ActuatorPort, EventSink, SensorPort};
use porter::app::service::PorterService;
use porter::config::PorterConfig;
use porter::fsm::StateId;
use porter::fsm::context::{SensorSnapshot, Signal};

/// One time unit with the default configuration.
pub const UNIT_MS: u64 = 1_000;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    SetDrive { left: u8, right: u8 },
    StopDrive,
    Sound(Signal),
}

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
pub struct MockHardware {
    pub sensors: SensorSnapshot,
    pub calls: Vec<ActuatorCall>,
    pub title: Option<String>,
    pub display: Vec<StateId>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signals(&self) -> Vec<Signal> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Sound(s) => Some(*s),
                _ => None,
            })
            .collect()
    }

    pub fn motors_running(&self) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::SetDrive { left, right } => Some(*left > 0 || *right > 0),
                ActuatorCall::StopDrive => Some(false),
                ActuatorCall::Sound(_) => None,
            })
            .unwrap_or(false)
    }
}

impl SensorPort for MockHardware {
    fn read_all(&mut self) -> SensorSnapshot {
        self.sensors
    }
}

impl ActuatorPort for MockHardware {
    fn set_drive(&mut self, left: u8, right: u8) {
        self.calls.push(ActuatorCall::SetDrive { left, right });
    }

    fn stop_drive(&mut self) {
        self.calls.push(ActuatorCall::StopDrive);
    }

    fn sound(&mut self, signal: Signal) {
        self.calls.push(ActuatorCall::Sound(signal));
    }

    fn show_title(&mut self, title: &str) {
        self.title = Some(title.to_owned());
    }

    fn show_state(&mut self, state: StateId) {
        self.display.push(state);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn transitions(&self) -> Vec<(StateId, StateId)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::StateChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

// ── Rig ───────────────────────────────────────────────────────

/// A started service wired to mock hardware and a manual clock.
pub struct Rig {
    pub app: PorterService,
    pub hw: MockHardware,
    pub sink: RecordingSink,
    pub clock: ManualClock,
}

#[allow(dead_code)]
impl Rig {
    pub fn new() -> Self {
        let mut rig = Self {
            app: PorterService::new(PorterConfig::default()),
            hw: MockHardware::new(),
            sink: RecordingSink::default(),
            clock: ManualClock::new(),
        };
        rig.app.start(&mut rig.hw, &mut rig.sink);
        rig
    }

    pub fn tick(&mut self) -> StateId {
        self.app.tick(&mut self.hw, &self.clock, &mut self.sink);
        self.app.state()
    }

    /// Advance the clock, then tick.
    pub fn tick_after(&mut self, ms: u64) -> StateId {
        self.clock.advance_ms(ms);
        self.tick()
    }

    pub fn occupied(&mut self, on: bool) -> &mut Self {
        self.hw.sensors.occupied = on;
        self
    }

    pub fn bumper(&mut self, on: bool) -> &mut Self {
        self.hw.sensors.bumper_pressed = on;
        self
    }

    pub fn wall_cm(&mut self, cm: u16) -> &mut Self {
        self.hw.sensors.wall_distance_cm = cm;
        self
    }

    /// Forget the actuator history.
    pub fn clear_calls(&mut self) {
        self.hw.calls.clear();
    }

    /// Scenario A: load, press, release.  Leaves the rig in `Transporting`.
    pub fn dispatch(&mut self) {
        self.occupied(true);
        assert_eq!(self.tick(), StateId::AwaitingInstruction);
        self.bumper(true);
        assert_eq!(self.tick(), StateId::InstructionBumperHeld);
        self.bumper(false);
        assert_eq!(self.tick(), StateId::Transporting);
    }
}
