//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It contains the latest sensor snapshot, the actuator
//! commands issued during the current tick, the countdown timer, the
//! line tracer and the configuration.  Think of it as the "blackboard"
//! in a blackboard architecture.

use heapless::Vec;
use log::warn;

use crate::config::PorterConfig;
use crate::control::countdown::CountdownTimer;
use crate::control::line_tracer::LineTracer;

// ---------------------------------------------------------------------------
// Sensor snapshot (read-only to state handlers; written by the service)
// ---------------------------------------------------------------------------

/// A point-in-time snapshot of every porter sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorSnapshot {
    /// Seat touch sensor pressed: a passenger is aboard.
    pub occupied: bool,
    /// Bumper touch sensor pressed by the operator.
    pub bumper_pressed: bool,
    /// Ultrasonic distance to the drop-off wall (cm).
    pub wall_distance_cm: u16,
    /// Colour sensor reflectance (0 = black, 100 = white).
    pub reflectance: u8,
}

impl Default for SensorSnapshot {
    fn default() -> Self {
        Self {
            occupied: false,
            bumper_pressed: false,
            wall_distance_cm: 255, // ultrasonic "nothing in range"
            reflectance: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Actuator commands (written by state handlers; applied by the service)
// ---------------------------------------------------------------------------

/// Audible signals the porter can sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Short acknowledgement beep.
    Confirmation,
    /// Attention-getting warning.
    Warning,
}

/// One fire-and-forget actuator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorCommand {
    /// Set left/right drive motor power (0-100%).
    Drive { left: u8, right: u8 },
    /// Stop both drive motors.
    StopMotors,
    /// Sound a signal on the horn.
    Signal(Signal),
}

/// Upper bound on commands one tick can issue
/// (exit halt + transition signal + entry signal + steering).
pub const MAX_COMMANDS_PER_TICK: usize = 8;

/// Ordered commands issued during one tick.
pub type CommandBuffer = Vec<ActuatorCommand, MAX_COMMANDS_PER_TICK>;

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Current time (ms) for this tick.  Set before each FSM tick.
    pub now_ms: u64,
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Sensor data --
    /// Latest sensor readings.  Updated before each FSM tick.
    pub sensors: SensorSnapshot,

    // -- Actuator outputs --
    /// Commands issued this tick, in order.
    pub commands: CommandBuffer,

    // -- Collaborators --
    /// The single outstanding deadline.
    pub timer: CountdownTimer,
    /// Steering loop.
    pub tracer: LineTracer,

    // -- Configuration --
    pub config: PorterConfig,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: PorterConfig) -> Self {
        Self {
            now_ms: 0,
            ticks_in_state: 0,
            total_ticks: 0,
            sensors: SensorSnapshot::default(),
            commands: CommandBuffer::new(),
            timer: CountdownTimer::new(),
            tracer: LineTracer::new(config.drive_power_percent),
            config,
        }
    }

    // ── Sensor predicates ─────────────────────────────────────

    pub fn occupied(&self) -> bool {
        self.sensors.occupied
    }

    pub fn bumper_pressed(&self) -> bool {
        self.sensors.bumper_pressed
    }

    /// Wall closer than the configured threshold.
    pub fn wall_detected(&self) -> bool {
        self.sensors.wall_distance_cm < self.config.wall_distance_threshold_cm
    }

    /// Reflectance darker than the configured threshold.
    pub fn on_line(&self) -> bool {
        self.sensors.reflectance < self.config.reflectance_threshold
    }

    // ── Timer ─────────────────────────────────────────────────

    /// Arm the countdown timer for `units` time units from now.
    pub fn start_timer(&mut self, units: u16) {
        let duration_ms = self.config.units_to_ms(units);
        self.timer.start(self.now_ms, duration_ms);
    }

    pub fn timer_expired(&self) -> bool {
        self.timer.is_expired(self.now_ms)
    }

    // ── Actuators ─────────────────────────────────────────────

    /// Queue an actuator command for this tick.
    pub fn issue(&mut self, cmd: ActuatorCommand) {
        if self.commands.push(cmd).is_err() {
            warn!("command buffer full, dropping {:?}", cmd);
        }
    }

    pub fn signal(&mut self, signal: Signal) {
        self.issue(ActuatorCommand::Signal(signal));
    }

    /// Run one line-tracer step.
    pub fn follow_line(&mut self) {
        let cmd = self.tracer.follow(self.on_line());
        self.issue(cmd);
    }

    pub fn halt_tracer(&mut self) {
        let cmd = self.tracer.halt();
        self.issue(cmd);
    }

    /// Hand over this tick's commands, leaving the buffer empty.
    pub fn take_commands(&mut self) -> CommandBuffer {
        core::mem::take(&mut self.commands)
    }
}
