//! Porter controller: the pure advance-one-tick operation.
//!
//! [`PorterController`] bundles the [`Fsm`] with its [`FsmContext`] so a
//! caller owns all controller state explicitly.  Each call to
//! [`advance`](PorterController::advance) takes the current time and a
//! sensor snapshot and hands back the ordered actuator commands for the
//! host to perform.  It never blocks and never touches hardware.

use crate::config::PorterConfig;

use super::context::{CommandBuffer, FsmContext, SensorSnapshot};
use super::states::build_state_table;
use super::{Fsm, StateId, TransitionRecord};

/// Controller context: current state, timer, tracer and configuration.
pub struct PorterController {
    fsm: Fsm,
    ctx: FsmContext,
    last_transition: Option<TransitionRecord>,
}

impl PorterController {
    /// Build a controller in `AwaitingLoad` and run its entry hook.
    pub fn new(config: PorterConfig) -> Self {
        let mut ctx = FsmContext::new(config);
        let mut fsm = Fsm::new(build_state_table(), StateId::AwaitingLoad);
        fsm.start(&mut ctx);
        // The initial entry hook issues nothing, but keep the buffer clean.
        ctx.take_commands();
        Self {
            fsm,
            ctx,
            last_transition: None,
        }
    }

    /// Advance one tick and return the commands to perform, in order.
    pub fn advance(&mut self, now_ms: u64, sensors: SensorSnapshot) -> CommandBuffer {
        self.ctx.now_ms = now_ms;
        self.ctx.sensors = sensors;
        self.last_transition = self.fsm.tick(&mut self.ctx);
        self.ctx.take_commands()
    }

    /// Jump straight to `state`, running exit and entry hooks.
    /// Returns whatever those hooks issued.
    pub fn force_state(&mut self, state: StateId, now_ms: u64) -> CommandBuffer {
        self.ctx.now_ms = now_ms;
        let from = self.fsm.current_state();
        self.fsm.force_transition(state, &mut self.ctx);
        if from != state {
            self.last_transition = Some(TransitionRecord { from, to: state });
        }
        self.ctx.take_commands()
    }

    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn state_name(&self) -> &'static str {
        self.fsm.state_name(self.fsm.current_state())
    }

    /// `true` for exactly the tick that entered the current state.
    pub fn just_entered(&self) -> bool {
        self.fsm.just_entered()
    }

    /// Transition taken by the most recent tick, if any.
    pub fn last_transition(&self) -> Option<TransitionRecord> {
        self.last_transition
    }

    pub fn tick_count(&self) -> u64 {
        self.fsm.tick_count()
    }

    pub fn ticks_in_state(&self) -> u64 {
        self.fsm.ticks_in_current_state()
    }

    /// Read-only view of the controller context.
    pub fn context(&self) -> &FsmContext {
        &self.ctx
    }

    pub fn config(&self) -> &PorterConfig {
        &self.ctx.config
    }

    /// Milliseconds left on the countdown timer, if armed.
    pub fn timer_remaining_ms(&self) -> Option<u64> {
        self.ctx.timer.remaining_ms(self.ctx.now_ms)
    }
}
