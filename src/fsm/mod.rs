//! Table-driven finite state machine engine.
//!
//! Classic embedded FSM pattern expressed in Rust:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  StateTable                                                         │
//! │  ┌──────────────┬──────────┬─────────┬───────────┬──────────────┐   │
//! │  │ StateId      │ on_enter │ on_exit │ on_update │ transitions  │   │
//! │  ├──────────────┼──────────┼─────────┼───────────┼──────────────┤   │
//! │  │ AwaitingLoad │ fn(ctx)  │ fn(ctx) │ fn(ctx)   │ [guard→next] │   │
//! │  │ Transporting │ fn(ctx)  │ fn(ctx) │ fn(ctx)   │ [guard→next] │   │
//! │  │ ...          │          │         │           │              │   │
//! │  └──────────────┴──────────┴─────────┴───────────┴──────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine:
//!
//! 1. Evaluates the current state's transitions in priority order; the
//!    first guard that holds wins.
//! 2. On a match runs `on_exit` of the source, the transition's own
//!    action, then `on_enter` of the destination.
//! 3. Runs `on_update` of whichever state is now current.
//!
//! The destination's guards are first evaluated on the following tick.
//! All functions receive `&mut FsmContext` which holds sensor readings,
//! issued commands, config, timer and tracer.

pub mod context;
pub mod controller;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all porter states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    AwaitingLoad = 0,
    AwaitingInstruction = 1,
    ConfirmInstruction = 2,
    InstructionBumperHeld = 3,
    Transporting = 4,
    TransportConflict = 5,
    TransportConflictResolving = 6,
    PassengerFallen = 7,
    PassengerAbsent = 8,
    Stopped = 9,
    RepositionBumperHeld = 10,
    Repositioning = 11,
    RepositionConflict = 12,
    RepositionConflictResolving = 13,
}

impl StateId {
    /// Total number of states, used to size the table array.
    pub const COUNT: usize = 14;

    /// Every state, in table order.
    pub const ALL: [StateId; StateId::COUNT] = [
        Self::AwaitingLoad,
        Self::AwaitingInstruction,
        Self::ConfirmInstruction,
        Self::InstructionBumperHeld,
        Self::Transporting,
        Self::TransportConflict,
        Self::TransportConflictResolving,
        Self::PassengerFallen,
        Self::PassengerAbsent,
        Self::Stopped,
        Self::RepositionBumperHeld,
        Self::Repositioning,
        Self::RepositionConflict,
        Self::RepositionConflictResolving,
    ];

    /// Stable numeric code shown on the status display.
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter`, `on_exit`, `on_update` and transition actions.
pub type StateActionFn = fn(&mut FsmContext);

/// Signature for a transition guard.  Guards are pure reads.
pub type GuardFn = fn(&FsmContext) -> bool;

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// One guarded edge out of a state.
pub struct Transition {
    pub guard: GuardFn,
    pub to: StateId,
    /// Runs between the source's `on_exit` and the destination's `on_enter`.
    pub action: Option<StateActionFn>,
}

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array: no heap, no `dyn`.
pub struct StateDescriptor {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_exit: Option<StateActionFn>,
    pub on_update: Option<StateActionFn>,
    /// Outgoing edges in priority order.
    pub transitions: &'static [Transition],
}

/// A transition taken during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRecord {
    pub from: StateId,
    pub to: StateId,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]); the mutable
/// [`FsmContext`] is threaded through every handler call by the caller.
pub struct Fsm {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor; StateId::COUNT],
    current: StateId,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
    /// Whether the last tick entered the current state.
    just_entered: bool,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; StateId::COUNT], initial: StateId) -> Self {
        debug_assert!(
            table.iter().enumerate().all(|(i, d)| d.id.index() == i),
            "state table out of order"
        );
        Self {
            table,
            current: initial,
            tick_count: 0,
            state_entry_tick: 0,
            just_entered: false,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext) {
        info!("FSM starting in state: {}", self.descriptor(self.current).name);
        if let Some(enter) = self.descriptor(self.current).on_enter {
            enter(ctx);
        }
    }

    /// Advance the FSM by one tick.  At most one transition is taken.
    pub fn tick(&mut self, ctx: &mut FsmContext) -> Option<TransitionRecord> {
        self.tick_count += 1;
        ctx.total_ticks = self.tick_count;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;
        self.just_entered = false;

        let taken = self
            .descriptor(self.current)
            .transitions
            .iter()
            .find(|t| (t.guard)(&*ctx))
            .map(|t| (t.to, t.action));

        let record = taken.map(|(to, action)| {
            let from = self.current;
            self.transition(to, action, ctx);
            TransitionRecord { from, to }
        });

        if let Some(update) = self.descriptor(self.current).on_update {
            update(ctx);
        }

        record
    }

    /// Force an immediate transition, running exit and enter hooks.
    /// Used for bring-up and tests; normal operation only moves on guards.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext) {
        if next != self.current {
            self.transition(next, None, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Display name of a state.
    pub fn state_name(&self, id: StateId) -> &'static str {
        self.descriptor(id).name
    }

    /// `true` during exactly the tick that entered the current state.
    pub fn just_entered(&self) -> bool {
        self.just_entered
    }

    /// Total ticks executed.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn descriptor(&self, id: StateId) -> &StateDescriptor {
        &self.table[id.index()]
    }

    fn transition(&mut self, next: StateId, action: Option<StateActionFn>, ctx: &mut FsmContext) {
        info!(
            "FSM transition: {} -> {}",
            self.descriptor(self.current).name,
            self.descriptor(next).name
        );

        // Exit current state
        if let Some(exit) = self.descriptor(self.current).on_exit {
            exit(ctx);
        }

        if let Some(action) = action {
            action(ctx);
        }

        // Update pointer and timing
        self.current = next;
        self.state_entry_tick = self.tick_count;
        self.just_entered = true;
        ctx.ticks_in_state = 0;

        // Enter new state
        if let Some(enter) = self.descriptor(self.current).on_enter {
            enter(ctx);
        }
    }
}
