//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers plus a static slice of
//! guarded transitions. No closures or dynamic dispatch.
//!
//! ```text
//!                  ┌──────────[bumper]──────────────────────────────┐
//!                  │                                                ▼
//!  AWAITING_LOAD ──[occupied]──▶ AWAITING_INSTRUCTION ◀──▶ CONFIRM  REPOSITIONING ◀─▶ REPOSITION_CONFLICT(_RESOLVING)
//!        ▲                          │        ▲                        │
//!        │                      [bumper]     │                 [wall ∧ timer]
//!        │                          ▼        │                        │
//!        │             INSTRUCTION_BUMPER_HELD    └──────────── AWAITING_LOAD
//!        │                          │ [released]
//!        │                          ▼
//!        │     PASSENGER_FALLEN ◀─ TRANSPORTING ◀─▶ TRANSPORT_CONFLICT(_RESOLVING)
//!        │        ▲     │               │
//!        │        └─ PASSENGER_ABSENT   [wall ∧ timer]
//!        │                              ▼
//!        └────────[unoccupied]────── STOPPED ──[bumper]──▶ INSTRUCTION_BUMPER_HELD
//! ```

use super::context::{FsmContext, Signal};
use super::{StateDescriptor, StateId, Transition};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Guards
// ═══════════════════════════════════════════════════════════════════════════

fn occupied(ctx: &FsmContext) -> bool {
    ctx.occupied()
}

fn unoccupied(ctx: &FsmContext) -> bool {
    !ctx.occupied()
}

fn bumper_pressed(ctx: &FsmContext) -> bool {
    ctx.bumper_pressed()
}

fn bumper_released(ctx: &FsmContext) -> bool {
    !ctx.bumper_pressed()
}

fn timer_expired(ctx: &FsmContext) -> bool {
    ctx.timer_expired()
}

/// Drop-off reached: wall in range after the minimum travel time.
fn arrived(ctx: &FsmContext) -> bool {
    ctx.wall_detected() && ctx.timer_expired()
}

fn always(_ctx: &FsmContext) -> bool {
    true
}

// ═══════════════════════════════════════════════════════════════════════════
//  Transition tables (priority order, first match wins)
// ═══════════════════════════════════════════════════════════════════════════

const fn edge(guard: fn(&FsmContext) -> bool, to: StateId) -> Transition {
    Transition {
        guard,
        to,
        action: None,
    }
}

const AWAITING_LOAD: &[Transition] = &[
    edge(occupied, StateId::AwaitingInstruction),
    edge(bumper_pressed, StateId::Repositioning),
];

const AWAITING_INSTRUCTION: &[Transition] = &[
    edge(timer_expired, StateId::ConfirmInstruction),
    edge(bumper_pressed, StateId::InstructionBumperHeld),
];

const CONFIRM_INSTRUCTION: &[Transition] = &[edge(always, StateId::AwaitingInstruction)];

const INSTRUCTION_BUMPER_HELD: &[Transition] = &[edge(bumper_released, StateId::Transporting)];

const TRANSPORTING: &[Transition] = &[
    edge(arrived, StateId::Stopped),
    edge(bumper_pressed, StateId::TransportConflict),
    edge(unoccupied, StateId::PassengerFallen),
];

const TRANSPORT_CONFLICT: &[Transition] =
    &[edge(bumper_released, StateId::TransportConflictResolving)];

const TRANSPORT_CONFLICT_RESOLVING: &[Transition] = &[Transition {
    guard: timer_expired,
    to: StateId::Transporting,
    action: Some(confirm),
}];

const PASSENGER_FALLEN: &[Transition] = &[
    edge(timer_expired, StateId::PassengerAbsent),
    edge(occupied, StateId::AwaitingInstruction),
];

const PASSENGER_ABSENT: &[Transition] = &[edge(always, StateId::PassengerFallen)];

const STOPPED: &[Transition] = &[
    edge(unoccupied, StateId::AwaitingLoad),
    edge(bumper_pressed, StateId::InstructionBumperHeld),
];

const REPOSITION_BUMPER_HELD: &[Transition] = &[edge(bumper_released, StateId::Repositioning)];

const REPOSITIONING: &[Transition] = &[
    edge(arrived, StateId::AwaitingLoad),
    edge(bumper_pressed, StateId::RepositionConflict),
];

const REPOSITION_CONFLICT: &[Transition] =
    &[edge(bumper_released, StateId::RepositionConflictResolving)];

const REPOSITION_CONFLICT_RESOLVING: &[Transition] = &[Transition {
    guard: timer_expired,
    to: StateId::Repositioning,
    action: Some(confirm),
}];

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // 0: AwaitingLoad
        StateDescriptor {
            id: StateId::AwaitingLoad,
            name: "AwaitingLoad",
            on_enter: Some(awaiting_load_enter),
            on_exit: None,
            on_update: None,
            transitions: AWAITING_LOAD,
        },
        // 1: AwaitingInstruction
        StateDescriptor {
            id: StateId::AwaitingInstruction,
            name: "AwaitingInstruction",
            on_enter: Some(awaiting_instruction_enter),
            on_exit: None,
            on_update: None,
            transitions: AWAITING_INSTRUCTION,
        },
        // 2: ConfirmInstruction
        StateDescriptor {
            id: StateId::ConfirmInstruction,
            name: "ConfirmInstruction",
            on_enter: Some(confirm),
            on_exit: None,
            on_update: None,
            transitions: CONFIRM_INSTRUCTION,
        },
        // 3: InstructionBumperHeld
        StateDescriptor {
            id: StateId::InstructionBumperHeld,
            name: "InstructionBumperHeld",
            on_enter: Some(confirm),
            on_exit: None,
            on_update: None,
            transitions: INSTRUCTION_BUMPER_HELD,
        },
        // 4: Transporting
        StateDescriptor {
            id: StateId::Transporting,
            name: "Transporting",
            on_enter: Some(transporting_enter),
            on_exit: Some(halt),
            on_update: Some(follow_line),
            transitions: TRANSPORTING,
        },
        // 5: TransportConflict
        StateDescriptor {
            id: StateId::TransportConflict,
            name: "TransportConflict",
            on_enter: Some(warn_conflict),
            on_exit: None,
            on_update: None,
            transitions: TRANSPORT_CONFLICT,
        },
        // 6: TransportConflictResolving
        StateDescriptor {
            id: StateId::TransportConflictResolving,
            name: "TransportConflictResolving",
            on_enter: Some(conflict_resolving_enter),
            on_exit: None,
            on_update: None,
            transitions: TRANSPORT_CONFLICT_RESOLVING,
        },
        // 7: PassengerFallen
        StateDescriptor {
            id: StateId::PassengerFallen,
            name: "PassengerFallen",
            on_enter: Some(passenger_fallen_enter),
            on_exit: None,
            on_update: None,
            transitions: PASSENGER_FALLEN,
        },
        // 8: PassengerAbsent
        StateDescriptor {
            id: StateId::PassengerAbsent,
            name: "PassengerAbsent",
            on_enter: Some(passenger_absent_enter),
            on_exit: None,
            on_update: None,
            transitions: PASSENGER_ABSENT,
        },
        // 9: Stopped
        StateDescriptor {
            id: StateId::Stopped,
            name: "Stopped",
            on_enter: Some(stopped_enter),
            on_exit: None,
            on_update: None,
            transitions: STOPPED,
        },
        // 10: RepositionBumperHeld
        StateDescriptor {
            id: StateId::RepositionBumperHeld,
            name: "RepositionBumperHeld",
            on_enter: Some(confirm),
            on_exit: None,
            on_update: None,
            transitions: REPOSITION_BUMPER_HELD,
        },
        // 11: Repositioning
        StateDescriptor {
            id: StateId::Repositioning,
            name: "Repositioning",
            on_enter: Some(repositioning_enter),
            on_exit: Some(halt),
            on_update: Some(follow_line),
            transitions: REPOSITIONING,
        },
        // 12: RepositionConflict
        StateDescriptor {
            id: StateId::RepositionConflict,
            name: "RepositionConflict",
            on_enter: Some(warn_conflict),
            on_exit: None,
            on_update: None,
            transitions: REPOSITION_CONFLICT,
        },
        // 13: RepositionConflictResolving
        StateDescriptor {
            id: StateId::RepositionConflictResolving,
            name: "RepositionConflictResolving",
            on_enter: Some(conflict_resolving_enter),
            on_exit: None,
            on_update: None,
            transitions: REPOSITION_CONFLICT_RESOLVING,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  Shared actions
// ═══════════════════════════════════════════════════════════════════════════

fn confirm(ctx: &mut FsmContext) {
    ctx.signal(Signal::Confirmation);
}

fn warn_conflict(ctx: &mut FsmContext) {
    ctx.signal(Signal::Warning);
    warn!("CONFLICT: bumper pressed while driving, holding position");
}

fn follow_line(ctx: &mut FsmContext) {
    ctx.follow_line();
}

fn halt(ctx: &mut FsmContext) {
    ctx.halt_tracer();
}

// ═══════════════════════════════════════════════════════════════════════════
//  Loading and instruction
// ═══════════════════════════════════════════════════════════════════════════

fn awaiting_load_enter(_ctx: &mut FsmContext) {
    info!("AWAITING_LOAD: waiting for a passenger or a reposition request");
}

fn awaiting_instruction_enter(ctx: &mut FsmContext) {
    ctx.start_timer(ctx.config.instruction_wait_units);
    info!(
        "AWAITING_INSTRUCTION: press bumper to depart (reminder in {} units)",
        ctx.config.instruction_wait_units
    );
}

// ═══════════════════════════════════════════════════════════════════════════
//  Transport
// ═══════════════════════════════════════════════════════════════════════════

fn transporting_enter(ctx: &mut FsmContext) {
    ctx.start_timer(ctx.config.transit_min_units);
    info!(
        "TRANSPORTING: following line at {}%",
        ctx.config.drive_power_percent
    );
}

fn conflict_resolving_enter(ctx: &mut FsmContext) {
    ctx.start_timer(ctx.config.conflict_resolve_units);
    info!(
        "CONFLICT_RESOLVING: resuming in {} units",
        ctx.config.conflict_resolve_units
    );
}

fn passenger_fallen_enter(ctx: &mut FsmContext) {
    ctx.start_timer(ctx.config.fallen_grace_units);
    warn!(
        "PASSENGER_FALLEN: seat empty mid-ride, waiting {} units",
        ctx.config.fallen_grace_units
    );
}

fn passenger_absent_enter(ctx: &mut FsmContext) {
    ctx.signal(Signal::Warning);
    warn!("PASSENGER_ABSENT: passenger still missing");
}

fn stopped_enter(_ctx: &mut FsmContext) {
    info!("STOPPED: arrived at drop-off");
}

// ═══════════════════════════════════════════════════════════════════════════
//  Repositioning
// ═══════════════════════════════════════════════════════════════════════════

fn repositioning_enter(ctx: &mut FsmContext) {
    ctx.start_timer(ctx.config.transit_min_units);
    info!("REPOSITIONING: returning empty to boarding point");
}
