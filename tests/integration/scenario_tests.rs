//! End-to-end ride scenarios through `PorterService` with mock hardware.

use porter::app::events::AppEvent;
use porter::app::service::SERVICE_TITLE;
use porter::fsm::StateId;
use porter::fsm::context::Signal;

use crate::mock_hw::{ActuatorCall, Rig, UNIT_MS};

// ── Startup ───────────────────────────────────────────────────

#[test]
fn starts_waiting_for_a_load() {
    let rig = Rig::new();
    assert_eq!(rig.app.state(), StateId::AwaitingLoad);
    assert_eq!(rig.hw.title.as_deref(), Some(SERVICE_TITLE));
    assert_eq!(rig.hw.display, vec![StateId::AwaitingLoad]);
    assert!(rig.hw.calls.is_empty());
    assert_eq!(rig.sink.events, vec![AppEvent::Started(StateId::AwaitingLoad)]);
}

// ── Scenario A: load, press, release ──────────────────────────

#[test]
fn load_and_dispatch() {
    let mut rig = Rig::new();

    rig.occupied(true);
    assert_eq!(rig.tick(), StateId::AwaitingInstruction);
    assert!(rig.app.just_entered());

    rig.bumper(true);
    assert_eq!(rig.tick(), StateId::InstructionBumperHeld);
    assert_eq!(rig.hw.signals(), vec![Signal::Confirmation]);

    // Holding the bumper keeps the porter parked.
    assert_eq!(rig.tick(), StateId::InstructionBumperHeld);
    assert!(!rig.app.just_entered());
    assert!(!rig.hw.motors_running());

    rig.bumper(false);
    assert_eq!(rig.tick(), StateId::Transporting);
    // Entry and the first steering command land in the same tick.
    // Default reflectance is bright, so only the left motor drives.
    assert_eq!(
        rig.hw.calls.last(),
        Some(&ActuatorCall::SetDrive { left: 20, right: 0 })
    );

    assert_eq!(
        rig.sink.transitions(),
        vec![
            (StateId::AwaitingLoad, StateId::AwaitingInstruction),
            (StateId::AwaitingInstruction, StateId::InstructionBumperHeld),
            (StateId::InstructionBumperHeld, StateId::Transporting),
        ]
    );
}

#[test]
fn dark_line_swaps_the_driven_motor() {
    let mut rig = Rig::new();
    rig.dispatch();
    rig.hw.sensors.reflectance = 5;
    rig.tick();
    assert_eq!(
        rig.hw.calls.last(),
        Some(&ActuatorCall::SetDrive { left: 0, right: 20 })
    );
}

#[test]
fn unanswered_instruction_sounds_a_reminder() {
    let mut rig = Rig::new();
    rig.occupied(true);
    rig.tick();
    assert_eq!(rig.tick_after(5 * UNIT_MS), StateId::ConfirmInstruction);
    assert_eq!(rig.hw.signals(), vec![Signal::Confirmation]);
    assert_eq!(rig.tick(), StateId::AwaitingInstruction);
    // A fresh wait starts on re-entry.
    assert_eq!(rig.tick_after(5 * UNIT_MS - 1), StateId::AwaitingInstruction);
    assert_eq!(rig.tick_after(1), StateId::ConfirmInstruction);
}

// ── Scenario B: manual conflict mid-transport ────────────────

#[test]
fn conflict_during_transport_resolves_after_wait() {
    let mut rig = Rig::new();
    rig.dispatch();
    rig.clear_calls();

    rig.bumper(true);
    assert_eq!(rig.tick(), StateId::TransportConflict);
    // Halt on leaving Transporting comes before the warning.
    assert_eq!(
        rig.hw.calls,
        vec![ActuatorCall::StopDrive, ActuatorCall::Sound(Signal::Warning)]
    );

    rig.bumper(false);
    assert_eq!(rig.tick(), StateId::TransportConflictResolving);
    assert_eq!(rig.tick_after(5 * UNIT_MS - 1), StateId::TransportConflictResolving);

    rig.clear_calls();
    assert_eq!(rig.tick_after(1), StateId::Transporting);
    assert_eq!(rig.hw.calls[0], ActuatorCall::Sound(Signal::Confirmation));
    assert!(matches!(rig.hw.calls[1], ActuatorCall::SetDrive { .. }));
    assert_eq!(rig.hw.calls.len(), 2);
}

#[test]
fn conflict_waits_for_bumper_release() {
    let mut rig = Rig::new();
    rig.dispatch();
    rig.bumper(true);
    rig.tick();
    assert_eq!(rig.tick_after(60 * UNIT_MS), StateId::TransportConflict);
}

// ── Scenario C: passenger leaves mid-transport ────────────────

#[test]
fn passenger_sits_back_down_in_time() {
    let mut rig = Rig::new();
    rig.dispatch();

    rig.occupied(false);
    assert_eq!(rig.tick(), StateId::PassengerFallen);
    assert!(!rig.hw.motors_running());

    rig.occupied(true);
    assert_eq!(rig.tick_after(3 * UNIT_MS), StateId::AwaitingInstruction);
    assert!(rig.hw.signals().iter().all(|s| *s == Signal::Confirmation));
}

#[test]
fn absent_passenger_warns_repeatedly() {
    let mut rig = Rig::new();
    rig.dispatch();

    rig.occupied(false);
    rig.tick();
    let before = rig.hw.signals().len();

    assert_eq!(rig.tick_after(5 * UNIT_MS), StateId::PassengerAbsent);
    assert_eq!(rig.hw.signals().len(), before + 1);
    assert_eq!(rig.hw.signals().last(), Some(&Signal::Warning));

    // Straight back to waiting, with a fresh grace period.
    assert_eq!(rig.tick(), StateId::PassengerFallen);
    assert_eq!(rig.tick_after(5 * UNIT_MS - 1), StateId::PassengerFallen);
    assert_eq!(rig.tick_after(1), StateId::PassengerAbsent);
    assert_eq!(rig.hw.signals().len(), before + 2);

    rig.occupied(true);
    assert_eq!(rig.tick(), StateId::PassengerFallen);
    assert_eq!(rig.tick(), StateId::AwaitingInstruction);
}

// ── Scenario D: arrival and unloading ─────────────────────────

#[test]
fn wall_alone_does_not_stop_a_fresh_transport() {
    let mut rig = Rig::new();
    rig.dispatch();
    rig.wall_cm(5);
    assert_eq!(rig.tick(), StateId::Transporting);
    assert_eq!(rig.tick_after(3 * UNIT_MS - 1), StateId::Transporting);
    assert_eq!(rig.tick_after(1), StateId::Stopped);
    assert_eq!(rig.hw.calls.last(), Some(&ActuatorCall::StopDrive));
}

#[test]
fn wall_at_threshold_is_not_detected() {
    let mut rig = Rig::new();
    rig.dispatch();
    rig.wall_cm(10);
    assert_eq!(rig.tick_after(10 * UNIT_MS), StateId::Transporting);
    rig.wall_cm(9);
    assert_eq!(rig.tick(), StateId::Stopped);
}

#[test]
fn arrival_then_unload() {
    let mut rig = Rig::new();
    rig.dispatch();
    rig.wall_cm(3);
    assert_eq!(rig.tick_after(3 * UNIT_MS), StateId::Stopped);

    rig.occupied(false);
    assert_eq!(rig.tick(), StateId::AwaitingLoad);
}

#[test]
fn arrival_then_dispatch_again() {
    let mut rig = Rig::new();
    rig.dispatch();
    rig.wall_cm(3);
    rig.tick_after(3 * UNIT_MS);
    let before = rig.hw.signals().len();

    rig.bumper(true);
    assert_eq!(rig.tick(), StateId::InstructionBumperHeld);
    assert_eq!(rig.hw.signals().len(), before + 1);
    assert_eq!(rig.hw.signals().last(), Some(&Signal::Confirmation));
}

// ── Repositioning ─────────────────────────────────────────────

#[test]
fn empty_porter_repositions_to_the_wall() {
    let mut rig = Rig::new();
    rig.bumper(true);
    assert_eq!(rig.tick(), StateId::Repositioning);
    assert!(rig.hw.motors_running());

    rig.bumper(false);
    rig.wall_cm(4);
    assert_eq!(rig.tick_after(3 * UNIT_MS), StateId::AwaitingLoad);
    assert!(!rig.hw.motors_running());
}

#[test]
fn held_bumper_while_repositioning_is_a_conflict() {
    let mut rig = Rig::new();
    rig.bumper(true);
    rig.tick();
    assert_eq!(rig.tick(), StateId::RepositionConflict);
    assert_eq!(rig.hw.signals(), vec![Signal::Warning]);

    rig.bumper(false);
    assert_eq!(rig.tick(), StateId::RepositionConflictResolving);
    assert_eq!(rig.tick_after(5 * UNIT_MS), StateId::Repositioning);
    assert_eq!(
        rig.hw.signals(),
        vec![Signal::Warning, Signal::Confirmation]
    );
}

// ── Idempotence ───────────────────────────────────────────────

#[test]
fn quiet_ticks_change_nothing() {
    let mut rig = Rig::new();
    for _ in 0..50 {
        assert_eq!(rig.tick_after(100), StateId::AwaitingLoad);
    }
    assert!(rig.hw.calls.is_empty());

    rig.occupied(true);
    rig.tick();
    for _ in 0..49 {
        assert_eq!(rig.tick_after(100), StateId::AwaitingInstruction);
    }
    assert_eq!(rig.sink.transitions().len(), 1);
}

#[test]
fn display_tracks_the_state_each_tick() {
    let mut rig = Rig::new();
    rig.occupied(true);
    rig.tick();
    rig.tick();
    rig.tick();
    assert_eq!(
        rig.hw.display,
        vec![
            StateId::AwaitingLoad,
            StateId::AwaitingLoad,
            StateId::AwaitingInstruction,
            StateId::AwaitingInstruction,
        ]
    );
}
