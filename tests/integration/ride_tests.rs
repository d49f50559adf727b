//! Full rides against the simulated track, in virtual time.

use porter::adapters::sim::{RidePhase, SimulatedTrack, TRACK_LENGTH_CM};
use porter::adapters::time::ManualClock;
use porter::app::service::PorterService;
use porter::config::PorterConfig;
use porter::fsm::StateId;
use porter::fsm::context::Signal;

use crate::mock_hw::RecordingSink;

const LIMIT_MS: u64 = 120_000;

/// Run until the scripted ride completes or the time limit passes.
fn ride(config: PorterConfig) -> (PorterService, SimulatedTrack, RecordingSink, u64) {
    let interval = config.control_loop_interval_ms;
    let clock = ManualClock::new();
    let mut track = SimulatedTrack::new();
    let mut sink = RecordingSink::default();
    let mut app = PorterService::new(config);
    app.start(&mut track, &mut sink);

    let mut elapsed = 0;
    while !track.is_finished() && elapsed < LIMIT_MS {
        app.tick(&mut track, &clock, &mut sink);
        clock.advance_ms(u64::from(interval));
        track.step(interval);
        elapsed += u64::from(interval);
    }
    (app, track, sink, elapsed)
}

#[test]
fn scripted_ride_completes() {
    let (app, track, sink, elapsed) = ride(PorterConfig::default());

    assert_eq!(track.phase(), RidePhase::Done, "stuck after {} ms", elapsed);
    assert_eq!(app.state(), StateId::AwaitingLoad);
    assert!(!track.is_moving());
    // Out and back, short of each wall by less than the stopping distance.
    assert!(track.travelled_cm() > 2.0 * (TRACK_LENGTH_CM - 30.0));
    assert_eq!(track.signals(), &[Signal::Confirmation]);

    let visited: Vec<StateId> = sink.transitions().into_iter().map(|(_, to)| to).collect();
    assert_eq!(
        visited,
        vec![
            StateId::AwaitingInstruction,
            StateId::InstructionBumperHeld,
            StateId::Transporting,
            StateId::Stopped,
            StateId::AwaitingLoad,
            StateId::Repositioning,
            StateId::AwaitingLoad,
        ]
    );
}

#[test]
fn faster_drive_shortens_the_ride() {
    let (_, _, _, slow) = ride(PorterConfig::default());
    let mut fast = PorterConfig::default();
    fast.drive_power_percent = 40;
    let (_, track, _, quick) = ride(fast);
    assert!(track.is_finished());
    assert!(quick < slow);
}
