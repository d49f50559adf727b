//! Fuzz target: controller under arbitrary sensor sequences
//!
//! Every 4 input bytes become one tick: a time step, the two touch
//! sensors, a wall distance and a reflectance reading.  Checks:
//! - No panics, whatever the sensors report
//! - At most one steering command per tick, only while driving
//!
//! cargo fuzz run fuzz_controller

#![no_main]

use libfuzzer_sys::fuzz_target;
use porter::config::PorterConfig;
use porter::fsm::StateId;
use porter::fsm::context::{ActuatorCommand, SensorSnapshot};
use porter::fsm::controller::PorterController;

fuzz_target!(|data: &[u8]| {
    let mut c = PorterController::new(PorterConfig::default());
    let mut now: u64 = 0;

    for chunk in data.chunks_exact(4) {
        now += u64::from(chunk[0]) * 50;
        let snap = SensorSnapshot {
            occupied: chunk[1] & 1 != 0,
            bumper_pressed: chunk[1] & 2 != 0,
            wall_distance_cm: u16::from(chunk[2]),
            reflectance: chunk[3] % 101,
        };
        let cmds = c.advance(now, snap);

        let steers = cmds
            .iter()
            .filter(|cmd| matches!(cmd, ActuatorCommand::Drive { .. }))
            .count();
        let driving = matches!(c.state(), StateId::Transporting | StateId::Repositioning);
        assert!(steers <= 1);
        assert_eq!(steers == 1, driving);
    }
});
