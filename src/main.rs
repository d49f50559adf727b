//! porter-sim: runs the porter controller against a simulated track.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │                                                          │
//! │  SimulatedTrack     LogEventSink   JsonConfigFile        │
//! │  (Sensor+Actuator)  (EventSink)    (ConfigPort)          │
//! │  ManualClock (ClockPort, virtual time)                   │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │        PorterService (pure logic)              │      │
//! │  │  FSM · Countdown · LineTracer                  │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `porter-sim [config.json]`.  Log level follows `RUST_LOG`
//! (default `info`).

#![deny(unused_must_use)]

use std::env;

use anyhow::{Context, Result, bail};
use log::{info, warn};

use porter::adapters::config_store::JsonConfigFile;
use porter::adapters::log_sink::LogEventSink;
use porter::adapters::sim::SimulatedTrack;
use porter::adapters::time::ManualClock;
use porter::app::events::AppEvent;
use porter::app::ports::{ClockPort, ConfigPort, EventSink};
use porter::app::service::PorterService;
use porter::config::PorterConfig;

/// Virtual time after which an unfinished ride is abandoned.
const TIME_LIMIT_MS: u64 = 5 * 60 * 1000;

/// Telemetry cadence in virtual time.
const TELEMETRY_INTERVAL_MS: u64 = 1_000;

fn load_config() -> Result<PorterConfig> {
    let Some(path) = env::args().nth(1) else {
        info!("no config file given, using defaults");
        return Ok(PorterConfig::default());
    };
    let source = JsonConfigFile::new(path);
    source
        .load()
        .with_context(|| format!("loading {}", source.path().display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("porter-sim v{} starting", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    let interval_ms = config.control_loop_interval_ms;
    info!(
        "power={}% unit={}ms loop={}ms",
        config.drive_power_percent, config.time_unit_ms, interval_ms
    );

    let clock = ManualClock::new();
    let mut track = SimulatedTrack::new();
    let mut sink = LogEventSink::new();
    let mut app = PorterService::new(config);

    app.start(&mut track, &mut sink);

    let mut next_telemetry_ms = 0;
    while !track.is_finished() {
        let now = clock.now_ms();
        if now >= TIME_LIMIT_MS {
            warn!("ride stuck in {:?} ({:?})", track.phase(), app.state());
            bail!("ride did not finish within {} s of virtual time", TIME_LIMIT_MS / 1000);
        }

        app.tick(&mut track, &clock, &mut sink);

        if now >= next_telemetry_ms {
            sink.emit(&AppEvent::Telemetry(app.build_telemetry()));
            next_telemetry_ms = now + TELEMETRY_INTERVAL_MS;
        }

        clock.advance_ms(u64::from(interval_ms));
        track.step(interval_ms);
    }

    info!(
        "ride complete after {:.1} s virtual time, {} ticks, {:.0} cm travelled, {} signals",
        clock.now_ms() as f64 / 1000.0,
        app.tick_count(),
        track.travelled_cm(),
        track.signals().len()
    );
    Ok(())
}
