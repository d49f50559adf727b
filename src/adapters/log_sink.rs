//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade.  Whatever logger the host installs decides where
//! the lines end up.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] as one line.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} ({} ticks) | seat={} bumper={} | \
                     wall={}cm refl={} | timer={}",
                    t.state,
                    t.ticks_in_state,
                    if t.occupied { "TAKEN" } else { "EMPTY" },
                    if t.bumper_pressed { "DOWN" } else { "UP" },
                    t.wall_distance_cm,
                    t.reflectance,
                    match t.timer_remaining_ms {
                        Some(ms) => format!("{}ms", ms),
                        None => "idle".to_owned(),
                    },
                );
            }
            AppEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            AppEvent::SignalEmitted(signal) => {
                info!("SIGNAL | {:?}", signal);
            }
            AppEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
