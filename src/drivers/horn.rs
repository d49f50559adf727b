//! Horn driver with a non-blocking beep pattern engine.
//!
//! The control loop never waits on the horn.  [`Horn::sound`] only arms a
//! pattern; the host loop calls [`Horn::poll`] with the elapsed time and
//! the engine switches the output pin on and off.
//!
//! ## Patterns
//!
//! | Signal       | Shape                          | Length |
//! |--------------|--------------------------------|--------|
//! | Confirmation | one short beep                 | 150 ms |
//! | Warning      | three beeps, 100 ms gaps       | 650 ms |
//!
//! A new signal replaces whatever is still playing.

use embedded_hal::digital::OutputPin;

use crate::error::{ActuatorError, Result};
use crate::fsm::context::Signal;

const BEEP_MS: u32 = 150;
const GAP_MS: u32 = 100;

/// Alternating on/off segment lengths, starting with "on".
const CONFIRMATION: &[u32] = &[BEEP_MS];
const WARNING: &[u32] = &[BEEP_MS, GAP_MS, BEEP_MS, GAP_MS, BEEP_MS];

fn pattern_for(signal: Signal) -> &'static [u32] {
    match signal {
        Signal::Confirmation => CONFIRMATION,
        Signal::Warning => WARNING,
    }
}

/// Beep pattern engine. Stack-allocated, no heap.
#[derive(Debug, Default)]
pub struct HornPatternEngine {
    active: Option<&'static [u32]>,
    elapsed_ms: u32,
}

impl HornPatternEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `signal` from its first beep.
    pub fn start(&mut self, signal: Signal) {
        self.active = Some(pattern_for(signal));
        self.elapsed_ms = 0;
    }

    /// Advance the pattern and return whether the horn should sound.
    pub fn tick(&mut self, delta_ms: u32) -> bool {
        if self.active.is_some() {
            self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        }
        self.output()
    }

    /// Horn level at the current position, without advancing.
    pub fn output(&mut self) -> bool {
        let Some(pattern) = self.active else {
            return false;
        };
        let mut edge = 0u32;
        for (i, segment) in pattern.iter().enumerate() {
            edge += segment;
            if self.elapsed_ms < edge {
                return i % 2 == 0;
            }
        }
        // Pattern finished.
        self.active = None;
        false
    }

    pub fn is_playing(&self) -> bool {
        self.active.is_some()
    }
}

/// Horn on a digital output (high = sounding).
pub struct Horn<P> {
    pin: P,
    engine: HornPatternEngine,
    level: bool,
}

impl<P: OutputPin> Horn<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            engine: HornPatternEngine::new(),
            level: false,
        }
    }

    /// Arm `signal` and drive the first beep immediately.
    pub fn sound(&mut self, signal: Signal) -> Result<()> {
        self.engine.start(signal);
        let on = self.engine.output();
        self.drive(on)
    }

    /// Advance the pattern by `delta_ms` and update the pin if needed.
    pub fn poll(&mut self, delta_ms: u32) -> Result<()> {
        let on = self.engine.tick(delta_ms);
        self.drive(on)
    }

    pub fn is_sounding(&self) -> bool {
        self.level
    }

    pub fn is_playing(&self) -> bool {
        self.engine.is_playing()
    }

    fn drive(&mut self, on: bool) -> Result<()> {
        if on == self.level {
            return Ok(());
        }
        let res = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        res.map_err(|_| ActuatorError::GpioWriteFailed)?;
        self.level = on;
        Ok(())
    }
}
