//! Single-deadline countdown timer.
//!
//! Holds at most one outstanding deadline.  Expiry is a derived query:
//! once the deadline passes, [`CountdownTimer::is_expired`] keeps
//! returning `true` on every call until the timer is re-armed with
//! [`CountdownTimer::start`].  Several porter states poll it across many
//! ticks, so it must never clear itself.

/// Countdown timer over a millisecond timebase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountdownTimer {
    /// Absolute expiry instant (ms).  `None` until first armed.
    deadline_ms: Option<u64>,
}

impl CountdownTimer {
    pub const fn new() -> Self {
        Self { deadline_ms: None }
    }

    /// Arm a deadline `duration_ms` after `now_ms`, replacing any previous one.
    pub fn start(&mut self, now_ms: u64, duration_ms: u32) {
        self.deadline_ms = Some(now_ms.saturating_add(duration_ms as u64));
    }

    /// `true` iff armed and `now_ms` is at or past the deadline.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.deadline_ms.is_some_and(|deadline| now_ms >= deadline)
    }

    pub fn is_armed(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Milliseconds until expiry; `None` when never armed, `Some(0)` once expired.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.deadline_ms
            .map(|deadline| deadline.saturating_sub(now_ms))
    }

    /// Drop the deadline.  Only used when the whole controller is reset.
    pub fn disarm(&mut self) {
        self.deadline_ms = None;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn expiry_is_monotonic(start in 0u64..1_000_000, dur in 0u32..100_000, probes in proptest::collection::vec(0u64..2_000_000, 1..50)) {
            let mut t = CountdownTimer::new();
            t.start(start, dur);
            let mut sorted = probes;
            sorted.sort_unstable();
            let mut seen_expired = false;
            for now in sorted {
                let expired = t.is_expired(now);
                prop_assert!(!(seen_expired && !expired), "expiry must never revert");
                prop_assert_eq!(expired, now >= start + dur as u64);
                seen_expired |= expired;
            }
        }
    }
}
