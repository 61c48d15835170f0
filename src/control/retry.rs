//! Re-prime scheduling.
//!
//! Two policies, picked every tick from the live drain-sensor level:
//!
//! | Policy   | Due when                                  | On fire                         |
//! |----------|-------------------------------------------|---------------------------------|
//! | Draining | `now - last_prime > drain_retry_delay`    | reset `last_prime`              |
//! | Idle     | `now - last_drain_active > retry_delay`   | reset `last_prime`, double delay|
//!
//! Idle re-priming is suppressed while frozen. Any tick that sees the drain
//! asserted re-arms the backoff at its minimum, so the next dry spell
//! starts retrying aggressively again.

use crate::app::state::SystemState;
use crate::config::DrainConfig;

/// Which policy governs this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    Draining,
    Idle,
}

impl RetryPolicy {
    pub fn for_drain(draining: bool) -> Self {
        if draining { Self::Draining } else { Self::Idle }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DrainRetryScheduler {
    initial_delay_ms: u32,
    max_delay_ms: u32,
    drain_delay_ms: u32,
}

impl DrainRetryScheduler {
    pub fn new(initial_delay_ms: u32, max_delay_ms: u32, drain_delay_ms: u32) -> Self {
        Self {
            initial_delay_ms,
            max_delay_ms,
            drain_delay_ms,
        }
    }

    pub fn from_config(config: &DrainConfig) -> Self {
        Self::new(
            config.initial_retry_delay_ms,
            config.max_retry_delay_ms,
            config.drain_retry_delay_ms,
        )
    }

    /// Draining (or a manual trigger) was seen at `now`: re-arm the backoff.
    pub fn note_drain_activity(&self, state: &mut SystemState, now: u32) {
        state.time_of_last_drain_active = now;
        state.retry_delay_ms = self.initial_delay_ms;
    }

    /// Whether a re-prime is due under `policy`.
    pub fn is_due(&self, policy: RetryPolicy, state: &SystemState, now: u32) -> bool {
        match policy {
            RetryPolicy::Draining => {
                now.wrapping_sub(state.time_of_last_prime) > self.drain_delay_ms
            }
            RetryPolicy::Idle => {
                !state.is_frozen
                    && now.wrapping_sub(state.time_of_last_drain_active) > state.retry_delay_ms
            }
        }
    }

    /// Backoff after an idle re-prime: double, clamp high, clamp low.
    ///
    /// The low clamp also repairs a delay that was somehow below the
    /// minimum, or that the shift overflowed to zero.
    pub fn next_delay(&self, current_ms: u32) -> u32 {
        let mut next = current_ms << 1;
        if next > self.max_delay_ms {
            next = self.max_delay_ms;
        } else if next < self.initial_delay_ms {
            next = self.initial_delay_ms;
        }
        next
    }

    /// When the next re-prime is expected, for the status line.
    pub fn time_of_next_prime(&self, state: &SystemState, draining: bool) -> u32 {
        let delay = if draining {
            self.drain_delay_ms
        } else {
            state.retry_delay_ms
        };
        state.time_of_last_prime.wrapping_add(delay)
    }
}
