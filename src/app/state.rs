//! The single mutable record threaded through every control tick.
//!
//! Owned exclusively by [`ControlLoop`](super::service::ControlLoop) and
//! mutated only from its `tick`. Tests may build one directly to start
//! the loop from an arbitrary point in its history.

use crate::pins::Level;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemState {
    /// Last plausible temperature sample (°C).
    pub current_temperature_c: f32,
    /// Hysteresis-filtered freeze flag.
    pub is_frozen: bool,
    /// When a prime sequence last started (ms since boot).
    pub time_of_last_prime: u32,
    /// When the drain input was last asserted, or a manual trigger ran.
    pub time_of_last_drain_active: u32,
    /// When the temperature was last sampled.
    pub time_of_last_temp_check: u32,
    /// Current idle backoff interval (ms).
    pub retry_delay_ms: u32,
    /// Level the status LED is written with on the next tick.
    pub indicator_phase: Level,
}

impl SystemState {
    /// State for a fresh boot at `now`.
    ///
    /// The temperature-check timestamp is backdated by one read interval
    /// so the first tick samples again immediately.
    pub fn at_boot(
        now: u32,
        temperature_c: f32,
        is_frozen: bool,
        retry_delay_ms: u32,
        temp_read_interval_ms: u32,
    ) -> Self {
        Self {
            current_temperature_c: temperature_c,
            is_frozen,
            time_of_last_prime: now,
            time_of_last_drain_active: now,
            time_of_last_temp_check: now.wrapping_sub(temp_read_interval_ms),
            retry_delay_ms,
            indicator_phase: Level::Low,
        }
    }
}
