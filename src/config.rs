//! System configuration parameters
//!
//! All tunable parameters for the SmartDrain controller. There is no
//! persistence: the compiled-in defaults are used on every boot.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const SECOND_MS: u32 = 1000;
pub const MINUTE_MS: u32 = 60 * SECOND_MS;
pub const HOUR_MS: u32 = 60 * MINUTE_MS;
pub const DAY_MS: u32 = 24 * HOUR_MS;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrainConfig {
    // --- Freeze detection ---
    /// Below this the line is considered frozen (°C)
    pub lower_freeze_cutoff_c: f32,
    /// Above this the line is considered thawed (°C)
    pub upper_freeze_cutoff_c: f32,
    /// Readings below this are treated as sensor faults (°C)
    pub min_plausible_temp_c: f32,
    /// Readings above this are treated as sensor faults (°C)
    pub max_plausible_temp_c: f32,
    /// Minimum interval between temperature samples (ms)
    pub temp_read_interval_ms: u32,
    /// Delay before every temperature read attempt (ms)
    pub temp_retry_delay_ms: u32,

    // --- Re-prime scheduling ---
    /// Shortest idle backoff, and the value draining resets to (ms)
    pub initial_retry_delay_ms: u32,
    /// Longest idle backoff (ms)
    pub max_retry_delay_ms: u32,
    /// Idle backoff right after power-on (ms)
    pub startup_retry_delay_ms: u32,
    /// Fixed re-prime interval while draining (ms)
    pub drain_retry_delay_ms: u32,

    // --- Prime sequence ---
    /// Readiness must hold HIGH this long before a pump is started (ms)
    pub ready_hold_ms: u32,
    /// Budget for the readiness wait (ms)
    pub ready_timeout_ms: u32,
    /// Readiness must hold LOW this long for the prime to count (ms)
    pub complete_hold_ms: u32,
    /// Budget for the completion wait (ms)
    pub complete_timeout_ms: u32,

    // --- Maintenance sequences ---
    /// How long each pump runs during a flush (ms)
    pub flush_step_ms: u32,
    /// Pause at the end of a prime or flush sequence (ms)
    pub sequence_settle_ms: u32,
}

impl Default for DrainConfig {
    fn default() -> Self {
        Self {
            // Freeze detection
            lower_freeze_cutoff_c: 1.0,
            upper_freeze_cutoff_c: 1.5,
            min_plausible_temp_c: -50.0,
            max_plausible_temp_c: 50.0,
            temp_read_interval_ms: 30 * SECOND_MS,
            temp_retry_delay_ms: SECOND_MS,

            // Re-prime scheduling
            initial_retry_delay_ms: HOUR_MS,
            max_retry_delay_ms: 7 * DAY_MS,
            startup_retry_delay_ms: 7 * DAY_MS,
            drain_retry_delay_ms: HOUR_MS,

            // Prime sequence
            ready_hold_ms: 5 * SECOND_MS,
            ready_timeout_ms: 30 * SECOND_MS,
            complete_hold_ms: 10 * SECOND_MS,
            complete_timeout_ms: 60 * SECOND_MS,

            // Maintenance sequences
            flush_step_ms: SECOND_MS,
            sequence_settle_ms: SECOND_MS,
        }
    }
}

impl DrainConfig {
    /// Reject parameter combinations the control loop cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.lower_freeze_cutoff_c.is_nan() || self.upper_freeze_cutoff_c.is_nan() {
            return Err(Error::Config("freeze cutoffs must be numbers"));
        }
        if self.lower_freeze_cutoff_c >= self.upper_freeze_cutoff_c {
            return Err(Error::Config("lower freeze cutoff must be below upper cutoff"));
        }
        if self.min_plausible_temp_c >= self.max_plausible_temp_c {
            return Err(Error::Config("plausible temperature range is empty"));
        }
        if self.upper_freeze_cutoff_c > self.max_plausible_temp_c
            || self.lower_freeze_cutoff_c < self.min_plausible_temp_c
        {
            return Err(Error::Config("freeze cutoffs outside plausible range"));
        }
        if self.initial_retry_delay_ms == 0 {
            return Err(Error::Config("initial retry delay must be non-zero"));
        }
        if self.initial_retry_delay_ms > self.max_retry_delay_ms {
            return Err(Error::Config("initial retry delay exceeds maximum"));
        }
        if !(self.initial_retry_delay_ms..=self.max_retry_delay_ms)
            .contains(&self.startup_retry_delay_ms)
        {
            return Err(Error::Config("startup retry delay outside backoff bounds"));
        }
        if self.drain_retry_delay_ms == 0 || self.temp_read_interval_ms == 0 {
            return Err(Error::Config("intervals must be non-zero"));
        }
        if self.ready_hold_ms > self.ready_timeout_ms {
            return Err(Error::Config("ready hold longer than its timeout"));
        }
        if self.complete_hold_ms > self.complete_timeout_ms {
            return Err(Error::Config("completion hold longer than its timeout"));
        }
        Ok(())
    }
}
