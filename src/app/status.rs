//! Status line reporting.
//!
//! One JSON object per line on the command channel:
//!
//! ```text
//! {"currentTemperature":3.5,"isFrozen":false,"currentTime":120000,
//!  "timeOfLastPrime":0,"timeOfLastDrain":0,"timeOfNextPrime":3600000,
//!  "isDraining":false,"message":"Online"}
//! ```
//!
//! `currentTime` and `isDraining` are read fresh when the line is built,
//! so a line emitted mid-sequence reflects the clock and drain sensor at
//! that moment rather than at the start of the tick.

use log::warn;
use serde::{Deserialize, Serialize};

use super::ports::{ClockPort, CommandChannel, GpioPort};
use super::state::SystemState;
use crate::control::retry::DrainRetryScheduler;
use crate::pins::InputPin;

/// Short state label carried in every status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusMessage {
    Online,
    Priming,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLine {
    pub current_temperature: f32,
    pub is_frozen: bool,
    pub current_time: u32,
    pub time_of_last_prime: u32,
    pub time_of_last_drain: u32,
    pub time_of_next_prime: u32,
    pub is_draining: bool,
    pub message: StatusMessage,
}

impl StatusLine {
    /// Parse one line as received by the host-side relay.
    pub fn parse(line: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(line.trim())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatusReporter {
    scheduler: DrainRetryScheduler,
}

impl StatusReporter {
    pub fn new(scheduler: DrainRetryScheduler) -> Self {
        Self { scheduler }
    }

    /// Build a snapshot of `state` with the live clock and drain level.
    pub fn snapshot<H>(&self, hw: &mut H, state: &SystemState, message: StatusMessage) -> StatusLine
    where
        H: ClockPort + GpioPort,
    {
        let is_draining = hw.is_asserted(InputPin::Drain);
        StatusLine {
            current_temperature: state.current_temperature_c,
            is_frozen: state.is_frozen,
            current_time: hw.now_ms(),
            time_of_last_prime: state.time_of_last_prime,
            time_of_last_drain: state.time_of_last_drain_active,
            time_of_next_prime: self.scheduler.time_of_next_prime(state, is_draining),
            is_draining,
            message,
        }
    }

    /// Build and send one status line. Failures are logged and dropped.
    pub fn report<H>(&self, hw: &mut H, state: &SystemState, message: StatusMessage)
    where
        H: ClockPort + GpioPort + CommandChannel,
    {
        let line = self.snapshot(hw, state, message);
        match line.to_json() {
            Ok(json) => {
                if let Err(e) = hw.write_line(&json) {
                    warn!("Status line dropped: {}", e);
                }
            }
            Err(e) => warn!("Status line encode failed: {}", e),
        }
    }
}
