//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them; on the device they become tagged log lines.

use crate::control::retry::RetryPolicy;
use crate::drivers::pump::PumpSelector;

/// What asked for an on-demand prime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Button,
    Command,
}

/// Structured events emitted by the control loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppEvent {
    /// Boot completed with the first plausible temperature.
    Started { temperature_c: f32, frozen: bool },

    /// The hysteresis-filtered freeze flag changed.
    FreezeChanged { frozen: bool, temperature_c: f32 },

    /// A freeze-protection flush ran to completion.
    FlushCompleted,

    /// One pump went through the readiness handshake.
    PrimeAttempted { pump: PumpSelector, primed: bool },

    /// Button press or `d` command.
    ManualTrigger(TriggerSource),

    /// The retry scheduler fired a re-prime.
    RetryFired { policy: RetryPolicy, next_delay_ms: u32 },
}
