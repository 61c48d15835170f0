//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (clock, GPIO, temperature probe, serial channel, event
//! sinks) implement these traits. The [`ControlLoop`](super::service::ControlLoop)
//! consumes them via generics, so the domain core never touches hardware
//! directly and tests can drive it with simulated time.

use embedded_hal::delay::DelayNs;

use crate::error::{CommsError, SensorError};
use crate::pins::{InputPin, Level, OutputPin};

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock with blocking delays.
///
/// The counter is a `u32` and wraps after ~49.7 days; every consumer
/// compares timestamps with `wrapping_sub`.
pub trait ClockPort: DelayNs {
    /// Milliseconds since boot.
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// GPIO port
// ───────────────────────────────────────────────────────────────

/// Level read of the digital inputs, level write of the digital outputs.
pub trait GpioPort {
    fn read_level(&mut self, pin: InputPin) -> Level;

    fn write_level(&mut self, pin: OutputPin, level: Level);

    /// Whether `pin` currently reads its active level.
    fn is_asserted(&mut self, pin: InputPin) -> bool {
        self.read_level(pin) == pin.active_level()
    }
}

// ───────────────────────────────────────────────────────────────
// Temperature port
// ───────────────────────────────────────────────────────────────

/// Blocking "read Celsius, or fail". Plausibility filtering is the
/// caller's job (see [`TemperatureSampler`](crate::sensors::temperature::TemperatureSampler)).
pub trait TemperaturePort {
    fn read_celsius(&mut self) -> Result<f32, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Command channel port
// ───────────────────────────────────────────────────────────────

/// Line-oriented status/command byte stream.
pub trait CommandChannel {
    /// Next buffered inbound byte, or `None` when the buffer is empty.
    fn read_byte(&mut self) -> Option<u8>;

    /// Write one line; the implementation appends the line terminator.
    fn write_line(&mut self, line: &str) -> Result<(), CommsError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Combined hardware bound
// ───────────────────────────────────────────────────────────────

/// Everything the control loop needs from the board, as one `&mut` value.
///
/// Passing a single value that satisfies every port avoids double mutable
/// borrows while keeping each boundary explicit.
pub trait DrainHardware: ClockPort + GpioPort + TemperaturePort + CommandChannel {}

impl<T> DrainHardware for T where T: ClockPort + GpioPort + TemperaturePort + CommandChannel {}
