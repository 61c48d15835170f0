//! Single-colour status LED: blink while draining.
//!
//! The LED is written once per tick with the stored phase, then the phase
//! for the next tick is picked from this table:
//!
//! | current | draining | next |
//! |---------|----------|------|
//! | High    | any      | Low  |
//! | Low     | yes      | High |
//! | Low     | no       | Low  |
//!
//! So the LED blinks at half the tick rate while draining and stays dark
//! otherwise. Prime and flush sequences drive the LED low directly without
//! touching the stored phase, so the tick after a sequence may light it
//! again from the stale phase.

use crate::app::ports::GpioPort;
use crate::pins::{Level, OutputPin};

/// Phase for the next tick.
pub fn next_phase(current: Level, draining: bool) -> Level {
    match current {
        Level::High => Level::Low,
        Level::Low if draining => Level::High,
        Level::Low => Level::Low,
    }
}

/// Write `phase` to the LED and return the phase for the next tick.
pub fn show_phase<H: GpioPort>(hw: &mut H, phase: Level, draining: bool) -> Level {
    hw.write_level(OutputPin::StatusLed, phase);
    next_phase(phase, draining)
}
