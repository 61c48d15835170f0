//! Stable-level wait (debounce with a deadline).
//!
//! Busy-polls an input until it has held a target level for a minimum
//! hold window, or until the overall budget runs out. There is no sleep
//! between polls and no way to abort the wait early.

use crate::app::ports::{ClockPort, GpioPort};
use crate::pins::{InputPin, Level};

/// Wait for `pin` to read `target` continuously for `min_hold_ms`.
///
/// Returns the last level observed: `target` on success, the other level
/// when `max_wait_ms` elapsed first.
pub fn await_stable_level<H>(
    hw: &mut H,
    pin: InputPin,
    target: Level,
    min_hold_ms: u32,
    max_wait_ms: u32,
) -> Level
where
    H: ClockPort + GpioPort,
{
    let start = hw.now_ms();
    let mut last_mismatch = start;

    loop {
        let now = hw.now_ms();
        let level = hw.read_level(pin);
        if level != target {
            last_mismatch = now;
        }

        if now.wrapping_sub(last_mismatch) >= min_hold_ms || now.wrapping_sub(start) >= max_wait_ms {
            return level;
        }
    }
}
