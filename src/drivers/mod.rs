//! Pump sequencing, input debouncing, status LED and hardware bring-up.

pub mod hw_init;
pub mod pump;
pub mod stabilizer;
pub mod status_led;
