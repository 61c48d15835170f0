//! Freeze detection with a sticky hysteresis band.
//!
//! Below the lower cutoff the line is frozen, above the upper cutoff it is
//! thawed, and anywhere in `[lower, upper]` the previous verdict stands so
//! a probe hovering around 1 °C cannot make the flag chatter.

use crate::config::DrainConfig;

#[derive(Debug, Clone, Copy)]
pub struct FreezeMonitor {
    lower_c: f32,
    upper_c: f32,
}

impl FreezeMonitor {
    pub fn new(lower_c: f32, upper_c: f32) -> Self {
        Self { lower_c, upper_c }
    }

    pub fn from_config(config: &DrainConfig) -> Self {
        Self::new(config.lower_freeze_cutoff_c, config.upper_freeze_cutoff_c)
    }

    /// New freeze verdict for `temperature_c`, given the previous one.
    pub fn update(&self, previous_is_frozen: bool, temperature_c: f32) -> bool {
        if temperature_c < self.lower_c {
            true
        } else if temperature_c > self.upper_c {
            false
        } else {
            previous_is_frozen
        }
    }
}
