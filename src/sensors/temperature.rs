//! Plausible-reading temperature sampler.
//!
//! Brownouts on the probe supply produce wild readings (DS18B20-style
//! probes report -127 °C, a railed thermistor reads as open circuit).
//! None of those are propagated: the sampler waits a fixed delay, reads
//! again, and keeps going until a reading lands inside the plausible
//! outdoor range. A persistently broken probe therefore stalls the loop
//! with the pumps in their last commanded state (`None`).

use log::{info, warn};

use crate::app::ports::{ClockPort, TemperaturePort};
use crate::config::DrainConfig;
use crate::error::SensorError;

#[derive(Debug, Clone, Copy)]
pub struct TemperatureSampler {
    min_c: f32,
    max_c: f32,
    retry_delay_ms: u32,
}

impl TemperatureSampler {
    pub fn new(min_c: f32, max_c: f32, retry_delay_ms: u32) -> Self {
        Self {
            min_c,
            max_c,
            retry_delay_ms,
        }
    }

    pub fn from_config(config: &DrainConfig) -> Self {
        Self::new(
            config.min_plausible_temp_c,
            config.max_plausible_temp_c,
            config.temp_retry_delay_ms,
        )
    }

    /// Inclusive range check; NaN is never plausible.
    pub fn is_plausible(&self, celsius: f32) -> bool {
        !celsius.is_nan() && celsius >= self.min_c && celsius <= self.max_c
    }

    /// Pass a raw driver result through the plausibility filter.
    pub fn check(&self, reading: Result<f32, SensorError>) -> Result<f32, SensorError> {
        let celsius = reading?;
        if self.is_plausible(celsius) {
            Ok(celsius)
        } else {
            Err(SensorError::OutOfRange)
        }
    }

    /// Block until the probe yields a plausible reading.
    pub fn sample<H>(&self, hw: &mut H) -> f32
    where
        H: ClockPort + TemperaturePort,
    {
        let mut rejected: u32 = 0;
        loop {
            hw.delay_ms(self.retry_delay_ms);
            match self.check(hw.read_celsius()) {
                Ok(celsius) => {
                    if rejected > 0 {
                        info!("Temperature probe recovered after {} rejected reads", rejected);
                    }
                    return celsius;
                }
                Err(e) => {
                    rejected = rejected.saturating_add(1);
                    warn!("Temperature read rejected ({}), retry #{}", e, rejected);
                }
            }
        }
    }
}
