//! Outdoor water-line probe: 10 kOhm NTC (B = 3950) in a divider with a
//! fixed 10 kOhm resistor, sampled on ADC1.
//!
//! Counts are converted to a resistance and then to °C with the Beta
//! equation. A reading pinned to either rail means the probe wiring is
//! open or shorted and is reported as [`SensorError::Disconnected`].
//!
//! On the device the raw count comes from `hw_init::adc1_read`; host
//! builds read a simulated count set with `sim_set_temp_adc`.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::app::ports::TemperaturePort;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::error::SensorError;

#[cfg(not(target_os = "espidf"))]
static SIM_TEMP_ADC: AtomicU16 = AtomicU16::new(2048);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_temp_adc(raw: u16) {
    SIM_TEMP_ADC.store(raw, Ordering::Relaxed);
}

const R25: f32 = 10_000.0;
const BETA: f32 = 3950.0;
const T25_K: f32 = 298.15;
const R_DIVIDER: f32 = 10_000.0;
const ADC_MAX: f32 = 4095.0;
const V_REF: f32 = 3.3;
/// Within this of either rail the divider is open or shorted.
const RAIL_MARGIN_V: f32 = 0.01;

pub struct NtcThermistor {
    _adc_gpio: i32,
    adc_channel: u32,
}

impl NtcThermistor {
    pub fn new(adc_gpio: i32, adc_channel: u32) -> Self {
        Self {
            _adc_gpio: adc_gpio,
            adc_channel,
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self) -> Option<u16> {
        hw_init::adc1_read(self.adc_channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self) -> Option<u16> {
        let _ = self.adc_channel;
        Some(SIM_TEMP_ADC.load(Ordering::Relaxed))
    }
}

/// Convert a raw 12-bit conversion to °C.
pub fn adc_to_celsius(raw: u16) -> Result<f32, SensorError> {
    let voltage = (f32::from(raw) / ADC_MAX) * V_REF;
    if voltage <= RAIL_MARGIN_V || voltage >= (V_REF - RAIL_MARGIN_V) {
        return Err(SensorError::Disconnected);
    }
    let r_ntc = R_DIVIDER * voltage / (V_REF - voltage);
    let inv_t = (1.0 / T25_K) + (1.0 / BETA) * (r_ntc / R25).ln();
    if inv_t <= 0.0 {
        return Err(SensorError::OutOfRange);
    }
    Ok((1.0 / inv_t) - 273.15)
}

impl TemperaturePort for NtcThermistor {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        let raw = self.read_adc().ok_or(SensorError::ReadFailed)?;
        adc_to_celsius(raw)
    }
}
