//! Hardware adapter: bridges real peripherals to the domain port traits.
//!
//! Owns the clock, thermistor and serial channel, and maps pin roles to
//! GPIO numbers for the raw accessors in [`hw_init`]. The result is the
//! single `&mut` value the control loop threads through every call. On
//! non-espidf targets the underlying accessors are simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::adapters::serial::SerialChannel;
use crate::adapters::time::Esp32TimeAdapter;
use crate::app::ports::{ClockPort, CommandChannel, GpioPort, TemperaturePort};
use crate::drivers::hw_init;
use crate::error::{CommsError, SensorError};
use crate::pins::{InputPin, Level, OutputPin};
use crate::sensors::thermistor::NtcThermistor;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    clock: Esp32TimeAdapter,
    probe: NtcThermistor,
    serial: SerialChannel,
}

impl HardwareAdapter {
    pub fn new(clock: Esp32TimeAdapter, probe: NtcThermistor, serial: SerialChannel) -> Self {
        Self {
            clock,
            probe,
            serial,
        }
    }

    pub fn serial_mut(&mut self) -> &mut SerialChannel {
        &mut self.serial
    }
}

// ── Clock ─────────────────────────────────────────────────────

impl DelayNs for HardwareAdapter {
    fn delay_ns(&mut self, ns: u32) {
        self.clock.delay_ns(ns);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.clock.delay_ms(ms);
    }
}

impl ClockPort for HardwareAdapter {
    fn now_ms(&self) -> u32 {
        self.clock.now_ms()
    }
}

// ── GPIO ──────────────────────────────────────────────────────

impl GpioPort for HardwareAdapter {
    fn read_level(&mut self, pin: InputPin) -> Level {
        Level::from(hw_init::gpio_read(pin.gpio()))
    }

    fn write_level(&mut self, pin: OutputPin, level: Level) {
        hw_init::gpio_write(pin.gpio(), level.is_high());
    }
}

// ── Temperature ───────────────────────────────────────────────

impl TemperaturePort for HardwareAdapter {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.probe.read_celsius()
    }
}

// ── Serial ────────────────────────────────────────────────────

impl CommandChannel for HardwareAdapter {
    fn read_byte(&mut self) -> Option<u8> {
        self.serial.read_byte()
    }

    fn write_line(&mut self, line: &str) -> Result<(), CommsError> {
        self.serial.write_line(line)
    }
}
