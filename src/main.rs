//! SmartDrain Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │  HardwareAdapter                       LogEventSink      │
//! │  (Clock+Gpio+Temperature+Serial)       (EventSink)       │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │            ControlLoop (pure logic)                │  │
//! │  │  Freeze · Retry · Pumps · Status                   │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use embedded_hal::delay::DelayNs;
use log::info;

use smartdrain::adapters::hardware::HardwareAdapter;
use smartdrain::adapters::log_sink::LogEventSink;
use smartdrain::adapters::serial::SerialChannel;
use smartdrain::adapters::time::Esp32TimeAdapter;
use smartdrain::app::service::ControlLoop;
use smartdrain::config::DrainConfig;
use smartdrain::drivers::hw_init;
use smartdrain::error::Error;
use smartdrain::pins;
use smartdrain::sensors::thermistor::NtcThermistor;

/// FreeRTOS yield between ticks; the loop has no cadence of its own.
const TICK_YIELD_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartDrain v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = hw_init::init_peripherals().map_err(Error::from) {
        // Outputs stay at their reset level (pumps off).
        log::error!("HAL init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Configuration ──────────────────────────────────────
    let config = DrainConfig::default();
    config.validate().context("compiled-in configuration rejected")?;

    // ── 4. Build adapters ─────────────────────────────────────
    let mut hw = HardwareAdapter::new(
        Esp32TimeAdapter::new(),
        NtcThermistor::new(pins::TEMP_ADC_GPIO, pins::TEMP_ADC_CHANNEL),
        SerialChannel::new(),
    );
    let mut sink = LogEventSink::new();

    // ── 5. Control loop ───────────────────────────────────────
    let mut control = ControlLoop::start(config, &mut hw, &mut sink);
    info!("System ready. Entering control loop.");

    loop {
        control.tick(&mut hw, &mut sink);
        hw.delay_ms(TICK_YIELD_MS);
    }
}
