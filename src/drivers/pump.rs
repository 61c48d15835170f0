//! Siphon pump selector and sequencing.
//!
//! Three pumps share two select outputs: the 2-bit code on X/Y picks at
//! most one running pump, and `0b00` means all stopped.
//!
//! ## Safety contract
//!
//! The select outputs must read [`PumpSelector::None`] whenever no
//! sequence is running. Every sequence in this module writes `None` before
//! it starts and before it returns; the control loop also writes `None`
//! at the top of every tick.

use log::{debug, info, warn};

use crate::app::ports::{ClockPort, GpioPort};
use crate::config::DrainConfig;
use crate::drivers::stabilizer::await_stable_level;
use crate::pins::{InputPin, Level, OutputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpSelector {
    None,
    A,
    B,
    C,
}

impl PumpSelector {
    /// Pumps in prime/flush order.
    pub const PUMPS: [Self; 3] = [Self::A, Self::B, Self::C];

    /// 2-bit select code: bit 0 drives X, bit 1 drives Y.
    pub const fn code(self) -> u8 {
        match self {
            Self::None => 0b00,
            Self::A => 0b01,
            Self::B => 0b10,
            Self::C => 0b11,
        }
    }

    /// Output levels `(X, Y)` for this selector.
    pub fn levels(self) -> (Level, Level) {
        let code = self.code();
        (Level::from(code & 1 != 0), Level::from(code & 0b10 != 0))
    }

    /// Inverse of [`levels`](Self::levels).
    pub fn from_levels(x: Level, y: Level) -> Self {
        match (x, y) {
            (Level::Low, Level::Low) => Self::None,
            (Level::High, Level::Low) => Self::A,
            (Level::Low, Level::High) => Self::B,
            (Level::High, Level::High) => Self::C,
        }
    }
}

/// Timing windows for the readiness handshake.
#[derive(Debug, Clone, Copy)]
pub struct PrimeTiming {
    pub ready_hold_ms: u32,
    pub ready_timeout_ms: u32,
    pub complete_hold_ms: u32,
    pub complete_timeout_ms: u32,
    pub flush_step_ms: u32,
    pub settle_ms: u32,
}

impl PrimeTiming {
    pub fn from_config(config: &DrainConfig) -> Self {
        Self {
            ready_hold_ms: config.ready_hold_ms,
            ready_timeout_ms: config.ready_timeout_ms,
            complete_hold_ms: config.complete_hold_ms,
            complete_timeout_ms: config.complete_timeout_ms,
            flush_step_ms: config.flush_step_ms,
            settle_ms: config.sequence_settle_ms,
        }
    }
}

/// Outcome of a full prime sequence, one entry per pump in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeReport {
    pub results: [(PumpSelector, bool); 3],
}

impl PrimeReport {
    pub fn primed_count(&self) -> usize {
        self.results.iter().filter(|(_, ok)| *ok).count()
    }
}

pub struct PumpController {
    timing: PrimeTiming,
    current: PumpSelector,
}

impl PumpController {
    pub fn new(timing: PrimeTiming) -> Self {
        Self {
            timing,
            current: PumpSelector::None,
        }
    }

    /// Drive the select outputs. Always safe to call.
    pub fn set_pump<H: GpioPort>(&mut self, hw: &mut H, selector: PumpSelector) {
        let (x, y) = selector.levels();
        hw.write_level(OutputPin::PumpX, x);
        hw.write_level(OutputPin::PumpY, y);
        self.current = selector;
    }

    /// Last selector written.
    pub fn current(&self) -> PumpSelector {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.current != PumpSelector::None
    }

    /// Prime one pump through the readiness handshake.
    ///
    /// Returns `true` only if the readiness input dropped and stayed LOW
    /// for the completion hold window. The pump is off on return.
    pub fn prime<H>(&mut self, hw: &mut H, selector: PumpSelector) -> bool
    where
        H: ClockPort + GpioPort,
    {
        let t = self.timing;

        let ready = await_stable_level(
            hw,
            InputPin::PrimeReady,
            Level::High,
            t.ready_hold_ms,
            t.ready_timeout_ms,
        );
        if ready != Level::High {
            warn!("Prime {:?}: siphon never became ready", selector);
            self.set_pump(hw, PumpSelector::None);
            return false;
        }

        self.set_pump(hw, selector);
        let done = await_stable_level(
            hw,
            InputPin::PrimeReady,
            Level::Low,
            t.complete_hold_ms,
            t.complete_timeout_ms,
        );
        self.set_pump(hw, PumpSelector::None);

        let primed = done == Level::Low;
        if primed {
            debug!("Prime {:?}: complete", selector);
        } else {
            warn!("Prime {:?}: readiness never dropped", selector);
        }
        primed
    }

    /// Prime A, B and C in order, tolerating individual failures.
    ///
    /// `before_each` runs before every pump's attempt (the control loop
    /// uses it to publish a "Priming" status line).
    pub fn run_prime_sequence<H, F>(&mut self, hw: &mut H, mut before_each: F) -> PrimeReport
    where
        H: ClockPort + GpioPort,
        F: FnMut(&mut H, PumpSelector),
    {
        info!("Prime sequence start");
        hw.write_level(OutputPin::StatusLed, Level::Low);
        self.set_pump(hw, PumpSelector::None);

        let mut results = [(PumpSelector::None, false); 3];
        for (slot, pump) in results.iter_mut().zip(PumpSelector::PUMPS) {
            before_each(hw, pump);
            *slot = (pump, self.prime(hw, pump));
        }

        hw.delay_ms(self.timing.settle_ms);
        let report = PrimeReport { results };
        info!("Prime sequence done: {}/3 primed", report.primed_count());
        report
    }

    /// Run each pump briefly with no readiness gating to purge the line.
    pub fn run_flush_sequence<H>(&mut self, hw: &mut H)
    where
        H: ClockPort + GpioPort,
    {
        info!("Flush sequence start");
        hw.write_level(OutputPin::StatusLed, Level::Low);
        self.set_pump(hw, PumpSelector::None);

        for pump in PumpSelector::PUMPS {
            self.set_pump(hw, pump);
            hw.delay_ms(self.timing.flush_step_ms);
        }

        self.set_pump(hw, PumpSelector::None);
        hw.delay_ms(self.timing.settle_ms);
        info!("Flush sequence done");
    }
}
