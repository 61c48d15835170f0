//! Mock drain board for integration tests.
//!
//! Simulated millisecond clock, scripted inputs and a recorded history of
//! every output write, so tests can drive whole control-loop scenarios
//! without touching real GPIO registers.
//!
//! Time only moves when something would take time on the device:
//! explicit delays, [`MockBoard::advance`], and each poll of the
//! readiness input (the stabilizer busy-waits on it).

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use smartdrain::app::events::AppEvent;
use smartdrain::app::ports::{ClockPort, CommandChannel, EventSink, GpioPort, TemperaturePort};
use smartdrain::app::status::StatusLine;
use smartdrain::drivers::pump::PumpSelector;
use smartdrain::error::{CommsError, SensorError};
use smartdrain::pins::{InputPin, Level, OutputPin};

/// How the siphon-ready input behaves.
pub enum ReadyBehaviour {
    Constant(Level),
    /// HIGH while no pump runs, LOW while one does: every prime succeeds.
    FollowsPump,
    /// Level as a function of the current time.
    Script(Box<dyn FnMut(u32) -> Level>),
}

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    now: u32,
    nanos: u64,
    /// Time consumed by each readiness poll.
    pub poll_step_ms: u32,
    pub drain: Level,
    pub button: Level,
    pub ready: ReadyBehaviour,
    temperatures: VecDeque<Result<f32, SensorError>>,
    steady_temperature: f32,
    pub temperature_reads: usize,
    rx: VecDeque<u8>,
    pub tx: Vec<String>,
    /// Every `write_line` fails as a short UART write would.
    pub fail_writes: bool,
    pub writes: Vec<(u32, OutputPin, Level)>,
    pub pump_history: Vec<(u32, PumpSelector)>,
    x: Level,
    y: Level,
    led: Level,
}

#[allow(dead_code)]
impl MockBoard {
    /// Idle board: not draining, button released, every prime succeeds.
    pub fn new(temperature_c: f32) -> Self {
        Self {
            now: 0,
            nanos: 0,
            poll_step_ms: 10,
            drain: Level::High,
            button: Level::High,
            ready: ReadyBehaviour::FollowsPump,
            temperatures: VecDeque::new(),
            steady_temperature: temperature_c,
            temperature_reads: 0,
            rx: VecDeque::new(),
            tx: Vec::new(),
            fail_writes: false,
            writes: Vec::new(),
            pump_history: Vec::new(),
            x: Level::Low,
            y: Level::Low,
            led: Level::Low,
        }
    }

    pub fn now(&self) -> u32 {
        self.now
    }

    pub fn set_now(&mut self, ms: u32) {
        self.now = ms;
    }

    pub fn advance(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }

    pub fn set_draining(&mut self, draining: bool) {
        self.drain = if draining { Level::Low } else { Level::High };
    }

    pub fn set_button(&mut self, pressed: bool) {
        self.button = if pressed { Level::Low } else { Level::High };
    }

    /// Replace the probe reading from now on.
    pub fn set_temperature(&mut self, celsius: f32) {
        self.temperatures.clear();
        self.steady_temperature = celsius;
    }

    /// Readings returned before falling back to the steady value.
    pub fn queue_readings(&mut self, readings: impl IntoIterator<Item = Result<f32, SensorError>>) {
        self.temperatures.extend(readings);
    }

    pub fn inject(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes.iter().copied());
    }

    pub fn rx_pending(&self) -> usize {
        self.rx.len()
    }

    pub fn pump(&self) -> PumpSelector {
        PumpSelector::from_levels(self.x, self.y)
    }

    pub fn led(&self) -> Level {
        self.led
    }

    /// Pump selections other than `None`, in order.
    pub fn pumps_run(&self) -> Vec<PumpSelector> {
        self.pump_history
            .iter()
            .map(|&(_, p)| p)
            .filter(|&p| p != PumpSelector::None)
            .collect()
    }

    pub fn led_writes(&self) -> Vec<Level> {
        self.writes
            .iter()
            .filter(|(_, pin, _)| *pin == OutputPin::StatusLed)
            .map(|&(_, _, level)| level)
            .collect()
    }

    /// Every status line written so far, parsed.
    pub fn status_lines(&self) -> Vec<StatusLine> {
        self.tx
            .iter()
            .map(|l| StatusLine::parse(l).expect("status line is valid JSON"))
            .collect()
    }

    pub fn clear_history(&mut self) {
        self.tx.clear();
        self.writes.clear();
        self.pump_history.clear();
    }

    fn ready_level(&mut self) -> Level {
        let pump_running = self.pump() != PumpSelector::None;
        let now = self.now;
        match &mut self.ready {
            ReadyBehaviour::Constant(level) => *level,
            ReadyBehaviour::FollowsPump => Level::from(!pump_running),
            ReadyBehaviour::Script(f) => f(now),
        }
    }
}

impl DelayNs for MockBoard {
    fn delay_ns(&mut self, ns: u32) {
        self.nanos += u64::from(ns);
        let whole_ms = self.nanos / 1_000_000;
        self.nanos %= 1_000_000;
        self.advance(whole_ms as u32);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms);
    }
}

impl ClockPort for MockBoard {
    fn now_ms(&self) -> u32 {
        self.now
    }
}

impl GpioPort for MockBoard {
    fn read_level(&mut self, pin: InputPin) -> Level {
        match pin {
            InputPin::Drain => self.drain,
            InputPin::Button => self.button,
            InputPin::PrimeReady => {
                let level = self.ready_level();
                self.advance(self.poll_step_ms);
                level
            }
        }
    }

    fn write_level(&mut self, pin: OutputPin, level: Level) {
        self.writes.push((self.now, pin, level));
        match pin {
            OutputPin::PumpX => self.x = level,
            OutputPin::PumpY => {
                self.y = level;
                self.pump_history.push((self.now, self.pump()));
            }
            OutputPin::StatusLed => self.led = level,
        }
    }
}

impl TemperaturePort for MockBoard {
    fn read_celsius(&mut self) -> Result<f32, SensorError> {
        self.temperature_reads += 1;
        self.temperatures
            .pop_front()
            .unwrap_or(Ok(self.steady_temperature))
    }
}

impl CommandChannel for MockBoard {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write_line(&mut self, line: &str) -> Result<(), CommsError> {
        if self.fail_writes {
            return Err(CommsError::WriteFailed);
        }
        self.tx.push(line.to_owned());
        Ok(())
    }
}

// ── RecordingSink ─────────────────────────────────────────────

/// Event sink that keeps every event for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
