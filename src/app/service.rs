//! Application service: the drain control loop.
//!
//! [`ControlLoop`] owns the [`SystemState`] record and the domain
//! components. All I/O flows through the port traits of the single `hw`
//! value passed into every call, so the whole loop runs against a mock
//! board in tests.
//!
//! ```text
//!  ClockPort ────┐                        ┌──▶ CommandChannel (status)
//!  GpioPort  ────┤──▶  ControlLoop  ──────┤
//!  TemperaturePort┘   freeze · retry ·    └──▶ EventSink
//!                     pumps · status
//! ```

use log::{debug, info};

use crate::config::DrainConfig;
use crate::control::freeze::FreezeMonitor;
use crate::control::retry::{DrainRetryScheduler, RetryPolicy};
use crate::drivers::pump::{PrimeReport, PrimeTiming, PumpController, PumpSelector};
use crate::drivers::status_led;
use crate::pins::InputPin;
use crate::sensors::temperature::TemperatureSampler;

use super::commands::{self, AppCommand};
use super::events::{AppEvent, TriggerSource};
use super::ports::{DrainHardware, EventSink};
use super::state::SystemState;
use super::status::{StatusMessage, StatusReporter};

pub struct ControlLoop {
    config: DrainConfig,
    state: SystemState,
    freeze: FreezeMonitor,
    scheduler: DrainRetryScheduler,
    pumps: PumpController,
    reporter: StatusReporter,
    sampler: TemperatureSampler,
}

impl ControlLoop {
    /// Boot the controller: block until a plausible temperature arrives,
    /// then build the initial state with the pumps off.
    pub fn start<H, S>(config: DrainConfig, hw: &mut H, sink: &mut S) -> Self
    where
        H: DrainHardware,
        S: EventSink,
    {
        let sampler = TemperatureSampler::from_config(&config);
        let now = hw.now_ms();
        let temperature_c = sampler.sample(hw);
        let is_frozen = temperature_c < config.lower_freeze_cutoff_c;

        let state = SystemState::at_boot(
            now,
            temperature_c,
            is_frozen,
            config.startup_retry_delay_ms,
            config.temp_read_interval_ms,
        );

        let mut this = Self::from_state(config, state);
        this.pumps.set_pump(hw, PumpSelector::None);

        info!(
            "ControlLoop started: T={:.1}\u{00b0}C frozen={} retry={}ms",
            temperature_c, is_frozen, state.retry_delay_ms
        );
        sink.emit(&AppEvent::Started {
            temperature_c,
            frozen: is_frozen,
        });
        this
    }

    /// Resume from an existing state record without touching hardware.
    pub fn from_state(config: DrainConfig, state: SystemState) -> Self {
        let scheduler = DrainRetryScheduler::from_config(&config);
        Self {
            freeze: FreezeMonitor::from_config(&config),
            scheduler,
            pumps: PumpController::new(PrimeTiming::from_config(&config)),
            reporter: StatusReporter::new(scheduler),
            sampler: TemperatureSampler::from_config(&config),
            config,
            state,
        }
    }

    pub fn state(&self) -> &SystemState {
        &self.state
    }

    pub fn pumps(&self) -> &PumpController {
        &self.pumps
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control cycle.
    pub fn tick<H, S>(&mut self, hw: &mut H, sink: &mut S)
    where
        H: DrainHardware,
        S: EventSink,
    {
        let now = hw.now_ms();

        // 1. Pumps off between sequences
        self.pumps.set_pump(hw, PumpSelector::None);

        // 2. Temperature, rate limited
        if now.wrapping_sub(self.state.time_of_last_temp_check) > self.config.temp_read_interval_ms {
            self.state.time_of_last_temp_check = now;
            self.state.current_temperature_c = self.sampler.sample(hw);
            debug!("Temperature {:.2}\u{00b0}C", self.state.current_temperature_c);
        }

        // 3. Inputs
        let draining = hw.is_asserted(InputPin::Drain);
        let button = hw.is_asserted(InputPin::Button);
        let command = commands::read_command(hw);

        // 4. Freeze detection
        self.update_freeze(hw, sink);

        // 5. Pre-action snapshot
        self.reporter.report(hw, &self.state, StatusMessage::Online);

        // 6. Manual trigger
        let trigger = if button {
            Some(TriggerSource::Button)
        } else if command == Some(AppCommand::TriggerDrain) {
            Some(TriggerSource::Command)
        } else {
            None
        };
        if let Some(source) = trigger {
            info!("Manual prime requested via {:?}", source);
            sink.emit(&AppEvent::ManualTrigger(source));
            self.state.time_of_last_prime = now;
            self.run_prime(hw, sink);
            self.scheduler.note_drain_activity(&mut self.state, now);
        }

        // 7. Drop leftover command bytes
        let dropped = commands::flush_input(hw);
        if dropped > 0 {
            debug!("Discarded {} command byte(s)", dropped);
        }

        // 8. Retry scheduling
        self.apply_retry(hw, sink, draining, now);

        // 9. Draining indicator
        self.state.indicator_phase = status_led::show_phase(hw, self.state.indicator_phase, draining);
    }

    fn update_freeze<H, S>(&mut self, hw: &mut H, sink: &mut S)
    where
        H: DrainHardware,
        S: EventSink,
    {
        let was_frozen = self.state.is_frozen;
        let temperature_c = self.state.current_temperature_c;
        let frozen = self.freeze.update(was_frozen, temperature_c);
        if frozen == was_frozen {
            return;
        }

        self.state.is_frozen = frozen;
        info!("Freeze state -> {} at {:.2}\u{00b0}C", frozen, temperature_c);
        sink.emit(&AppEvent::FreezeChanged {
            frozen,
            temperature_c,
        });

        if frozen {
            self.pumps.run_flush_sequence(hw);
            sink.emit(&AppEvent::FlushCompleted);
        }
    }

    fn apply_retry<H, S>(&mut self, hw: &mut H, sink: &mut S, draining: bool, now: u32)
    where
        H: DrainHardware,
        S: EventSink,
    {
        let policy = RetryPolicy::for_drain(draining);
        if draining {
            self.scheduler.note_drain_activity(&mut self.state, now);
        }

        if !self.scheduler.is_due(policy, &self.state, now) {
            return;
        }

        self.state.time_of_last_prime = now;
        self.run_prime(hw, sink);
        if policy == RetryPolicy::Idle {
            self.state.retry_delay_ms = self.scheduler.next_delay(self.state.retry_delay_ms);
        }

        info!(
            "Re-prime fired ({:?}); idle delay now {}ms",
            policy, self.state.retry_delay_ms
        );
        sink.emit(&AppEvent::RetryFired {
            policy,
            next_delay_ms: self.state.retry_delay_ms,
        });
    }

    /// Prime every pump, publishing a "Priming" line before each attempt.
    fn run_prime<H, S>(&mut self, hw: &mut H, sink: &mut S) -> PrimeReport
    where
        H: DrainHardware,
        S: EventSink,
    {
        let reporter = self.reporter;
        let state = self.state;
        let report = self.pumps.run_prime_sequence(hw, |hw, _pump| {
            reporter.report(hw, &state, StatusMessage::Priming);
        });
        for (pump, primed) in report.results {
            sink.emit(&AppEvent::PrimeAttempted { pump, primed });
        }
        report
    }
}
