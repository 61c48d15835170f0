//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the
//! ESP-IDF logger (UART / USB-CDC in production), one tagged line each.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                temperature_c,
                frozen,
            } => {
                info!("START | T={:.1}\u{00b0}C | frozen={}", temperature_c, frozen);
            }
            AppEvent::FreezeChanged {
                frozen,
                temperature_c,
            } => {
                info!(
                    "FREEZE | {} at {:.1}\u{00b0}C",
                    if *frozen { "frozen" } else { "thawed" },
                    temperature_c
                );
            }
            AppEvent::FlushCompleted => {
                info!("FLUSH | complete");
            }
            AppEvent::PrimeAttempted { pump, primed } => {
                if *primed {
                    info!("PRIME | pump={:?} | ok", pump);
                } else {
                    warn!("PRIME | pump={:?} | failed", pump);
                }
            }
            AppEvent::ManualTrigger(source) => {
                info!("TRIGGER | source={:?}", source);
            }
            AppEvent::RetryFired {
                policy,
                next_delay_ms,
            } => {
                info!("RETRY | policy={:?} | next_delay={}ms", policy, next_delay_ms);
            }
        }
    }
}
