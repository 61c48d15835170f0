//! GPIO / peripheral pin assignments for the SmartDrain controller board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers. The domain never sees raw numbers: it talks in
//! [`InputPin`] / [`OutputPin`] roles and [`Level`]s, and only the hardware
//! adapter maps a role to its GPIO.

// ---------------------------------------------------------------------------
// Digital inputs
// ---------------------------------------------------------------------------

/// Drain float sensor. LOW = water is draining.
pub const DRAIN_GPIO: i32 = 3;
/// Siphon readiness sensor. HIGH = siphon ready to prime.
pub const PRIME_READY_GPIO: i32 = 4;
/// Momentary push-button (active-low with external pull-up).
pub const BUTTON_GPIO: i32 = 7;

// ---------------------------------------------------------------------------
// Digital outputs
// ---------------------------------------------------------------------------

/// Pump select, bit 0.
pub const PUMP_X_GPIO: i32 = 5;
/// Pump select, bit 1.
pub const PUMP_Y_GPIO: i32 = 6;
/// Single-colour status LED.
pub const STATUS_LED_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Temperature probe (NTC thermistor, ADC1)
// ---------------------------------------------------------------------------

/// NTC thermistor, 10 kΩ @ 25 °C, voltage divider to ADC.
/// ADC1 channel 8 (GPIO 9 on ESP32-S3).
pub const TEMP_ADC_GPIO: i32 = 9;
pub const TEMP_ADC_CHANNEL: u32 = 8;

// ---------------------------------------------------------------------------
// UARTs
// ---------------------------------------------------------------------------

/// ESP-IDF console (log output). Never shared with the status channel.
pub const CONSOLE_UART_PORT: i32 = 0;
pub const CONSOLE_TX_GPIO: i32 = 43;
pub const CONSOLE_RX_GPIO: i32 = 44;

/// Status / command channel to the host relay. Carries JSON lines only.
pub const STATUS_UART_PORT: i32 = 1;
pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;
pub const UART_BAUD: u32 = 9600;

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Self::High
    }

}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Input roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPin {
    Drain,
    PrimeReady,
    Button,
}

impl InputPin {
    pub const ALL: [Self; 3] = [Self::Drain, Self::PrimeReady, Self::Button];

    pub const fn gpio(self) -> i32 {
        match self {
            Self::Drain => DRAIN_GPIO,
            Self::PrimeReady => PRIME_READY_GPIO,
            Self::Button => BUTTON_GPIO,
        }
    }

    /// Level at which the input is asserted.
    pub const fn active_level(self) -> Level {
        match self {
            Self::Drain | Self::Button => Level::Low,
            Self::PrimeReady => Level::High,
        }
    }
}

/// Output roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPin {
    PumpX,
    PumpY,
    StatusLed,
}

impl OutputPin {
    pub const ALL: [Self; 3] = [Self::PumpX, Self::PumpY, Self::StatusLed];

    pub const fn gpio(self) -> i32 {
        match self {
            Self::PumpX => PUMP_X_GPIO,
            Self::PumpY => PUMP_Y_GPIO,
            Self::StatusLed => STATUS_LED_GPIO,
        }
    }
}
