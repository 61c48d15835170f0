//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements                   | Connects to            |
//! |------------|------------------------------|------------------------|
//! | `hardware` | Clock, Gpio, Temperature,    | everything below, GPIO |
//! |            | CommandChannel               |                        |
//! | `log_sink` | EventSink                    | Serial log output      |
//! | `serial`   | CommandChannel               | UART1                  |
//! | `time`     | ClockPort                    | ESP32 system timer     |

pub mod hardware;
pub mod log_sink;
pub mod serial;
pub mod time;
