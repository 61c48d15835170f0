//! Serial status/command channel.
//!
//! On the device this is UART1, kept apart from the UART0 log console so
//! the wire carries nothing but status lines. Lines go out
//! newline-terminated and the host relay writes single command bytes back.
//!
//! On the host, received bytes come from a fixed-capacity
//! [`heapless::Deque`] filled by [`SerialChannel::inject_rx`], and every
//! written line is captured for inspection.

#[cfg(not(target_os = "espidf"))]
use heapless::Deque;
#[cfg(not(target_os = "espidf"))]
use log::warn;

use crate::app::ports::CommandChannel;
use crate::error::CommsError;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// Host receive buffer size; matches the smallest UART RX FIFO we target.
#[cfg(not(target_os = "espidf"))]
pub const SIM_RX_CAPACITY: usize = 64;

pub struct SerialChannel {
    #[cfg(not(target_os = "espidf"))]
    rx: Deque<u8, SIM_RX_CAPACITY>,
    #[cfg(not(target_os = "espidf"))]
    tx: Vec<String>,
    #[cfg(not(target_os = "espidf"))]
    installed: bool,
}

impl Default for SerialChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialChannel {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            rx: Deque::new(),
            #[cfg(not(target_os = "espidf"))]
            tx: Vec::new(),
            #[cfg(not(target_os = "espidf"))]
            installed: true,
        }
    }

    /// Simulate the UART driver being (un)installed.
    #[cfg(not(target_os = "espidf"))]
    pub fn set_installed(&mut self, installed: bool) {
        self.installed = installed;
    }

    /// Queue inbound bytes. Bytes past the buffer capacity are dropped,
    /// as a full UART FIFO would. Returns how many were accepted.
    #[cfg(not(target_os = "espidf"))]
    pub fn inject_rx(&mut self, bytes: &[u8]) -> usize {
        let mut accepted = 0;
        for &b in bytes {
            if self.rx.push_back(b).is_err() {
                warn!("serial(sim): rx overflow, {} byte(s) dropped", bytes.len() - accepted);
                break;
            }
            accepted += 1;
        }
        accepted
    }

    /// Take every line written so far.
    #[cfg(not(target_os = "espidf"))]
    pub fn take_tx(&mut self) -> Vec<String> {
        core::mem::take(&mut self.tx)
    }
}

#[cfg(target_os = "espidf")]
impl CommandChannel for SerialChannel {
    fn read_byte(&mut self) -> Option<u8> {
        hw_init::uart_read_byte()
    }

    fn write_line(&mut self, line: &str) -> Result<(), CommsError> {
        if !hw_init::uart_ready() {
            return Err(CommsError::NotInitialised);
        }
        let body = hw_init::uart_write(line.as_bytes());
        let eol = hw_init::uart_write(b"\r\n");
        if body == line.len() && eol == 2 {
            Ok(())
        } else {
            Err(CommsError::WriteFailed)
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl CommandChannel for SerialChannel {
    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }

    fn write_line(&mut self, line: &str) -> Result<(), CommsError> {
        if !self.installed {
            return Err(CommsError::NotInitialised);
        }
        self.tx.push(line.to_owned());
        Ok(())
    }
}
