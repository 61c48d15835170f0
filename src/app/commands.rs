//! Inbound commands from the status channel.
//!
//! The host side writes a single `d` to ask for a prime. Anything else,
//! including `d` with trailing bytes in the same batch, is ignored and
//! the receive buffer is discarded at the end of the tick.

use super::ports::CommandChannel;

/// The only command byte the controller understands.
pub const DRAIN_COMMAND: u8 = b'd';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Run the prime sequence now, as if the button were pressed.
    TriggerDrain,
}

impl AppCommand {
    /// Decode from the first buffered byte and whatever follows it.
    ///
    /// Only a lone `d` is accepted.
    pub fn decode(first: Option<u8>, next: Option<u8>) -> Option<Self> {
        match (first, next) {
            (Some(DRAIN_COMMAND), None) => Some(Self::TriggerDrain),
            _ => None,
        }
    }
}

/// Pull at most one command from the channel.
///
/// Consumes up to two bytes; whatever is left is for [`flush_input`].
pub fn read_command<C: CommandChannel>(channel: &mut C) -> Option<AppCommand> {
    let first = channel.read_byte()?;
    let next = channel.read_byte();
    AppCommand::decode(Some(first), next)
}

/// Discard everything still buffered. Returns the number of bytes dropped.
pub fn flush_input<C: CommandChannel>(channel: &mut C) -> usize {
    let mut dropped = 0;
    while channel.read_byte().is_some() {
        dropped += 1;
    }
    dropped
}
