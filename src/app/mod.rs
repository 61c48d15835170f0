//! Application core: domain logic behind port traits.
//!
//! This module contains the control loop for the drain controller and
//! everything it talks to the outside world through: the port traits in
//! [`ports`], the state record, status lines, inbound commands and
//! outbound events. None of it touches hardware directly.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
pub mod status;
