//! Pure control decisions: freeze hysteresis and re-prime scheduling.
//!
//! Nothing in here touches hardware or the clock; callers pass the sample
//! and the tick timestamp in.

pub mod freeze;
pub mod retry;
