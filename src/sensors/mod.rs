//! Temperature sensing: the NTC probe driver and the plausibility sampler
//! the control loop reads through.

pub mod temperature;
pub mod thermistor;
